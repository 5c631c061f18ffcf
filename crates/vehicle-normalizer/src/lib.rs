//! Vehicle Attribute Normalization
//!
//! Maps free-form year, make, model and trim input onto canonical values.
//! Each field is either matched to a canonical value, explicitly blank, or
//! passed through unchanged when nothing matches.

mod config;
mod error;
mod input;
mod matcher;
mod normalizer;
mod outcome;

pub use config::{NormalizerConfig, ReferenceLists, YearBounds};
pub use error::NormalizerError;
pub use input::{RawValue, VehicleInput, VehicleModelInput, VehicleRecord, BLANK_SENTINEL};
pub use matcher::{
    contains_ignore_case, find_canonical, match_make, match_model, match_trim, match_year,
    Containment,
};
pub use normalizer::{
    normalize, Clock, Field, FixedClock, NormalizedVehicle, SystemClock, VehicleNormalizer,
};
pub use outcome::FieldOutcome;
