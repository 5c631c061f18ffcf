//! Vehicle Input Normalization

use crate::config::NormalizerConfig;
use crate::error::NormalizerError;
use crate::input::{RawValue, VehicleInput, VehicleRecord};
use crate::matcher::{match_make, match_model, match_trim, match_year};
use crate::outcome::FieldOutcome;
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Source of the reference year for the year window
pub trait Clock: Send + Sync {
    fn current_year(&self) -> i64;
}

/// Local wall clock, read on every call
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i64 {
        chrono::Local::now().year() as i64
    }
}

/// Clock pinned to one year
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn current_year(&self) -> i64 {
        self.0
    }
}

/// Normalized vehicle attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Year,
    Make,
    Model,
    Trim,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Year, Field::Make, Field::Model, Field::Trim];

    /// Key used in result records
    pub fn name(&self) -> &'static str {
        match self {
            Field::Year => "year",
            Field::Make => "make",
            Field::Model => "model",
            Field::Trim => "trim",
        }
    }
}

/// Normalization result for one vehicle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedVehicle {
    pub year: FieldOutcome<i64>,
    pub make: FieldOutcome<String>,
    pub model: FieldOutcome<String>,
    pub trim: FieldOutcome<String>,
}

impl NormalizedVehicle {
    /// Flat value of one field, `None` when blank
    pub fn get(&self, field: Field) -> Option<RawValue> {
        match field {
            Field::Year => self.year.value(),
            Field::Make => self.make.value(),
            Field::Model => self.model.value(),
            Field::Trim => self.trim.value(),
        }
    }

    /// Result mapping from field name to flat value
    pub fn to_map(&self) -> BTreeMap<&'static str, Option<RawValue>> {
        Field::ALL
            .iter()
            .map(|field| (field.name(), self.get(*field)))
            .collect()
    }

    /// Number of fields that matched a canonical value
    pub fn matched_count(&self) -> usize {
        [
            self.year.is_matched(),
            self.make.is_matched(),
            self.model.is_matched(),
            self.trim.is_matched(),
        ]
        .iter()
        .filter(|matched| **matched)
        .count()
    }
}

/// Maps raw vehicle attributes onto canonical values
pub struct VehicleNormalizer {
    config: NormalizerConfig,
    clock: Arc<dyn Clock>,
}

impl VehicleNormalizer {
    /// Create a normalizer reading the year from the system clock
    pub fn new(config: NormalizerConfig) -> Result<Self, NormalizerError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a normalizer with an explicit clock
    pub fn with_clock(
        config: NormalizerConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, NormalizerError> {
        if let Err(err) = config.validate() {
            warn!("Rejected normalizer config: {}", err);
            return Err(err);
        }
        Ok(Self { config, clock })
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize against the clock's current year
    pub fn normalize(&self, input: &VehicleInput) -> NormalizedVehicle {
        self.normalize_at(input, self.clock.current_year())
    }

    /// Normalize against an explicit reference year
    pub fn normalize_at(&self, input: &VehicleInput, reference_year: i64) -> NormalizedVehicle {
        let reference = &self.config.reference;
        debug!(
            reference_year,
            makers = reference.makers.len(),
            models = reference.models.len(),
            trims = reference.trims.len(),
            "Normalizing vehicle input"
        );

        let model_name = input.model.name.as_ref();
        let result = NormalizedVehicle {
            year: match_year(input.year.as_ref(), &self.config.years, reference_year),
            make: match_make(input.make.as_ref(), &reference.makers),
            model: match_model(model_name, &reference.models),
            trim: match_trim(input.model.trim.as_ref(), model_name, &reference.trims),
        };

        trace!(
            year = ?result.year,
            make = ?result.make,
            model = ?result.model,
            trim = ?result.trim,
            "Normalized vehicle input"
        );
        result
    }

    /// Normalize a flat wire record
    pub fn normalize_record(&self, record: VehicleRecord) -> NormalizedVehicle {
        self.normalize(&VehicleInput::from(record))
    }

    /// Normalize a JSON record `{year, make, model, trim}` into the same shape
    pub fn normalize_json(&self, json: &str) -> Result<serde_json::Value, NormalizerError> {
        let record: VehicleRecord = serde_json::from_str(json)?;
        let result = self.normalize_record(record);
        Ok(serde_json::to_value(&result)?)
    }
}

impl Default for VehicleNormalizer {
    fn default() -> Self {
        Self {
            config: NormalizerConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }
}

/// Normalize a record with the default reference lists and the system clock
pub fn normalize(record: VehicleRecord) -> NormalizedVehicle {
    VehicleNormalizer::default().normalize_record(record)
}


#[cfg(test)]
mod properties {
    use super::*;
    use crate::config::ReferenceLists;
    use crate::input::BLANK_SENTINEL;
    use crate::matcher::contains_ignore_case;
    use proptest::prelude::*;

    fn canonical_list() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[A-Za-z]{1,6}", 1..5)
    }

    /// Lists where no entry contains another, ignoring case
    fn disjoint_list() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[A-Za-z]{2,6}", 1..5).prop_filter(
            "entries must not contain each other",
            |values| {
                values.iter().enumerate().all(|(i, a)| {
                    a != BLANK_SENTINEL
                        && values
                            .iter()
                            .enumerate()
                            .all(|(j, b)| i == j || !contains_ignore_case(a, b))
                })
            },
        )
    }

    fn normalizer_for(lists: ReferenceLists) -> VehicleNormalizer {
        VehicleNormalizer::with_clock(
            NormalizerConfig::with_reference(lists),
            Arc::new(FixedClock(2024)),
        )
        .unwrap()
    }

    proptest! {
        #[test]
        fn test_year_inside_window_is_kept(year in 1901i64..2026) {
            let input = VehicleInput::new(year, "Ford", "Focus", "ST");
            let result = fixed_year(2024).normalize(&input);
            prop_assert_eq!(result.year, FieldOutcome::Matched(year));
        }

        #[test]
        fn test_year_outside_window_passes_through(
            year in prop_oneof![i64::MIN..=1900i64, 2026i64..=i64::MAX]
        ) {
            let input = VehicleInput::new(year, "Ford", "Focus", "ST");
            let result = fixed_year(2024).normalize(&input);
            prop_assert_eq!(result.year, FieldOutcome::Unmatched(RawValue::Integer(year)));
        }

        #[test]
        fn test_blank_ignores_lists(
            makers in canonical_list(),
            models in canonical_list(),
            trims in canonical_list(),
        ) {
            let normalizer = normalizer_for(ReferenceLists { makers, models, trims });
            let result = normalizer.normalize(&VehicleInput::new("blank", "blank", "blank", "blank"));
            prop_assert_eq!(result.matched_count(), 0);
            prop_assert!(result.to_map().values().all(Option::is_none));
        }

        #[test]
        fn test_canonical_values_are_fixed_points(
            makers in disjoint_list(),
            models in disjoint_list(),
            trims in disjoint_list(),
            pick in any::<prop::sample::Index>(),
        ) {
            let make = makers[pick.index(makers.len())].clone();
            let model = models[pick.index(models.len())].clone();
            let trim = trims[pick.index(trims.len())].clone();

            let normalizer = normalizer_for(ReferenceLists { makers, models, trims });
            let input = VehicleInput::new(2020, make.as_str(), model.as_str(), trim.as_str());
            let result = normalizer.normalize(&input);
            prop_assert_eq!(result.make, FieldOutcome::Matched(make));
            prop_assert_eq!(result.model, FieldOutcome::Matched(model));
            prop_assert_eq!(result.trim, FieldOutcome::Matched(trim));
        }

        #[test]
        fn test_normalization_is_idempotent(
            makers in canonical_list(),
            models in canonical_list(),
            trims in canonical_list(),
            make in "[A-Za-z ]{0,10}",
            model in "[A-Za-z ]{0,12}",
            trim in "[A-Za-z ]{0,6}",
        ) {
            let normalizer = normalizer_for(ReferenceLists { makers, models, trims });
            let first = normalizer.normalize(&VehicleInput::new(2020, make, model, trim));

            if let (Some(make), Some(model), Some(trim)) =
                (first.make.matched(), first.model.matched(), first.trim.matched())
            {
                let again = normalizer.normalize(&VehicleInput::new(
                    2020,
                    make.as_str(),
                    model.as_str(),
                    trim.as_str(),
                ));
                prop_assert_eq!(&again.make, &first.make);
                prop_assert_eq!(&again.model, &first.model);
                prop_assert_eq!(&again.trim, &first.trim);
            }
        }

        #[test]
        fn test_arbitrary_text_never_panics(make in ".*", model in ".*", trim in ".*") {
            let normalizer = fixed_year(2024);
            let result = normalizer.normalize(&VehicleInput::new(make.as_str(), make.as_str(), model, trim));
            prop_assert!(result.matched_count() <= 4);
        }
    }

    fn fixed_year(year: i64) -> VehicleNormalizer {
        VehicleNormalizer::with_clock(NormalizerConfig::default(), Arc::new(FixedClock(year)))
            .unwrap()
    }
}
