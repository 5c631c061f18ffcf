//! Normalizer Error Types

use thiserror::Error;

/// Errors at the normalizer boundary.
///
/// Normalizing a record never fails; these only come from building a
/// normalizer out of a bad configuration or from reading malformed input.
#[derive(Debug, Error)]
pub enum NormalizerError {
    /// A reference list contains an empty canonical value
    #[error("{list} reference list has an empty canonical value at index {index}")]
    EmptyCanonicalValue { list: &'static str, index: usize },

    /// Year window cannot contain any year
    #[error("Invalid year bounds: min_year {min_year}, years_from_now {years_from_now}")]
    InvalidYearBounds { min_year: i64, years_from_now: i64 },

    /// Input record is not valid JSON or has the wrong shape
    #[error("Invalid vehicle record: {0}")]
    InvalidRecord(#[from] serde_json::Error),
}
