//! Normalizer configuration

use crate::error::NormalizerError;
use serde::{Deserialize, Serialize};

/// Canonical values per field. List order is match priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLists {
    pub makers: Vec<String>,
    pub models: Vec<String>,
    pub trims: Vec<String>,
}

impl ReferenceLists {
    pub fn new<S: Into<String>>(
        makers: impl IntoIterator<Item = S>,
        models: impl IntoIterator<Item = S>,
        trims: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            makers: makers.into_iter().map(Into::into).collect(),
            models: models.into_iter().map(Into::into).collect(),
            trims: trims.into_iter().map(Into::into).collect(),
        }
    }

    /// Reject empty canonical values, they would match every input
    pub fn validate(&self) -> Result<(), NormalizerError> {
        for (list, values) in [
            ("makers", &self.makers),
            ("models", &self.models),
            ("trims", &self.trims),
        ] {
            if let Some(index) = values.iter().position(|v| v.trim().is_empty()) {
                return Err(NormalizerError::EmptyCanonicalValue { list, index });
            }
        }
        Ok(())
    }
}

impl Default for ReferenceLists {
    fn default() -> Self {
        Self::new(["Chevrolet", "Ford"], ["Focus", "Impala"], ["ST", "SE"])
    }
}

/// Accepted model-year window: `min_year < year < reference_year + years_from_now`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearBounds {
    /// Exclusive lower bound
    pub min_year: i64,
    /// Exclusive offset above the reference year
    pub years_from_now: i64,
}

impl YearBounds {
    /// Whether `year` falls inside the window for `reference_year`
    pub fn accepts(&self, year: i64, reference_year: i64) -> bool {
        year > self.min_year && year < reference_year.saturating_add(self.years_from_now)
    }

    pub fn validate(&self) -> Result<(), NormalizerError> {
        if self.years_from_now < 1 {
            return Err(NormalizerError::InvalidYearBounds {
                min_year: self.min_year,
                years_from_now: self.years_from_now,
            });
        }
        Ok(())
    }
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            min_year: 1900,
            years_from_now: 2,
        }
    }
}

/// Normalizer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    #[serde(default)]
    pub reference: ReferenceLists,
    #[serde(default)]
    pub years: YearBounds,
}

impl NormalizerConfig {
    /// Config with caller lists and the default year window
    pub fn with_reference(reference: ReferenceLists) -> Self {
        Self {
            reference,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), NormalizerError> {
        self.reference.validate()?;
        self.years.validate()
    }
}
