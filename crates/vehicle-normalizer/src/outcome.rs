//! Per-field normalization outcome

use crate::input::RawValue;
use serde::{Serialize, Serializer};

/// Result of normalizing one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome<T> {
    /// Matched a canonical value
    Matched(T),
    /// Explicitly blank or not supplied
    Blank,
    /// No canonical value matched, raw value passed through
    Unmatched(RawValue),
}

impl<T> FieldOutcome<T> {
    pub fn is_matched(&self) -> bool {
        matches!(self, FieldOutcome::Matched(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, FieldOutcome::Blank)
    }

    /// Canonical value, if one matched
    pub fn matched(&self) -> Option<&T> {
        match self {
            FieldOutcome::Matched(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Clone + Into<RawValue>> FieldOutcome<T> {
    /// Flat value: canonical value, pass-through raw value, or `None` for blank
    pub fn value(&self) -> Option<RawValue> {
        match self {
            FieldOutcome::Matched(value) => Some(value.clone().into()),
            FieldOutcome::Blank => None,
            FieldOutcome::Unmatched(raw) => Some(raw.clone()),
        }
    }
}

impl<T: Serialize> Serialize for FieldOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldOutcome::Matched(value) => value.serialize(serializer),
            FieldOutcome::Blank => serializer.serialize_none(),
            FieldOutcome::Unmatched(raw) => raw.serialize(serializer),
        }
    }
}
