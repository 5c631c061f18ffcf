//! Raw Vehicle Input

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Literal value callers send to mark a field as explicitly empty
pub const BLANK_SENTINEL: &str = "blank";

/// A raw scalar exactly as the caller supplied it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    /// Whether this is the blank sentinel
    pub fn is_blank(&self) -> bool {
        matches!(self, RawValue::Text(text) if text == BLANK_SENTINEL)
    }

    /// Best-effort integer conversion.
    ///
    /// Text is read up to the first character that cannot continue a
    /// number, so `"2019 Focus"` is 2019 and `"Focus"` is 0. Floats are
    /// truncated toward zero.
    pub fn to_integer(&self) -> i64 {
        match self {
            RawValue::Integer(value) => *value,
            RawValue::Float(value) if value.is_finite() => value.trunc() as i64,
            RawValue::Float(_) => 0,
            RawValue::Text(text) => parse_leading_integer(text),
        }
    }

    /// Text used for containment matching; numbers match by their digits
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            RawValue::Text(text) => Cow::Borrowed(text),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Integer(value) => write!(f, "{value}"),
            RawValue::Float(value) => write!(f, "{value:?}"),
            RawValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Integer(value as i64)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Float(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

/// Leading-prefix integer parse, 0 when nothing numeric is found.
/// Underscores are accepted between digits; overflow saturates.
fn parse_leading_integer(text: &str) -> i64 {
    let mut chars = text
        .trim_start_matches(|c: char| c.is_ascii_whitespace())
        .chars()
        .peekable();

    let negative = match chars.peek() {
        Some('-') => {
            chars.next();
            true
        }
        Some('+') => {
            chars.next();
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    while let Some(&c) = chars.peek() {
        if let Some(digit) = c.to_digit(10) {
            chars.next();
            seen_digit = true;
            value = value.saturating_mul(10).saturating_add(digit as i64);
        } else if c == '_' && seen_digit {
            chars.next();
            // "1__9" and a trailing "_" stop the number
            match chars.peek() {
                Some(next) if next.is_ascii_digit() => {}
                _ => break,
            }
        } else {
            break;
        }
    }

    if negative {
        value.saturating_neg()
    } else {
        value
    }
}

/// Model part of a vehicle input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleModelInput {
    /// Raw model name, may carry the trim ("Focus ST")
    pub name: Option<RawValue>,
    /// Raw trim level
    pub trim: Option<RawValue>,
}

impl VehicleModelInput {
    pub fn new(name: Option<RawValue>, trim: Option<RawValue>) -> Self {
        Self { name, trim }
    }
}

/// Vehicle attributes for one normalization request.
///
/// `None` means the field was not supplied and is treated as blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleInput {
    pub year: Option<RawValue>,
    pub make: Option<RawValue>,
    pub model: VehicleModelInput,
}

impl VehicleInput {
    /// Build an input from the four raw attributes
    pub fn new(
        year: impl Into<RawValue>,
        make: impl Into<RawValue>,
        model: impl Into<RawValue>,
        trim: impl Into<RawValue>,
    ) -> Self {
        Self {
            year: Some(year.into()),
            make: Some(make.into()),
            model: VehicleModelInput::new(Some(model.into()), Some(trim.into())),
        }
    }
}

/// Flat record as received on the wire: `{year, make, model, trim}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleRecord {
    #[serde(default)]
    pub year: Option<RawValue>,
    #[serde(default)]
    pub make: Option<RawValue>,
    #[serde(default)]
    pub model: Option<RawValue>,
    #[serde(default)]
    pub trim: Option<RawValue>,
}

impl From<VehicleRecord> for VehicleInput {
    fn from(record: VehicleRecord) -> Self {
        Self {
            year: record.year,
            make: record.make,
            model: VehicleModelInput::new(record.model, record.trim),
        }
    }
}
