//! Per-field matching rules
//!
//! Every matcher short-circuits on a blank value, otherwise tries to map the
//! raw value to a canonical one and passes the raw value through when
//! nothing matches. Matching never fails.

use crate::config::YearBounds;
use crate::input::RawValue;
use crate::outcome::FieldOutcome;
use tracing::trace;

/// Which side of the comparison must contain the other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Containment {
    /// Canonical value contains the raw input (makes: "Ford" for "for")
    CanonicalContainsRaw,
    /// Raw input contains the canonical value (models: "Focus" in "2023 Focus SE")
    RawContainsCanonical,
}

/// Case-insensitive literal substring test
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// First canonical value related to `subject` by `containment`, in list order
pub fn find_canonical<'a>(
    canonical: &'a [String],
    subject: &str,
    containment: Containment,
) -> Option<&'a String> {
    canonical.iter().find(|candidate| match containment {
        Containment::CanonicalContainsRaw => contains_ignore_case(candidate, subject),
        Containment::RawContainsCanonical => contains_ignore_case(subject, candidate),
    })
}

/// Year rule: accepted integer year or the raw value unchanged
pub fn match_year(
    raw: Option<&RawValue>,
    bounds: &YearBounds,
    reference_year: i64,
) -> FieldOutcome<i64> {
    let raw = match raw {
        Some(raw) if !raw.is_blank() => raw,
        _ => return FieldOutcome::Blank,
    };

    let year = raw.to_integer();
    if bounds.accepts(year, reference_year) {
        FieldOutcome::Matched(year)
    } else {
        trace!(raw = %raw, year, reference_year, "year outside accepted window");
        FieldOutcome::Unmatched(raw.clone())
    }
}

/// Make and model rule against one reference list.
/// Numbers are matched by their text and passed through as numbers.
pub fn match_text(
    raw: Option<&RawValue>,
    canonical: &[String],
    containment: Containment,
) -> FieldOutcome<String> {
    let raw = match raw {
        Some(raw) if !raw.is_blank() => raw,
        _ => return FieldOutcome::Blank,
    };

    match find_canonical(canonical, &raw.as_text(), containment) {
        Some(value) => FieldOutcome::Matched(value.clone()),
        None => FieldOutcome::Unmatched(raw.clone()),
    }
}

/// Make: first maker whose name contains the raw make
pub fn match_make(raw: Option<&RawValue>, makers: &[String]) -> FieldOutcome<String> {
    match_text(raw, makers, Containment::CanonicalContainsRaw)
}

/// Model: first model whose name appears in the raw model
pub fn match_model(raw: Option<&RawValue>, models: &[String]) -> FieldOutcome<String> {
    match_text(raw, models, Containment::RawContainsCanonical)
}

/// Trim: like model, but an empty trim is looked up in the raw model name.
/// Falls back to the raw trim, never to the model name.
pub fn match_trim(
    raw_trim: Option<&RawValue>,
    raw_model_name: Option<&RawValue>,
    trims: &[String],
) -> FieldOutcome<String> {
    let raw_trim = match raw_trim {
        Some(raw) if !raw.is_blank() => raw,
        _ => return FieldOutcome::Blank,
    };

    let trim_text = raw_trim.as_text();
    let subject = if trim_text.is_empty() {
        raw_model_name.map(RawValue::as_text)
    } else {
        Some(trim_text)
    };

    let found = subject
        .and_then(|subject| find_canonical(trims, &subject, Containment::RawContainsCanonical));
    match found {
        Some(value) => FieldOutcome::Matched(value.clone()),
        None => FieldOutcome::Unmatched(raw_trim.clone()),
    }
}
