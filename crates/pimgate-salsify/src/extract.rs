//! Fallback key-path extraction and list normalization for product records.
//!
//! Block lists live under several historical property spellings depending on
//! how an org's data model evolved, so each field carries an ordered list of
//! candidate key paths. The first path that fully resolves wins, and later
//! candidates are never consulted, even when the winning value is JSON
//! `null` (found-but-null normalizes to an empty list).

use serde_json::Value;

/// Candidate key paths for the blocked-channels field, in priority order:
/// the primary underscore spelling, the lower-case spelling, the
/// human-readable spelling, then the derived-properties namespace.
pub const BLOCKED_CHANNELS_PATHS: &[&[&str]] = &[
    &["properties", "Blocked_Channels"],
    &["properties", "blocked_channels"],
    &["properties", "Blocked Channels"],
    &["derived_properties", "Blocked_Channels"],
];

/// Candidate key paths for the blocked-countries field, in priority order.
pub const BLOCKED_COUNTRIES_PATHS: &[&[&str]] = &[
    &["properties", "Blocked_countries"],
    &["properties", "blocked_countries"],
    &["properties", "Blocked countries"],
    &["derived_properties", "Blocked_countries"],
];

/// Result of extracting one field from a product record: the raw value the
/// winning candidate path resolved to (kept for the diagnostic echo in the
/// proxy response) and its normalized list form.
#[derive(Debug, Clone)]
pub struct FieldExtraction {
    pub raw: Option<Value>,
    pub normalized: Value,
}

/// Returns the value at the first candidate path that fully resolves.
///
/// A path resolves when every key lookup along it is defined; the final
/// value may still be JSON `null`, which counts as found and stops the
/// search. Returns `None` when no candidate resolves.
#[must_use]
pub fn resolve_first<'a>(record: &'a Value, candidates: &[&[&str]]) -> Option<&'a Value> {
    candidates
        .iter()
        .find_map(|path| resolve_path(record, path))
}

/// Walks one key path through the record, aborting at the first undefined
/// lookup (missing key, or an intermediate value that is not an object).
fn resolve_path<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = record;
    for key in path {
        current = current.get(*key)?;
    }
    Some(current)
}

/// Normalizes a resolved field value into an ordered list of strings.
///
/// Arrays pass through unchanged (element types are not validated). Strings
/// are split on runs of commas or semicolons, with each piece trimmed and
/// empty pieces dropped. `null` and not-found both become an empty list.
/// Any other value passes through as-is.
#[must_use]
pub fn normalize_list(value: Option<&Value>) -> Value {
    match value {
        None | Some(Value::Null) => Value::Array(Vec::new()),
        Some(Value::String(s)) => Value::Array(
            s.split([',', ';'])
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .map(|piece| Value::String(piece.to_owned()))
                .collect(),
        ),
        Some(other) => other.clone(),
    }
}

/// Runs the full fallback extraction for one field: first-match resolution
/// followed by list normalization.
#[must_use]
pub fn extract_field(record: &Value, candidates: &[&[&str]]) -> FieldExtraction {
    let raw = resolve_first(record, candidates);
    FieldExtraction {
        normalized: normalize_list(raw),
        raw: raw.cloned(),
    }
}
