//! Tolerant parsing for server timestamps.
//!
//! The members API sends naive ISO timestamps (`2024-03-01T10:15:00.123456`).
//! RFC 3339 and RFC 1123 forms are accepted too and normalized to UTC.
//! Anything unrecognized becomes `None` and the surrounding record still
//! decodes.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a timestamp in any accepted form.
#[must_use]
pub fn parse(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .or_else(|_| DateTime::parse_from_rfc2822(value))
                .ok()
                .map(|parsed| parsed.naive_utc())
        })
}

/// `deserialize_with` helper for optional timestamp fields.
///
/// # Errors
///
/// Fails only when the value is neither a string nor null.
pub fn lenient<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse))
}
