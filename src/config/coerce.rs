//! Primitive coercion rules for raw configuration values.
//!
//! Environment variables are plain strings; these functions turn them into
//! the typed leaves of the record. Integer failures never abort loading:
//! they collapse to `None` and downstream consumers decide what to do.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use super::settings::DelInstance;

/// Strict boolean: only the exact literal `"true"` is true.
pub fn flag(raw: Option<&str>) -> bool {
    raw == Some("true")
}

/// Base-10 integer parse of the leading `[+-]?digits` prefix.
///
/// Leading whitespace is skipped and anything after the digits is ignored,
/// so `"30m"` reads as 30 and `"3.5"` as 3. `None` when there is no digit
/// or the value overflows.
pub fn int(raw: Option<&str>) -> Option<i64> {
    let value = raw?.trim_start();
    let sign = usize::from(value.starts_with(&['+', '-'][..]));
    let digits = value[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    value[..sign + digits].parse().ok()
}

/// Integer parse with a fallback for missing or non-numeric input.
pub fn int_or(raw: Option<&str>, fallback: i64) -> i64 {
    int(raw).unwrap_or(fallback)
}

/// Comma-separated list, kept in order and unmodified.
///
/// Returns `None` for an empty value; callers treat that as fatal.
pub fn list(raw: &str) -> Option<Vec<String>> {
    if raw.is_empty() {
        return None;
    }
    Some(raw.split(',').map(str::to_string).collect())
}

/// `"true"`/`"false"` become a flag, anything else is read as minutes.
pub fn del_instance(raw: Option<&str>) -> Option<DelInstance> {
    match raw {
        Some("true") => Some(DelInstance::Flag(true)),
        Some("false") => Some(DelInstance::Flag(false)),
        other => int(other).map(DelInstance::Minutes),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Bool(bool),
    Int(i64),
    Text(String),
    Other(IgnoredAny),
}

/// Deserialize an optional integer, mapping anything unusable to `None`.
///
/// Accepts numbers and numeric strings; out-of-range values for `T`,
/// floats, and other shapes become the `None` sentinel.
pub fn lenient_int<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let value = match RawScalar::deserialize(deserializer)? {
        RawScalar::Int(n) => Some(n),
        RawScalar::Text(text) => int(Some(&text)),
        RawScalar::Bool(_) | RawScalar::Other(_) => None,
    };
    Ok(value.and_then(|n| T::try_from(n).ok()))
}

/// Deserialize the dual-typed deletion policy.
pub fn lenient_del_instance<'de, D>(deserializer: D) -> Result<Option<DelInstance>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawScalar::deserialize(deserializer)? {
        RawScalar::Bool(value) => Some(DelInstance::Flag(value)),
        RawScalar::Int(minutes) => Some(DelInstance::Minutes(minutes)),
        RawScalar::Text(text) => del_instance(Some(&text)),
        RawScalar::Other(_) => None,
    })
}
