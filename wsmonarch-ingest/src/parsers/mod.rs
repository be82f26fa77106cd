//! Provider feed parsers plus the field decoders they share

pub mod activities;
pub mod balances;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

use wsmonarch_core::RecordError;

/// Split a JSON document into its top-level elements. Accepts a bare array
/// or an object wrapping the array under `key` (how some API dumps look).
pub(crate) fn json_elements(text: &str, key: &str) -> Result<Vec<Value>> {
    let doc: Value = serde_json::from_str(text).context("parse JSON document")?;
    match doc {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => match map.remove(key) {
            Some(Value::Array(items)) => Ok(items),
            Some(_) => bail!("`{}` is not a JSON array", key),
            None => bail!("expected a JSON array or an object with a `{}` array", key),
        },
        _ => bail!("expected a JSON array or an object with a `{}` array", key),
    }
}

/// Calendar date of a provider timestamp, taken in the timestamp's own offset.
pub(crate) fn parse_date(field: &'static str, s: &str) -> Result<NaiveDate, RecordError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(RecordError::MissingField(field));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| RecordError::invalid(field, s))
}

/// Decode a decimal that may arrive as a string or a JSON number.
/// `Ok(None)` means the field was null or an empty string.
pub(crate) fn parse_decimal(field: &'static str, value: &Value) -> Result<Option<Decimal>, RecordError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => decimal_from_str(s.trim())
            .map(Some)
            .ok_or_else(|| RecordError::invalid(field, s.as_str())),
        Value::Number(n) => {
            let text = n.to_string();
            decimal_from_str(&text)
                .map(Some)
                .ok_or_else(|| RecordError::invalid(field, text))
        }
        other => Err(RecordError::invalid(field, other.to_string())),
    }
}

fn decimal_from_str(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Required, non-blank text field
pub(crate) fn required_text(field: &'static str, value: Option<&str>) -> Result<String, RecordError> {
    match value.map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(RecordError::MissingField(field)),
    }
}

/// Optional text field; blank counts as absent
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
