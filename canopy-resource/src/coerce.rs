//! Scalar coercion rules.
//!
//! Numeric and boolean kinds are total: bad input degrades to zero or to
//! truthiness rather than erroring. Dates are the one kind that reports
//! malformed input. The asymmetry is deliberate legacy behavior carried
//! over from the upstream API and must not be "fixed" — callers depend on
//! binding staying total for numeric fields in sloppy payloads.

use crate::error::CoercionError;
use crate::value::PropertyValue;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primitive coercion kinds a schema can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coercion {
    String,
    Integer,
    Float,
    Boolean,
    Date,
}

/// Applies one coercion kind to one raw scalar.
///
/// Pure; never touches the input. Only [`Coercion::Date`] can fail.
pub fn coerce(kind: Coercion, raw: &Value) -> Result<PropertyValue, CoercionError> {
    match kind {
        Coercion::String => Ok(coerce_string(raw)),
        Coercion::Integer => Ok(PropertyValue::Integer(coerce_integer(raw))),
        Coercion::Float => Ok(PropertyValue::Float(coerce_float(raw))),
        Coercion::Boolean => Ok(PropertyValue::Bool(coerce_boolean(raw))),
        Coercion::Date => coerce_date(raw),
    }
}

fn coerce_string(raw: &Value) -> PropertyValue {
    match raw {
        Value::Null => PropertyValue::Nil,
        Value::String(text) => PropertyValue::Text(text.clone()),
        other => PropertyValue::Text(other.to_string()),
    }
}

fn coerce_integer(raw: &Value) -> i64 {
    match raw {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64))
            .unwrap_or(0),
        Value::String(text) => leading_i64(text),
        _ => 0,
    }
}

fn coerce_float(raw: &Value) -> f64 {
    match raw {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => leading_f64(text),
        _ => 0.0,
    }
}

fn coerce_boolean(raw: &Value) -> bool {
    !matches!(raw, Value::Null | Value::Bool(false))
}

fn coerce_date(raw: &Value) -> Result<PropertyValue, CoercionError> {
    match raw {
        Value::Null => Ok(PropertyValue::Nil),
        Value::String(text) => parse_date(text).map(PropertyValue::Date),
        other => Err(CoercionError::MalformedDate {
            value: other.to_string(),
        }),
    }
}

/// Parses an ISO-8601-flexible date or datetime string.
///
/// Accepts full RFC 3339 timestamps, naive datetimes (assumed UTC), and
/// bare calendar dates (midnight UTC).
pub(crate) fn parse_date(text: &str) -> Result<DateTime<FixedOffset>, CoercionError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset());
    }
    Err(CoercionError::MalformedDate {
        value: text.to_string(),
    })
}

/// Optional sign plus leading digits; everything after the first
/// non-digit is ignored, and no digits at all parses as 0.
fn leading_i64(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1_i64, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return 0;
    }
    sign * digits.parse::<i64>().unwrap_or(i64::MAX)
}

/// The longest numeric prefix, or 0.0 when none exists.
fn leading_f64(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let mut end = 0;
    for (index, character) in trimmed.char_indices() {
        let candidate = &trimmed[..index + character.len_utf8()];
        if candidate.bytes().any(|byte| byte.is_ascii_digit()) && candidate.parse::<f64>().is_ok() {
            end = candidate.len();
        }
    }
    if end == 0 {
        0.0
    } else {
        trimmed[..end].parse().unwrap_or(0.0)
    }
}
