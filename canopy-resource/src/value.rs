//! Typed property values produced by binding.

use crate::resource::Resource;
use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use std::collections::BTreeMap;

/// A bound namespace: declared wire name → typed value.
pub type Properties = BTreeMap<String, PropertyValue>;

/// A property value after coercion.
///
/// Raw JSON scalars are lifted into this enum by the coercion declared in
/// the owning type's schema. Values with no declared coercion stay as
/// [`Json`](PropertyValue::Json) pass-throughs.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Absent key or JSON null.
    Nil,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(DateTime<FixedOffset>),
    /// Uncoerced pass-through of the raw JSON value.
    Json(Value),
    /// Element-wise coerced array, payload order preserved.
    List(Vec<PropertyValue>),
    /// A sub-resource instantiated from a structured sub-object.
    Resource(Box<Resource>),
}

impl PropertyValue {
    pub fn is_nil(&self) -> bool {
        matches!(self, PropertyValue::Nil)
    }

    /// The text content, for coerced strings and raw JSON strings.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            PropertyValue::Json(Value::String(text)) => Some(text),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// The numeric content, widening coerced integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(value) => Some(*value),
            PropertyValue::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            PropertyValue::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&Resource> {
        match self {
            PropertyValue::Resource(resource) => Some(resource),
            _ => None,
        }
    }

    /// Serializes back to the wire JSON form.
    ///
    /// Dates render as RFC 3339; non-finite floats have no JSON form and
    /// become null.
    pub fn to_json(&self) -> Value {
        match self {
            PropertyValue::Nil => Value::Null,
            PropertyValue::Text(text) => Value::String(text.clone()),
            PropertyValue::Integer(value) => Value::from(*value),
            PropertyValue::Float(value) => serde_json::Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            PropertyValue::Bool(value) => Value::Bool(*value),
            PropertyValue::Date(value) => Value::String(value.to_rfc3339()),
            PropertyValue::Json(value) => value.clone(),
            PropertyValue::List(items) => {
                Value::Array(items.iter().map(PropertyValue::to_json).collect())
            }
            PropertyValue::Resource(resource) => resource.to_payload(),
        }
    }
}
