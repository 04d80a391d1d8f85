//! Payload extraction — turns raw JSON into typed property maps.
//!
//! The binder never mutates the payload it reads; every bound map is
//! freshly allocated. A missing declared key binds to `Nil` — sparse
//! server responses are normal, not an error.

use crate::error::ResourceResult;
use crate::registry::SchemaRegistry;
use crate::resource::{BindOptions, LocaleMode, Resource};
use crate::schema::Descriptor;
use crate::coerce;
use crate::value::{Properties, PropertyValue};
use canopy_client::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Everything a nested bind needs threaded through unchanged.
pub(crate) struct BindContext<'a> {
    pub registry: &'a Arc<SchemaRegistry>,
    pub client: Option<&'a Client>,
    pub options: &'a BindOptions,
}

/// Extracts one namespace from a raw payload.
///
/// With a schema table, the declared keys drive extraction; when the
/// payload itself is a JSON array, every declared key binds the whole
/// array positionally (array-shaped nested resources). With no table the
/// payload's own keys pass through uncoerced — used for structural maps
/// that carry no declarations.
pub(crate) fn bind(
    raw: Option<&Value>,
    table: Option<&BTreeMap<String, Descriptor>>,
    ctx: &BindContext<'_>,
) -> ResourceResult<Properties> {
    let Some(raw) = raw.filter(|value| !value.is_null()) else {
        return Ok(Properties::new());
    };

    let mut out = Properties::new();
    match table {
        Some(table) => {
            for (name, descriptor) in table {
                let value = if raw.is_array() {
                    raw
                } else {
                    raw.get(name).unwrap_or(&Value::Null)
                };
                out.insert(name.clone(), bind_value(value, descriptor, ctx)?);
            }
        }
        None => {
            if let Some(map) = raw.as_object() {
                for (name, value) in map {
                    out.insert(name.clone(), untyped_value(value));
                }
            }
        }
    }
    Ok(out)
}

/// Binds a payload with no schema: its own keys pass through uncoerced.
pub fn bind_untyped(raw: Option<&Value>) -> Properties {
    let mut out = Properties::new();
    if let Some(map) = raw.and_then(Value::as_object) {
        for (name, value) in map {
            out.insert(name.clone(), untyped_value(value));
        }
    }
    out
}

/// Binds the fields namespace into per-locale maps.
///
/// Flattened payloads carry field values directly and land under the
/// active locale. Sync-style payloads nest a `{locale: value}` map per
/// field; those are regrouped per locale and each locale bound on its own.
pub(crate) fn bind_fields(
    raw: Option<&Value>,
    table: &BTreeMap<String, Descriptor>,
    ctx: &BindContext<'_>,
) -> ResourceResult<BTreeMap<String, Properties>> {
    let mut by_locale = BTreeMap::new();
    match ctx.options.locale_mode {
        LocaleMode::Flattened => {
            by_locale.insert(
                ctx.options.default_locale.clone(),
                bind(raw, Some(table), ctx)?,
            );
        }
        LocaleMode::Nested => {
            let Some(map) = raw.and_then(Value::as_object) else {
                return Ok(by_locale);
            };
            let mut per_locale: BTreeMap<String, serde_json::Map<String, Value>> = BTreeMap::new();
            for (field_name, locales) in map {
                if let Some(locales) = locales.as_object() {
                    for (locale, value) in locales {
                        per_locale
                            .entry(locale.clone())
                            .or_default()
                            .insert(field_name.clone(), value.clone());
                    }
                }
            }
            for (locale, fields) in per_locale {
                by_locale.insert(locale, bind(Some(&Value::Object(fields)), Some(table), ctx)?);
            }
        }
    }
    Ok(by_locale)
}

/// Scalar-vs-array split: arrays coerce element-wise, preserving order
/// and length.
fn bind_value(
    raw: &Value,
    descriptor: &Descriptor,
    ctx: &BindContext<'_>,
) -> ResourceResult<PropertyValue> {
    if let Value::Array(elements) = raw {
        let items = elements
            .iter()
            .map(|element| bind_scalar(element, descriptor, ctx))
            .collect::<ResourceResult<Vec<_>>>()?;
        return Ok(PropertyValue::List(items));
    }
    bind_scalar(raw, descriptor, ctx)
}

fn bind_scalar(
    raw: &Value,
    descriptor: &Descriptor,
    ctx: &BindContext<'_>,
) -> ResourceResult<PropertyValue> {
    match descriptor {
        Descriptor::None => Ok(untyped_scalar(raw)),
        Descriptor::Primitive(kind) => Ok(coerce::coerce(*kind, raw)?),
        Descriptor::Nested(type_name) => {
            let nested = Resource::from_payload_with(
                raw.clone(),
                type_name,
                ctx.registry,
                ctx.client.cloned(),
                ctx.options.clone(),
            )?;
            Ok(PropertyValue::Resource(Box::new(nested)))
        }
    }
}

fn untyped_value(raw: &Value) -> PropertyValue {
    match raw {
        Value::Array(elements) => {
            PropertyValue::List(elements.iter().map(untyped_scalar).collect())
        }
        other => untyped_scalar(other),
    }
}

fn untyped_scalar(raw: &Value) -> PropertyValue {
    match raw {
        Value::Null => PropertyValue::Nil,
        other => PropertyValue::Json(other.clone()),
    }
}
