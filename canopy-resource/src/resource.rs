//! Bound resource instances.

use crate::binder::{self, BindContext};
use crate::error::ResourceResult;
use crate::name::camelize;
use crate::registry::SchemaRegistry;
use crate::value::{Properties, PropertyValue};
use canopy_client::Client;
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Locale handling for the fields namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocaleMode {
    /// Field values arrive already flattened to the active locale.
    #[default]
    Flattened,
    /// Field values arrive keyed per locale, as sync payloads deliver them.
    Nested,
}

/// Options controlling how a payload is bound.
#[derive(Debug, Clone)]
pub struct BindOptions {
    pub locale_mode: LocaleMode,
    /// Locale that flattened fields are filed under.
    pub default_locale: String,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            locale_mode: LocaleMode::Flattened,
            default_locale: "en-US".to_string(),
        }
    }
}

impl BindOptions {
    /// Options matching a client's configuration.
    pub fn for_client(client: &Client) -> Self {
        Self {
            locale_mode: LocaleMode::Flattened,
            default_locale: client.default_locale().to_string(),
        }
    }

    /// Same options with sync-style nested locale fields.
    pub fn nested_locales(mut self) -> Self {
        self.locale_mode = LocaleMode::Nested;
        self
    }
}

/// The identity triple a refetch capability is keyed by.
///
/// `id` always comes from `sys.id`; the space and content-type components
/// are present when the payload links them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdentity {
    pub space_id: Option<String>,
    pub content_type_id: Option<String>,
    pub id: String,
}

/// A typed view over one raw payload snapshot.
///
/// Created only by binding; mutated only by [`reload`](Resource::reload)
/// (full replace) or local [`set`](Resource::set) edits that persist
/// nowhere until some outer save operation ships them.
#[derive(Clone)]
pub struct Resource {
    type_name: String,
    properties: Properties,
    sys: Option<Properties>,
    fields: Option<BTreeMap<String, Properties>>,
    raw: Value,
    client: Option<Client>,
    registry: Arc<SchemaRegistry>,
    options: BindOptions,
}

impl Resource {
    /// Binds a raw payload as the named registered type, with options
    /// taken from the client (or defaults when detached).
    pub fn from_payload(
        raw: Value,
        type_name: &str,
        registry: &Arc<SchemaRegistry>,
        client: Option<Client>,
    ) -> ResourceResult<Self> {
        let options = client
            .as_ref()
            .map(BindOptions::for_client)
            .unwrap_or_default();
        Self::from_payload_with(raw, type_name, registry, client, options)
    }

    /// Binds a raw payload with explicit options.
    pub fn from_payload_with(
        raw: Value,
        type_name: &str,
        registry: &Arc<SchemaRegistry>,
        client: Option<Client>,
        options: BindOptions,
    ) -> ResourceResult<Self> {
        let schema = registry.effective(type_name)?;
        let ctx = BindContext {
            registry,
            client: client.as_ref(),
            options: &options,
        };

        let properties = binder::bind(Some(&raw), Some(&schema.properties), &ctx)?;
        let sys = if schema.declares_sys() {
            Some(binder::bind(raw.get("sys"), Some(&schema.sys), &ctx)?)
        } else {
            None
        };
        let fields = if schema.declares_fields() {
            Some(binder::bind_fields(raw.get("fields"), &schema.fields, &ctx)?)
        } else {
            None
        };

        Ok(Self {
            type_name: type_name.to_string(),
            properties,
            sys,
            fields,
            raw,
            client,
            registry: Arc::clone(registry),
            options,
        })
    }

    /// The registered type this payload was bound as.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The bound generic properties.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// The untransformed payload this resource was bound from.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// The shared client this resource was bound through, if any.
    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    /// The bound system properties; `None` unless a sys namespace is
    /// declared for this type.
    pub fn sys(&self) -> Option<&Properties> {
        self.sys.as_ref()
    }

    /// The bound content fields for the active locale; `None` unless a
    /// fields namespace is declared.
    pub fn fields(&self) -> Option<&Properties> {
        self.fields_for(&self.options.default_locale)
    }

    /// The bound content fields for a specific locale.
    pub fn fields_for(&self, locale: &str) -> Option<&Properties> {
        self.fields.as_ref()?.get(locale)
    }

    /// Locales the fields namespace was bound for.
    pub fn locales(&self) -> Vec<&str> {
        self.fields
            .as_ref()
            .map(|fields| fields.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// False for scalar resources; the array wrapper answers true.
    pub fn is_array(&self) -> bool {
        false
    }

    /// Whether fields were bound from sync-style per-locale payloads.
    pub fn nested_locale_fields(&self) -> bool {
        self.options.locale_mode == LocaleMode::Nested
    }

    /// The locale flattened fields are filed under.
    pub fn default_locale(&self) -> &str {
        &self.options.default_locale
    }

    /// Reads a declared property by wire name or snake_case accessor name.
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        lookup(&self.properties, name)
    }

    /// Writes a property locally. Nothing is persisted until an outer
    /// save ships the resource back.
    pub fn set(&mut self, name: &str, value: PropertyValue) {
        let key = if self.properties.contains_key(name) {
            name.to_string()
        } else {
            let wire = camelize(name);
            if self.properties.contains_key(&wire) {
                wire
            } else {
                name.to_string()
            }
        };
        self.properties.insert(key, value);
    }

    /// Reads a system property by wire name or snake_case accessor name.
    pub fn sys_get(&self, name: &str) -> Option<&PropertyValue> {
        lookup(self.sys.as_ref()?, name)
    }

    /// Reads an active-locale content field.
    pub fn field(&self, name: &str) -> Option<&PropertyValue> {
        lookup(self.fields()?, name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(PropertyValue::as_str)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(PropertyValue::as_i64)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(PropertyValue::as_f64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(PropertyValue::as_bool)
    }

    pub fn get_date(&self, name: &str) -> Option<DateTime<FixedOffset>> {
        self.get(name).and_then(PropertyValue::as_date)
    }

    /// The identity triple used to refetch this resource, when the
    /// payload carries one.
    pub fn identity(&self) -> Option<ResourceIdentity> {
        let id = self.sys_get("id")?.as_str()?.to_string();
        let space_id = self
            .raw
            .pointer("/sys/space/sys/id")
            .and_then(Value::as_str)
            .map(String::from);
        let content_type_id = self
            .raw
            .pointer("/sys/contentType/sys/id")
            .and_then(Value::as_str)
            .map(String::from);
        Some(ResourceIdentity {
            space_id,
            content_type_id,
            id,
        })
    }

    /// Reassembles the bound state under its wire keys.
    pub fn to_payload(&self) -> Value {
        let mut map = Map::new();
        for (name, value) in &self.properties {
            map.insert(name.clone(), value.to_json());
        }
        if let Some(sys) = &self.sys {
            map.insert("sys".to_string(), properties_to_json(sys));
        }
        if let Some(fields) = &self.fields {
            map.insert("fields".to_string(), self.fields_to_json(fields));
        }
        Value::Object(map)
    }

    fn fields_to_json(&self, fields: &BTreeMap<String, Properties>) -> Value {
        match self.options.locale_mode {
            LocaleMode::Flattened => fields
                .get(&self.options.default_locale)
                .map(properties_to_json)
                .unwrap_or_else(|| Value::Object(Map::new())),
            LocaleMode::Nested => {
                // invert {locale: {field: v}} back to the wire's {field: {locale: v}}
                let mut by_field = Map::new();
                for (locale, properties) in fields {
                    for (name, value) in properties {
                        let slot = by_field
                            .entry(name.clone())
                            .or_insert_with(|| Value::Object(Map::new()));
                        if let Some(locales) = slot.as_object_mut() {
                            locales.insert(locale.clone(), value.to_json());
                        }
                    }
                }
                Value::Object(by_field)
            }
        }
    }

    pub(crate) fn registry(&self) -> &Arc<SchemaRegistry> {
        &self.registry
    }

    pub(crate) fn bind_options(&self) -> &BindOptions {
        &self.options
    }

    /// Swaps in freshly bound state, keeping this instance's identity.
    pub(crate) fn replace_state(&mut self, fresh: Resource) {
        self.properties = fresh.properties;
        self.sys = fresh.sys;
        self.fields = fresh.fields;
        self.raw = fresh.raw;
    }
}

fn lookup<'a>(map: &'a Properties, name: &str) -> Option<&'a PropertyValue> {
    if let Some(value) = map.get(name) {
        return Some(value);
    }
    map.get(&camelize(name))
}

fn properties_to_json(properties: &Properties) -> Value {
    let mut map = Map::new();
    for (name, value) in properties {
        map.insert(name.clone(), value.to_json());
    }
    Value::Object(map)
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Resource");
        out.field("type_name", &self.type_name);
        if !self.properties.is_empty() {
            out.field("properties", &self.properties);
        }
        if let Some(sys) = &self.sys {
            out.field("sys", sys);
        }
        out.finish_non_exhaustive()
    }
}

impl PartialEq for Resource {
    /// Data-only equality: the shared client and registry handles are not
    /// part of a resource's bound state.
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
            && self.properties == other.properties
            && self.sys == other.sys
            && self.fields == other.fields
            && self.raw == other.raw
    }
}
