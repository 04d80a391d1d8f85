//! Schema registry with lazy effective-schema computation.

use crate::coerce::Coercion;
use crate::error::{ResourceError, ResourceResult};
use crate::schema::{Descriptor, EffectiveSchema, TypeSchema};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex};

/// Process-wide store of type declarations, shared as `Arc<SchemaRegistry>`.
///
/// Declarations accumulate per type; the merged (effective) schema of a
/// type is computed on first use and cached. The cache is the one piece of
/// shared mutable state in the engine, so every access serializes through
/// one mutex — concurrent first-use from two threads computes once.
pub struct SchemaRegistry {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    types: HashMap<String, TypeSchema>,
    cache: HashMap<String, Arc<EffectiveSchema>>,
}

impl SchemaRegistry {
    /// A registry pre-seeded with the built-in base types every payload
    /// shares: `"Resource"` (the common `sys` declarations) and `"Link"`.
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.declare(
            "Resource",
            TypeSchema::new()
                .sys_property("id", Descriptor::primitive(Coercion::String))
                .sys_property("type", Descriptor::primitive(Coercion::String))
                .sys_property("linkType", Descriptor::primitive(Coercion::String))
                .sys_property("version", Descriptor::primitive(Coercion::Integer))
                .sys_property("revision", Descriptor::primitive(Coercion::Integer))
                .sys_property("createdAt", Descriptor::primitive(Coercion::Date))
                .sys_property("updatedAt", Descriptor::primitive(Coercion::Date))
                .sys_property("locale", Descriptor::primitive(Coercion::String))
                .sys_property("space", Descriptor::nested("Link"))
                .sys_property("contentType", Descriptor::nested("Link")),
        );
        registry.declare("Link", TypeSchema::extending("Resource"));
        registry
    }

    /// A registry with nothing declared.
    pub fn empty() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Registers (or extends) a type's own declarations.
    ///
    /// Declaring never mutates other types' tables. Any cached effective
    /// schemas are invalidated so later first-use sees the new state,
    /// keeping the result independent of declaration order across a
    /// hierarchy declared top-down.
    pub fn declare(&self, type_name: impl Into<String>, schema: TypeSchema) {
        let mut inner = self.inner.lock().unwrap();
        match inner.types.entry(type_name.into()) {
            Entry::Occupied(mut entry) => entry.get_mut().merge(schema),
            Entry::Vacant(entry) => {
                entry.insert(schema);
            }
        }
        inner.cache.clear();
    }

    /// Whether a type has been declared.
    pub fn contains(&self, type_name: &str) -> bool {
        self.inner.lock().unwrap().types.contains_key(type_name)
    }

    /// The merged schema for a type: its own declarations folded over its
    /// base chain, own entries winning per key. Computed once, then cached.
    pub fn effective(&self, type_name: &str) -> ResourceResult<Arc<EffectiveSchema>> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(cached) = inner.cache.get(type_name) {
            return Ok(Arc::clone(cached));
        }
        let computed = Arc::new(compute(&inner.types, type_name)?);
        inner
            .cache
            .insert(type_name.to_string(), Arc::clone(&computed));
        Ok(computed)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock().unwrap();
        let mut names: Vec<&String> = inner.types.keys().collect();
        names.sort();
        f.debug_struct("SchemaRegistry").field("types", &names).finish()
    }
}

fn compute(types: &HashMap<String, TypeSchema>, type_name: &str) -> ResourceResult<EffectiveSchema> {
    let mut chain: Vec<&TypeSchema> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut current = Some(type_name);

    while let Some(name) = current {
        if !seen.insert(name) {
            return Err(ResourceError::SchemaCycle(name.to_string()));
        }
        let schema = types
            .get(name)
            .ok_or_else(|| ResourceError::UnknownType(name.to_string()))?;
        chain.push(schema);
        current = schema.base.as_deref();
    }

    // base-first fold so derived declarations override per key
    let mut effective = EffectiveSchema::default();
    for schema in chain.into_iter().rev() {
        effective.properties.extend(schema.properties.clone());
        effective.sys.extend(schema.sys.clone());
        effective.fields.extend(schema.fields.clone());
    }
    Ok(effective)
}
