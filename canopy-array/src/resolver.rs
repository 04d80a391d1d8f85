//! Item type resolution for heterogeneous arrays.

use std::collections::HashMap;

/// Maps a wire discriminator (an item's `sys.type`) to a registered
/// schema type name.
///
/// Returning `None` is not an error — the array falls back to the generic
/// base resource for that item.
pub trait ItemTypeResolver: Send + Sync {
    fn resolve(&self, discriminator: &str) -> Option<&str>;
}

/// Table-backed resolver.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    entries: HashMap<String, String>,
}

impl MapResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form: maps a discriminator to a schema type name.
    pub fn with(mut self, discriminator: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.insert(discriminator, type_name);
        self
    }

    pub fn insert(&mut self, discriminator: impl Into<String>, type_name: impl Into<String>) {
        self.entries.insert(discriminator.into(), type_name.into());
    }
}

impl ItemTypeResolver for MapResolver {
    fn resolve(&self, discriminator: &str) -> Option<&str> {
        self.entries.get(discriminator).map(String::as_str)
    }
}

/// Resolves nothing; every item binds as the generic base resource.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericResolver;

impl ItemTypeResolver for GenericResolver {
    fn resolve(&self, _discriminator: &str) -> Option<&str> {
        None
    }
}
