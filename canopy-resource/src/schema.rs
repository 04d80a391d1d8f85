//! Declarative property schemas.
//!
//! A resource type declares, per namespace, which wire keys it expects and
//! how each raw value is transformed. Types compose explicitly: a schema
//! names its base and the registry folds the chain into an effective
//! schema, own declarations winning per key.

use crate::coerce::Coercion;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How a declared property's raw value is transformed during binding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "arg", rename_all = "snake_case")]
pub enum Descriptor {
    /// Raw value passes through untransformed.
    #[default]
    None,
    /// Scalar coercion, applied element-wise to arrays.
    Primitive(Coercion),
    /// Instantiate a sub-resource of the named registered type.
    Nested(String),
}

impl Descriptor {
    pub fn primitive(kind: Coercion) -> Self {
        Descriptor::Primitive(kind)
    }

    pub fn nested(type_name: impl Into<String>) -> Self {
        Descriptor::Nested(type_name.into())
    }
}

/// A resource type's own declarations: one table per namespace.
///
/// Declarations never touch the base type's tables; inheritance happens
/// only when the registry computes the effective schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeSchema {
    /// Name of the base type whose declarations this type inherits.
    pub base: Option<String>,
    /// Generic top-level properties.
    pub properties: BTreeMap<String, Descriptor>,
    /// System/meta properties bound from the payload's `sys` object.
    pub sys: BTreeMap<String, Descriptor>,
    /// Content fields bound from the payload's `fields` object.
    pub fields: BTreeMap<String, Descriptor>,
}

impl TypeSchema {
    /// A schema with no base and no declarations.
    pub fn new() -> Self {
        Self::default()
    }

    /// A schema inheriting everything the named base type declares.
    pub fn extending(base: impl Into<String>) -> Self {
        Self {
            base: Some(base.into()),
            ..Self::default()
        }
    }

    /// Declares a generic property under its wire name.
    pub fn property(mut self, name: impl Into<String>, descriptor: Descriptor) -> Self {
        self.properties.insert(name.into(), descriptor);
        self
    }

    /// Declares a system property under its wire name.
    pub fn sys_property(mut self, name: impl Into<String>, descriptor: Descriptor) -> Self {
        self.sys.insert(name.into(), descriptor);
        self
    }

    /// Declares a content field under its wire name.
    pub fn field(mut self, name: impl Into<String>, descriptor: Descriptor) -> Self {
        self.fields.insert(name.into(), descriptor);
        self
    }

    /// Folds later declarations for the same type into this one.
    pub(crate) fn merge(&mut self, other: TypeSchema) {
        if other.base.is_some() {
            self.base = other.base;
        }
        self.properties.extend(other.properties);
        self.sys.extend(other.sys);
        self.fields.extend(other.fields);
    }
}

/// Fully merged view of a type's declarations, including everything
/// inherited from its base chain.
#[derive(Debug, Clone, Default)]
pub struct EffectiveSchema {
    pub properties: BTreeMap<String, Descriptor>,
    pub sys: BTreeMap<String, Descriptor>,
    pub fields: BTreeMap<String, Descriptor>,
}

impl EffectiveSchema {
    /// Whether any type in the chain declared a system namespace.
    pub fn declares_sys(&self) -> bool {
        !self.sys.is_empty()
    }

    /// Whether any type in the chain declared a fields namespace.
    pub fn declares_fields(&self) -> bool {
        !self.fields.is_empty()
    }
}
