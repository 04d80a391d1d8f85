//! Resource binding engine for the Canopy management API.
//!
//! Turns raw, loosely-typed JSON payloads into strongly-typed in-memory
//! resources:
//! - [`Coercion`] / [`coerce`] — pure scalar coercion rules
//! - [`TypeSchema`] + [`SchemaRegistry`] — declarative per-type property
//!   schemas with explicit inheritance and a lazily cached merged view
//! - [`Resource`] — a bound, typed view over one payload snapshot, with
//!   generic and typed accessors over three namespaces (properties, sys,
//!   per-locale fields)
//! - [`Refetch`] + [`Resource::reload`] — replace local state with server
//!   state in place, all-or-nothing
//!
//! Domain resource types (spaces, locales, entries, ...) live with their
//! consumers; this crate only defines the machinery they declare schemas
//! against. The transport is an injected [`canopy_client::Client`] — no
//! networking happens here beyond what a reload's refetch capability does.

mod binder;
mod coerce;
mod error;
mod name;
mod refresh;
mod registry;
mod resource;
mod schema;
mod value;

pub use binder::bind_untyped;
pub use coerce::{Coercion, coerce};
pub use error::{CoercionError, ResourceError, ResourceResult};
pub use name::{camelize, snakify};
pub use refresh::Refetch;
pub use registry::SchemaRegistry;
pub use resource::{BindOptions, LocaleMode, Resource, ResourceIdentity};
pub use schema::{Descriptor, EffectiveSchema, TypeSchema};
pub use value::{Properties, PropertyValue};
