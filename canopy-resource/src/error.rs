//! Error types for the binding engine.

use canopy_client::ClientError;
use thiserror::Error;

/// Result type for binding operations.
pub type ResourceResult<T> = Result<T, ResourceError>;

/// A coercion that could not produce a typed value.
///
/// Only date parsing can fail. Numeric and boolean coercions degrade to a
/// default value on bad input instead, matching the upstream API's long-
/// standing behavior for malformed payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("malformed date value: {value}")]
    MalformedDate { value: String },
}

/// Errors that can occur while binding or reloading a resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    /// A schema referenced a type name nothing has declared.
    #[error("unknown resource type: {0}")]
    UnknownType(String),

    /// A type's base chain loops back on itself.
    #[error("schema inheritance cycle at {0}")]
    SchemaCycle(String),

    /// The resource has no `sys.id` to refetch by.
    #[error("resource carries no identity to refetch by")]
    MissingIdentity,

    /// The transport reported a failure; prior state is left untouched.
    #[error("client error: {0}")]
    Client(#[from] ClientError),
}
