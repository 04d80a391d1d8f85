//! Error types for the transport layer.

use thiserror::Error;

/// Result type for transport operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by a transport implementation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The requested resource does not exist on the server.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The credentials were rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The server throttled the request.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The response body was not valid JSON.
    #[error("malformed response body: {0}")]
    Body(#[from] serde_json::Error),
}

impl ClientError {
    /// Returns true if this error means the resource is gone server-side.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }

    /// Returns the retry-after duration if this is a rate-limit error.
    pub fn retry_after(&self) -> Option<std::time::Duration> {
        match self {
            ClientError::RateLimited { retry_after_secs } => {
                Some(std::time::Duration::from_secs(*retry_after_secs))
            }
            _ => None,
        }
    }
}
