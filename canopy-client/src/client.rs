//! Shared client handle.

use crate::error::ClientResult;
use crate::transport::Transport;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Configuration threaded through to every resource bound from this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Locale assumed when the server returns fields already flattened.
    pub default_locale: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_locale: "en-US".to_string(),
        }
    }
}

/// Handle to the transport shared by every resource bound from its payloads.
///
/// Clones share the same underlying transport. There is no process-wide
/// default instance; construction sites inject the transport explicitly.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl Client {
    /// Creates a client with the default configuration.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    /// Creates a client with an explicit configuration.
    pub fn with_config(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// The client's configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The configured default locale.
    pub fn default_locale(&self) -> &str {
        &self.config.default_locale
    }

    /// Performs a request through the shared transport.
    pub fn request(&self, endpoint: &str, params: &[(String, String)]) -> ClientResult<Value> {
        self.transport.request(endpoint, params)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
