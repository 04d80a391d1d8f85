//! Transport capability abstraction.
//!
//! Defines the trait the binding core calls to obtain raw payloads,
//! allowing it to work with any HTTP stack (or none at all in tests).

use crate::error::ClientResult;
use serde_json::Value;

/// A request capability against the management API.
///
/// Implementations own everything network-shaped: URL construction,
/// authentication headers, retries, timeouts. The core only ever asks for
/// the decoded JSON payload of an endpoint.
pub trait Transport: Send + Sync {
    /// Performs a request and returns the raw decoded JSON payload.
    fn request(&self, endpoint: &str, params: &[(String, String)]) -> ClientResult<Value>;
}

/// A mock transport for testing.
pub mod mock {
    use super::*;
    use crate::error::ClientError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned payloads by endpoint and records every request.
    pub struct MockTransport {
        responses: Mutex<HashMap<String, Value>>,
        requests: Mutex<Vec<String>>,
    }

    impl MockTransport {
        /// Creates an empty mock; every request returns `NotFound`.
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(HashMap::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Registers a canned payload for an endpoint.
        pub fn stub(&self, endpoint: impl Into<String>, payload: Value) {
            self.responses.lock().unwrap().insert(endpoint.into(), payload);
        }

        /// Builder form of [`stub`](Self::stub).
        pub fn with_stub(self, endpoint: impl Into<String>, payload: Value) -> Self {
            self.stub(endpoint, payload);
            self
        }

        /// Endpoints requested so far, in call order.
        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Default for MockTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for MockTransport {
        fn request(&self, endpoint: &str, _params: &[(String, String)]) -> ClientResult<Value> {
            self.requests.lock().unwrap().push(endpoint.to_string());
            self.responses
                .lock()
                .unwrap()
                .get(endpoint)
                .cloned()
                .ok_or_else(|| ClientError::NotFound(endpoint.to_string()))
        }
    }
}
