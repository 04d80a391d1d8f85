//! In-place reload of a bound resource.

use crate::error::{ResourceError, ResourceResult};
use crate::resource::{Resource, ResourceIdentity};
use canopy_client::ClientResult;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Capability that fetches a fresh raw payload for a resource identity.
///
/// Concrete resource types supply this — typically a thin closure over the
/// endpoint the resource was originally fetched from.
pub trait Refetch {
    fn refetch(&self, identity: &ResourceIdentity) -> ClientResult<Value>;
}

impl<F> Refetch for F
where
    F: Fn(&ResourceIdentity) -> ClientResult<Value>,
{
    fn refetch(&self, identity: &ResourceIdentity) -> ClientResult<Value> {
        self(identity)
    }
}

impl Resource {
    /// Replaces this resource's bound state with a fresh server fetch.
    ///
    /// The refetch is keyed by the resource's own identity; the fresh
    /// payload is rebound with the same schema, client and options. The
    /// replace is all-or-nothing — a refetch or rebind failure leaves the
    /// current state untouched. Returns `&mut Self` so calls chain, and
    /// existing holders of the resource observe the update in place.
    pub fn reload(&mut self, refetch: &dyn Refetch) -> ResourceResult<&mut Self> {
        let identity = self.identity().ok_or(ResourceError::MissingIdentity)?;
        let raw = refetch.refetch(&identity)?;
        let registry = Arc::clone(self.registry());
        let fresh = Resource::from_payload_with(
            raw,
            self.type_name(),
            &registry,
            self.client().cloned(),
            self.bind_options().clone(),
        )?;
        debug!(resource_type = %self.type_name(), id = %identity.id, "Resource reloaded");
        self.replace_state(fresh);
        Ok(self)
    }
}
