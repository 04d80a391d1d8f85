//! The paginated array itself.

use crate::resolver::ItemTypeResolver;
use canopy_client::Client;
use canopy_resource::{
    BindOptions, Coercion, Properties, Resource, ResourceResult, SchemaRegistry, bind_untyped,
    coerce,
};
use serde_json::Value;
use std::ops::Index;
use std::sync::Arc;
use tracing::debug;

/// Schema type items bind as when their discriminator resolves to nothing.
const FALLBACK_TYPE: &str = "Resource";

/// One page of resources plus pagination metadata.
///
/// Immutable after construction. Iteration order is payload order and
/// repeated iteration yields the same sequence; nothing refetches per
/// element. `len()` may be smaller than `total` — that is the server's
/// pagination window, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceArray {
    sys: Properties,
    total: i64,
    skip: i64,
    limit: i64,
    items: Vec<Resource>,
    raw: Value,
}

impl ResourceArray {
    /// Wraps a raw page, binding every item to its resolved type. Options
    /// come from the client (or defaults when detached).
    pub fn from_payload(
        raw: Value,
        registry: &Arc<SchemaRegistry>,
        resolver: &dyn ItemTypeResolver,
        client: Option<Client>,
    ) -> ResourceResult<Self> {
        let options = client
            .as_ref()
            .map(BindOptions::for_client)
            .unwrap_or_default();
        Self::from_payload_with(raw, registry, resolver, client, options)
    }

    /// Wraps a raw page with explicit bind options.
    pub fn from_payload_with(
        raw: Value,
        registry: &Arc<SchemaRegistry>,
        resolver: &dyn ItemTypeResolver,
        client: Option<Client>,
        options: BindOptions,
    ) -> ResourceResult<Self> {
        // structural metadata carries no declarations, so it passes through
        let sys = bind_untyped(raw.get("sys"));
        let total = integer(raw.get("total"))?;
        let skip = integer(raw.get("skip"))?;
        let limit = integer(raw.get("limit"))?;

        let mut items = Vec::new();
        if let Some(elements) = raw.get("items").and_then(Value::as_array) {
            for element in elements {
                let type_name = element
                    .pointer("/sys/type")
                    .and_then(Value::as_str)
                    .and_then(|discriminator| resolver.resolve(discriminator))
                    .filter(|name| registry.contains(name))
                    .unwrap_or(FALLBACK_TYPE);
                items.push(Resource::from_payload_with(
                    element.clone(),
                    type_name,
                    registry,
                    client.clone(),
                    options.clone(),
                )?);
            }
        }
        debug!(total, skip, limit, items = items.len(), "Bound resource array");

        Ok(Self {
            sys,
            total,
            skip,
            limit,
            items,
            raw,
        })
    }

    /// The page's structural metadata (`type` is `"Array"` on the wire).
    pub fn sys(&self) -> &Properties {
        &self.sys
    }

    /// The wire type tag from `sys.type`.
    pub fn type_name(&self) -> Option<&str> {
        self.sys.get("type").and_then(|value| value.as_str())
    }

    /// Total matching resources server-side, across all pages.
    pub fn total(&self) -> i64 {
        self.total
    }

    /// Offset of this page.
    pub fn skip(&self) -> i64 {
        self.skip
    }

    /// Requested page size.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// The bound resources of this page, in payload order.
    pub fn items(&self) -> &[Resource] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Resource> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Resource> {
        self.items.iter()
    }

    /// True — this is the array-shaped counterpart to scalar resources.
    pub fn is_array(&self) -> bool {
        true
    }

    /// The untransformed page payload.
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

impl Index<usize> for ResourceArray {
    type Output = Resource;

    fn index(&self, index: usize) -> &Resource {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a ResourceArray {
    type Item = &'a Resource;
    type IntoIter = std::slice::Iter<'a, Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for ResourceArray {
    type Item = Resource;
    type IntoIter = std::vec::IntoIter<Resource>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

fn integer(raw: Option<&Value>) -> ResourceResult<i64> {
    let value = coerce(Coercion::Integer, raw.unwrap_or(&Value::Null))?;
    Ok(value.as_i64().unwrap_or(0))
}
