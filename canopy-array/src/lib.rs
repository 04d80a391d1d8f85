//! Paginated array wrapper for the Canopy management API.
//!
//! Wraps a raw `{sys, total, skip, limit, items}` page into an ordered,
//! restartable view whose items are bound resources:
//! - [`ResourceArray`] — the page itself, enumerable and indexable
//! - [`ItemTypeResolver`] — maps each item's wire discriminator to a
//!   registered schema type; unknown discriminators fall back to the
//!   generic base resource instead of failing construction

mod array;
mod resolver;

pub use array::ResourceArray;
pub use resolver::{GenericResolver, ItemTypeResolver, MapResolver};
