//! Transport boundary for the Canopy management API.
//!
//! This crate defines the seam between the binding core and whatever
//! actually speaks HTTP:
//! - [`Transport`] — the injected request capability (endpoint + params → raw JSON)
//! - [`Client`] — a cheap-to-clone handle bundling a shared transport with
//!   its configuration; every bound resource keeps one
//! - [`ClientError`] — typed transport failures (not-found, rate limits, ...)
//!
//! Endpoint construction, authentication, retries and rate-limit policy all
//! live behind the [`Transport`] implementation, never here.

mod client;
mod error;
pub mod transport;

pub use client::{Client, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use transport::Transport;
