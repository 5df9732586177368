//! HTTP client for the Salsify Product API, plus the fallback key-path
//! extraction used to pull block lists out of product records.
//!
//! Product records are treated as opaque JSON; nothing here validates them
//! against a schema.

mod client;
mod error;
pub mod extract;

pub use client::SalsifyClient;
pub use error::SalsifyError;
