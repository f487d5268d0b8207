//! Artist lookups against the Genius API.
//!
//! Resolves a free-text search term to the first hit's primary artist,
//! fetches that artist's details, and assembles one result row per term.
//! Batches of terms run serially or over a bounded worker pool.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod lookup;
pub mod parse;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::GeniusClient;
pub use config::Config;
pub use error::{LookupError, LookupResult};
pub use fallback::FallbackSource;
pub use lookup::{Enricher, Enrichment, LookupPipeline, Resolution, Resolver, SearchOrigin};
pub use transport::{ApiRequest, ApiResponse, HttpBackend, RawResponse, ReqwestBackend, Transport};
