//! Core domain model for genius-lookup.
//!
//! Defines the artist identifier, the transient search [`Candidate`], the
//! enriched [`ArtistRecord`], and the [`ResultRow`] produced per search
//! term by batch lookups.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod model;

pub use model::{render_table, ArtistId, ArtistRecord, Candidate, ResultRow, TABLE_COLUMNS};
