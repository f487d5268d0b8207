//! Resolve-then-enrich lookup pipeline.
//!
//! A lookup runs the [`Resolver`] (search call, first hit's primary
//! artist) and then the [`Enricher`] (details call) for one search term.
//! [`batch::lookup_all`] fans a list of terms out over the same pipeline.

pub mod batch;
pub mod enrich;
pub mod resolve;

use genius_core::{ArtistRecord, Candidate, ResultRow};

use crate::error::LookupError;

pub use enrich::{Enricher, Enrichment};
pub use resolve::{Resolution, Resolver, SearchOrigin};

/// One resolver and one enricher sharing a transport.
#[derive(Debug, Clone)]
pub struct LookupPipeline {
    resolver: Resolver,
    enricher: Enricher,
}

impl LookupPipeline {
    pub fn new(resolver: Resolver, enricher: Enricher) -> Self {
        Self { resolver, enricher }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn enricher(&self) -> &Enricher {
        &self.enricher
    }

    /// Resolve and enrich `term`, returning an empty or partial record
    /// when the lookup is incomplete.
    pub async fn artist(&self, term: &str) -> ArtistRecord {
        let candidate: Candidate = self.resolver.candidate(term).await;
        self.enricher.record(&candidate).await
    }

    /// Resolve and enrich `term` into a result row.
    ///
    /// Never fails: an unresolved term yields a row with null artist
    /// fields and an error, a failed details call yields the candidate's
    /// data plus an error. A row answered by the fallback source after a
    /// live failure names that failure.
    pub async fn row(&self, term: &str) -> ResultRow {
        let resolution = self.resolver.resolve(term).await;
        let cause = resolution.cause();

        if resolution.candidate.is_empty() {
            let not_found = LookupError::NotFound {
                term: term.to_string(),
            };
            // A 404 from search adds nothing to "not found".
            let error = match cause {
                Some(cause) if !resolution.failures.iter().all(LookupError::is_not_found) => {
                    format!("{} ({})", not_found, cause)
                }
                _ => not_found.to_string(),
            };
            return ResultRow::failed(term, error);
        }

        let mut errors = Vec::new();
        if let (SearchOrigin::Fallback, Some(cause)) = (resolution.origin, cause) {
            errors.push(format!("answered from fallback source ({})", cause));
        }

        let enrichment = self.enricher.enrich(&resolution.candidate).await;
        if let Some(failure) = enrichment.failure {
            errors.push(failure.to_string());
        }

        let row = ResultRow::from_record(term, &enrichment.record);
        if errors.is_empty() {
            row
        } else {
            row.with_error(errors.join("; "))
        }
    }
}
