use std::sync::Arc;

use genius_core::{ArtistRecord, Candidate, ResultRow};

use crate::config::Config;
use crate::error::LookupResult;
use crate::fallback::FallbackSource;
use crate::lookup::{batch, Enricher, LookupPipeline, Resolver};
use crate::transport::{HttpBackend, ReqwestBackend, Transport};

/// Genius artist lookup client.
///
/// Cheap to clone; clones share one connection pool. Without an access
/// token the client runs in fallback-only mode: searches are answered by
/// the configured fallback source and no details are fetched.
#[derive(Debug, Clone)]
pub struct GeniusClient {
    pipeline: Arc<LookupPipeline>,
    concurrency: usize,
    live: bool,
}

impl GeniusClient {
    /// Create a client over the production HTTP backend.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: &Config) -> LookupResult<Self> {
        let backend = ReqwestBackend::new()?;
        Self::with_backend(config, Arc::new(backend))
    }

    /// Create a client over a custom backend.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn with_backend(config: &Config, backend: Arc<dyn HttpBackend>) -> LookupResult<Self> {
        config.validate()?;

        let transport = Arc::new(Transport::new(config, backend));
        let live = transport.has_credential();
        let fallback = config.fallback_source_path.clone().map(FallbackSource::new);

        if !live {
            match &fallback {
                Some(source) => log::warn!(
                    "No access token configured; answering searches from {}",
                    source.path().display()
                ),
                None => log::warn!(
                    "No access token and no fallback source configured; lookups will not resolve"
                ),
            }
        }

        let pipeline = LookupPipeline::new(
            Resolver::new(Arc::clone(&transport), fallback),
            Enricher::new(transport),
        );

        Ok(Self {
            pipeline: Arc::new(pipeline),
            concurrency: config.concurrency,
            live,
        })
    }

    /// Whether live API calls are made (an access token is configured).
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Default batch concurrency from configuration.
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Search for `term` and return the first hit's primary artist.
    pub async fn resolve(&self, term: &str) -> Candidate {
        self.pipeline.resolver().candidate(term).await
    }

    /// Fetch details for a resolved candidate, degrading to its own data.
    pub async fn enrich(&self, candidate: &Candidate) -> ArtistRecord {
        self.pipeline.enricher().record(candidate).await
    }

    /// Resolve and enrich one term. Returns an empty record when nothing
    /// resolves and a partial one when the details call fails.
    pub async fn get_artist(&self, term: &str) -> ArtistRecord {
        self.pipeline.artist(term).await
    }

    /// Resolve and enrich one term into a result row.
    pub async fn lookup(&self, term: &str) -> ResultRow {
        self.pipeline.row(term).await
    }

    /// Look up every term with the configured concurrency.
    ///
    /// See [`batch`] for the row order contract.
    pub async fn lookup_all<I, S>(&self, terms: I) -> Vec<ResultRow>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lookup_all_with(terms, self.concurrency).await
    }

    /// Look up every term, `concurrency` at a time.
    pub async fn lookup_all_with<I, S>(&self, terms: I, concurrency: usize) -> Vec<ResultRow>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        batch::lookup_all(Arc::clone(&self.pipeline), terms, concurrency).await
    }
}
