//! Search term -> primary artist candidate.

use std::sync::Arc;

use genius_core::Candidate;

use crate::error::LookupError;
use crate::fallback::FallbackSource;
use crate::parse;
use crate::transport::Transport;

const SEARCH_PATH: &str = "search";

/// Where a resolution's candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrigin {
    /// The live search endpoint.
    Live,
    /// The configured fallback source.
    Fallback,
    /// Neither source produced a search body.
    Unresolved,
}

/// Outcome of resolving one search term.
#[derive(Debug)]
pub struct Resolution {
    pub candidate: Candidate,
    pub origin: SearchOrigin,
    /// Failures met on the way, in order: the live search first, then the
    /// fallback source. A resolution can carry failures and still hold a
    /// candidate (live search failed, fallback answered).
    pub failures: Vec<LookupError>,
}

impl Resolution {
    fn unresolved(failures: Vec<LookupError>) -> Self {
        Self {
            candidate: Candidate::default(),
            origin: SearchOrigin::Unresolved,
            failures,
        }
    }

    /// All failures joined into one message, or `None` when there were none.
    pub fn cause(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        Some(
            self.failures
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Runs the search call and picks the first hit's primary artist.
#[derive(Debug, Clone)]
pub struct Resolver {
    transport: Arc<Transport>,
    fallback: Option<FallbackSource>,
}

impl Resolver {
    pub fn new(transport: Arc<Transport>, fallback: Option<FallbackSource>) -> Self {
        Self {
            transport,
            fallback,
        }
    }

    /// Resolve `term` to a candidate, never failing.
    ///
    /// The live search runs when a credential is configured. When it fails
    /// or yields no hits, the fallback source answers instead, if one is
    /// configured. A first hit without a primary artist id yields an empty
    /// candidate.
    pub async fn resolve(&self, term: &str) -> Resolution {
        let mut failures = Vec::new();

        if self.transport.has_credential() {
            match self.transport.get(SEARCH_PATH, &[("q", term)]).await {
                Ok(response) if parse::hit_count(&response.body) > 0 => {
                    return Resolution {
                        candidate: parse::first_hit_candidate(&response.body),
                        origin: SearchOrigin::Live,
                        failures,
                    };
                }
                Ok(_) => {
                    log::debug!("No search hits for '{}'", term);
                }
                Err(e) => {
                    log::warn!("Search failed for '{}': {}", term, e);
                    failures.push(e);
                }
            }
        } else {
            failures.push(LookupError::MissingCredential);
        }

        let Some(fallback) = &self.fallback else {
            return Resolution::unresolved(failures);
        };

        match fallback.load().await {
            Ok(body) => {
                log::info!(
                    "Answering '{}' from fallback source {}",
                    term,
                    fallback.path().display()
                );
                Resolution {
                    candidate: parse::first_hit_candidate(&body),
                    origin: SearchOrigin::Fallback,
                    failures,
                }
            }
            Err(e) => {
                log::warn!("{}", e);
                failures.push(e);
                Resolution::unresolved(failures)
            }
        }
    }

    /// Shortcut for the bare candidate of [`resolve`](Self::resolve).
    pub async fn candidate(&self, term: &str) -> Candidate {
        self.resolve(term).await.candidate
    }
}
