//! Candidate -> canonical artist record.

use std::sync::Arc;

use genius_core::{ArtistId, ArtistRecord, Candidate};

use crate::error::LookupError;
use crate::parse;
use crate::transport::Transport;

/// Outcome of enriching one candidate.
#[derive(Debug)]
pub struct Enrichment {
    pub record: ArtistRecord,
    /// Why the record is partial, when the details call did not succeed.
    pub failure: Option<LookupError>,
}

/// Fetches artist details for a resolved candidate.
#[derive(Debug, Clone)]
pub struct Enricher {
    transport: Arc<Transport>,
}

impl Enricher {
    pub fn new(transport: Arc<Transport>) -> Self {
        Self { transport }
    }

    /// Fetch the details of `candidate`'s artist.
    ///
    /// An empty candidate yields an empty record without any network call.
    /// When the details call fails, the record degrades to the candidate's
    /// identifier and name and the failure is reported alongside it.
    pub async fn enrich(&self, candidate: &Candidate) -> Enrichment {
        let Some(id) = candidate.identifier else {
            return Enrichment {
                record: ArtistRecord::default(),
                failure: None,
            };
        };

        let result = self
            .transport
            .get(&details_path(candidate, id), &[])
            .await
            .and_then(|response| parse::artist_record(&response.body));

        match result {
            Ok(record) => Enrichment {
                record: record.or_candidate(candidate),
                failure: None,
            },
            Err(e) => {
                if !matches!(e, LookupError::MissingCredential) {
                    log::warn!("Details lookup failed for artist {}: {}", id, e);
                }
                Enrichment {
                    record: ArtistRecord::from_candidate(candidate),
                    failure: Some(LookupError::PartialData(Box::new(e))),
                }
            }
        }
    }

    /// Shortcut for the bare record of [`enrich`](Self::enrich).
    pub async fn record(&self, candidate: &Candidate) -> ArtistRecord {
        self.enrich(candidate).await.record
    }
}

/// The candidate's own `api_path` when it names an artist, else the path
/// built from its identifier.
fn details_path(candidate: &Candidate, id: ArtistId) -> String {
    candidate
        .api_path
        .as_deref()
        .filter(|path| path.trim_start_matches('/').starts_with("artists/"))
        .map_or_else(|| id.details_path(), str::to_string)
}
