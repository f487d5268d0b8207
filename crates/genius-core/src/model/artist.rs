use serde::{Deserialize, Serialize};

use crate::model::ids::ArtistId;

/// The primary artist of the first search hit.
///
/// Produced by the resolver and consumed immediately by the enricher.
/// A candidate without an identifier is "empty": the search did not
/// yield a usable artist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub identifier: Option<ArtistId>,
    pub display_name: Option<String>,

    /// API path of the artist (e.g. `/artists/1090`), when the hit has one.
    pub api_path: Option<String>,
}

impl Candidate {
    #[must_use]
    pub fn new(identifier: ArtistId, display_name: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier),
            display_name: Some(display_name.into()),
            api_path: None,
        }
    }

    /// Returns `true` when the search produced no usable artist.
    pub fn is_empty(&self) -> bool {
        self.identifier.is_none()
    }
}

/// Canonical artist attributes from the details endpoint.
///
/// Every field is optional: a record may be partial when the details
/// call failed and only the search candidate's data is known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRecord {
    pub identifier: Option<ArtistId>,
    pub name: Option<String>,
    pub follower_count: Option<u64>,

    /// Public artist page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ArtistRecord {
    /// A partial record built from what the search step already knows.
    #[must_use]
    pub fn from_candidate(candidate: &Candidate) -> Self {
        Self {
            identifier: candidate.identifier,
            name: candidate.display_name.clone(),
            ..Self::default()
        }
    }

    /// Fill identifier and name from `candidate` where this record lacks them.
    #[must_use]
    pub fn or_candidate(mut self, candidate: &Candidate) -> Self {
        if self.identifier.is_none() {
            self.identifier = candidate.identifier;
        }
        if self.name.is_none() {
            self.name.clone_from(&candidate.display_name);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.identifier.is_none() && self.name.is_none() && self.follower_count.is_none()
    }
}
