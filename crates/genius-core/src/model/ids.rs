use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric identifier the Genius API assigns to an artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtistId(u64);

impl ArtistId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Relative API path of the artist details endpoint.
    #[must_use]
    pub fn details_path(self) -> String {
        format!("artists/{}", self.0)
    }
}

impl From<u64> for ArtistId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ArtistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
