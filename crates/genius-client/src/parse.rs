//! Field extraction from Genius response bodies.
//!
//! Search responses look like
//! `{"response": {"hits": [{"result": {"primary_artist": {..}}}]}}` and
//! artist details like `{"response": {"artist": {..}}}`. Each hit is
//! decoded on its own so one malformed entry never poisons the rest of
//! the body.

use serde::Deserialize;
use serde_json::Value;

use genius_core::{ArtistId, ArtistRecord, Candidate};

use crate::error::{LookupError, LookupResult};

// ---------------------------------------------------------------------------
// Response types (private -- the API nests everything under `response`)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Hit {
    result: Option<HitResult>,
}

#[derive(Debug, Deserialize)]
struct HitResult {
    primary_artist: Option<PrimaryArtist>,
}

#[derive(Debug, Deserialize)]
struct PrimaryArtist {
    id: Option<u64>,
    name: Option<String>,
    api_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArtistDetails {
    id: Option<u64>,
    name: Option<String>,
    followers_count: Option<u64>,
    stats: Option<ArtistStats>,
    url: Option<String>,
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArtistStats {
    followers_count: Option<u64>,
}

impl ArtistDetails {
    /// Top-level `followers_count`, then `stats.followers_count`.
    fn followers_count(&self) -> Option<u64> {
        self.followers_count
            .or_else(|| self.stats.as_ref().and_then(|s| s.followers_count))
    }
}

impl From<PrimaryArtist> for Candidate {
    fn from(artist: PrimaryArtist) -> Self {
        let Some(id) = artist.id else {
            return Candidate::default();
        };
        Candidate {
            identifier: Some(ArtistId::new(id)),
            display_name: artist.name,
            api_path: artist.api_path,
        }
    }
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// The hit list of a search body, or `None` when the body has no
/// `response.hits` array.
pub fn search_hits(body: &Value) -> Option<&[Value]> {
    body.pointer("/response/hits")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
}

/// Number of hits in a search body (0 when the body is malformed).
pub fn hit_count(body: &Value) -> usize {
    search_hits(body).map_or(0, <[Value]>::len)
}

/// The primary artist of the first hit.
///
/// Returns an empty [`Candidate`] when there are no hits, when the first
/// hit has no `result.primary_artist`, or when that artist has no `id`.
pub fn first_hit_candidate(body: &Value) -> Candidate {
    let Some(first) = search_hits(body).and_then(<[Value]>::first) else {
        return Candidate::default();
    };

    match Hit::deserialize(first) {
        Ok(hit) => hit
            .result
            .and_then(|r| r.primary_artist)
            .map(Candidate::from)
            .unwrap_or_default(),
        Err(e) => {
            log::debug!("Ignoring malformed search hit: {}", e);
            Candidate::default()
        }
    }
}

/// The artist record of a details body.
///
/// # Errors
/// Returns [`LookupError::Parse`] when `response.artist` is missing or is
/// not an artist object.
pub fn artist_record(body: &Value) -> LookupResult<ArtistRecord> {
    let artist = body
        .pointer("/response/artist")
        .filter(|a| a.is_object())
        .ok_or_else(|| LookupError::Parse("missing response.artist in details body".to_string()))?;

    let details = ArtistDetails::deserialize(artist)
        .map_err(|e| LookupError::Parse(format!("malformed artist details: {e}")))?;

    Ok(ArtistRecord {
        identifier: details.id.map(ArtistId::new),
        follower_count: details.followers_count(),
        name: details.name,
        url: details.url,
        image_url: details.image_url,
    })
}
