//! Lookup error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving or enriching an artist.
///
/// None of these escape a per-term lookup: the transport returns them as
/// values, and the batch orchestrator turns them into a row's `error` text.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The API answered with a non-2xx status other than 429.
    #[error("HTTP {status} from Genius: {message}")]
    Http { status: u16, message: String },

    /// The API answered 429 (after the single retry, if enabled).
    #[error("rate limited by Genius (HTTP 429)")]
    RateLimited,

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The request exceeded the configured per-request timeout.
    #[error("request timed out after {0:.1}s")]
    Timeout(f64),

    /// The response body was not the JSON we expected.
    #[error("parse error: {0}")]
    Parse(String),

    /// No access token is configured, so live calls are skipped.
    #[error("no access token configured")]
    MissingCredential,

    /// The search yielded no usable primary artist.
    #[error("no artist found for '{term}'")]
    NotFound { term: String },

    /// The details call failed after a successful search.
    #[error("artist details unavailable: {0}")]
    PartialData(Box<LookupError>),

    /// The local fallback search response could not be used.
    #[error("fallback source {path} unusable: {message}")]
    Fallback { path: PathBuf, message: String },

    /// The client configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl LookupError {
    /// Returns `true` for a 429 response.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited)
    }

    /// Returns `true` when the error indicates the artist was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. }) || self.status() == Some(404)
    }

    /// The HTTP status code, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::RateLimited => Some(429),
            Self::PartialData(inner) => inner.status(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::Http {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        if err.is_decode() {
            return Self::Parse(err.to_string());
        }
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Convenience alias for lookup results.
pub type LookupResult<T> = std::result::Result<T, LookupError>;
