//! Local stand-in for the live search endpoint.
//!
//! A fallback source is a JSON file holding one previously captured search
//! response. It is read on every use, never written, and answers every
//! term with the same body.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{LookupError, LookupResult};

/// A captured search response on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackSource {
    path: PathBuf,
}

impl FallbackSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the captured search response.
    ///
    /// # Errors
    /// Returns [`LookupError::Fallback`] when the file cannot be read or
    /// does not contain JSON.
    pub async fn load(&self) -> LookupResult<Value> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| self.error(e.to_string()))?;

        serde_json::from_str(&contents).map_err(|e| self.error(format!("not JSON: {e}")))
    }

    fn error(&self, message: String) -> LookupError {
        LookupError::Fallback {
            path: self.path.clone(),
            message,
        }
    }
}
