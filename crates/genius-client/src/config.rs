use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{LookupError, LookupResult};

/// Environment variable holding the Genius client access token.
pub const TOKEN_ENV_VAR: &str = "GENIUS_ACCESS_TOKEN";

/// Default Genius API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.genius.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for genius-lookup.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (GENIUS_* prefix)
/// 3. Config file (~/.config/genius-lookup/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Genius client access token, sent as a bearer credential.
    ///
    /// Without a token the client runs in fallback-only mode: no live calls
    /// are made and searches are answered from `fallback_source_path`.
    ///
    /// Can be set via:
    /// - CLI: --token
    /// - ENV: GENIUS_ACCESS_TOKEN
    /// - Config: access_token = "..."
    pub access_token: Option<String>,

    /// Base URL of the API. Default: https://api.genius.com
    pub base_url: String,

    /// Per-request timeout in seconds. Default: 10
    pub timeout_seconds: f64,

    /// Optional JSON file holding a captured search response.
    ///
    /// Used in place of the live search when the call fails, yields no
    /// hits, or no token is configured.
    pub fallback_source_path: Option<PathBuf>,

    /// Retry once after a 429 response. Default: true
    pub retry_on_rate_limit: bool,

    /// Delay before the rate-limit retry, in milliseconds. Default: 1000
    pub rate_limit_delay_ms: u64,

    /// Worker count for batch lookups; 1 means serial. Default: 10
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 10.0,
            fallback_source_path: None,
            retry_on_rate_limit: true,
            rate_limit_delay_ms: 1000,
            concurrency: 10,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/genius-lookup/config.toml
    /// Reads environment variables with GENIUS_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("genius");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let mut config: Self = builder.build().context("Failed to build configuration")?;

        if config.access_token.is_none() {
            config.access_token = token_from_env();
        }

        Ok(config)
    }

    /// Replace the access token; an empty string clears it.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.access_token = (!token.trim().is_empty()).then_some(token);
        self
    }

    #[must_use]
    pub fn with_fallback_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallback_source_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// The configured token, ignoring blank values.
    pub fn token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// The per-request timeout. An out-of-range `timeout_seconds` (which
    /// [`validate`](Self::validate) rejects) yields the default.
    pub fn timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.timeout_seconds)
            .ok()
            .filter(|t| !t.is_zero())
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn rate_limit_delay(&self) -> Duration {
        Duration::from_millis(self.rate_limit_delay_ms)
    }

    /// Check option ranges.
    pub fn validate(&self) -> LookupResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(LookupError::Config("base_url must not be empty".to_string()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(LookupError::Config(format!(
                "base_url must be an http(s) URL, got {}",
                self.base_url
            )));
        }
        let timeout = Duration::try_from_secs_f64(self.timeout_seconds);
        if !matches!(timeout, Ok(t) if !t.is_zero()) {
            return Err(LookupError::Config(format!(
                "timeout_seconds must be a positive number of seconds, got {}",
                self.timeout_seconds
            )));
        }
        if self.concurrency == 0 {
            return Err(LookupError::Config(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn token_from_env() -> Option<String> {
    std::env::var(TOKEN_ENV_VAR)
        .ok()
        .filter(|t| !t.trim().is_empty())
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/genius-lookup/config.toml
/// - macOS: ~/Library/Application Support/genius-lookup/config.toml
/// - Windows: %APPDATA%\genius-lookup\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("genius-lookup")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# genius-lookup Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (GENIUS_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Genius client access token
#
# Create an API client at: https://genius.com/api-clients
# Without a token, lookups are answered from the fallback source only.
#
# Can also be set via:
# - CLI: genius-lookup --token your-token artist Radiohead
# - Environment: GENIUS_ACCESS_TOKEN=your-token
#access_token = "your-genius-access-token"

# API base URL
#base_url = "https://api.genius.com"

# Per-request timeout in seconds
#timeout_seconds = 10.0

# Captured search response used when the live search is unavailable
#fallback_source_path = "data/genius_search_sample.json"

# Retry once, after rate_limit_delay_ms, when the API answers 429
#retry_on_rate_limit = true
#rate_limit_delay_ms = 1000

# Concurrent workers for batch lookups (1 = serial, input order kept)
#concurrency = 10
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
