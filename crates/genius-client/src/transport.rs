//! HTTP transport for the Genius API.
//!
//! [`Transport`] issues one authenticated request and normalizes the
//! outcome into a [`LookupResult`]: a 2xx response with a JSON body is
//! `Ok`, everything else (non-2xx, network failure, timeout, non-JSON
//! body) is an `Err` value. A 429 response is retried exactly once after
//! a fixed delay when the retry policy allows it.
//!
//! The wire call itself sits behind [`HttpBackend`] so the shared
//! [`ReqwestBackend`] connection pool can be swapped for a scripted one.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use backon::{ConstantBuilder, Retryable};
use reqwest::{Client, Method};
use serde_json::Value;

use crate::config::Config;
use crate::error::{LookupError, LookupResult};

const USER_AGENT: &str = concat!(
    "genius-lookup/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/oxur/genius-lookup)"
);

/// Longest slice of an error body quoted in an error message.
const MAX_ERROR_BODY: usize = 200;

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// A fully built request, ready for a backend to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL, without the query string.
    pub url: String,
    /// Path relative to the API base URL (e.g. `search`, `artists/1090`).
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer_token: String,
    pub timeout: Duration,
}

impl ApiRequest {
    /// Value of the first query parameter named `name`.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of an HTTP response, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends a single request. Implementations must be safe to share across
/// concurrent lookups and must not retry on their own.
#[async_trait]
pub trait HttpBackend: Send + Sync + fmt::Debug {
    async fn send(&self, request: &ApiRequest) -> LookupResult<RawResponse>;
}

/// Production backend over a shared [`reqwest::Client`] connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    http: Client,
}

impl ReqwestBackend {
    /// Create a backend with the crate user agent.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> LookupResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| LookupError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn send(&self, request: &ApiRequest) -> LookupResult<RawResponse> {
        let response = self
            .http
            .request(request.method.clone(), &request.url)
            .query(&request.query)
            .bearer_auth(&request.bearer_token)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LookupError::Timeout(request.timeout.as_secs_f64())
                } else {
                    LookupError::from(e)
                }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                LookupError::Timeout(request.timeout.as_secs_f64())
            } else {
                LookupError::Network(format!("failed to read response body: {e}"))
            }
        })?;

        Ok(RawResponse { status, body })
    }
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// A successful (2xx) response with its parsed JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

/// What to do when the API answers 429.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RetryPolicy {
    /// Retry once after `delay`; when `false` the 429 is returned as is.
    retry_on_rate_limit: bool,
    delay: Duration,
}

/// Authenticated request issuer shared by the resolver and the enricher.
#[derive(Clone)]
pub struct Transport {
    backend: Arc<dyn HttpBackend>,
    base_url: String,
    access_token: Option<String>,
    timeout: Duration,
    retry: RetryPolicy,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("backend", &self.backend)
            .field("base_url", &self.base_url)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .field("timeout", &self.timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

impl Transport {
    /// Build a transport from configuration over the given backend.
    pub fn new(config: &Config, backend: Arc<dyn HttpBackend>) -> Self {
        Self {
            backend,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.token().map(str::to_string),
            timeout: config.timeout(),
            retry: RetryPolicy {
                retry_on_rate_limit: config.retry_on_rate_limit,
                delay: config.rate_limit_delay(),
            },
        }
    }

    /// Whether live calls can be made at all.
    pub fn has_credential(&self) -> bool {
        self.access_token.is_some()
    }

    /// Absolute URL for a path relative to the base URL.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// `GET` a path relative to the base URL.
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> LookupResult<ApiResponse> {
        self.request(Method::GET, path, params).await
    }

    /// Issue one request, retrying once on 429 when the policy allows.
    ///
    /// Fails fast with [`LookupError::MissingCredential`] when no access
    /// token is configured; no request is sent in that case.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
    ) -> LookupResult<ApiResponse> {
        let token = self
            .access_token
            .as_ref()
            .ok_or(LookupError::MissingCredential)?;

        let path = path.trim_start_matches('/').to_string();
        let request = ApiRequest {
            method,
            url: self.url_for(&path),
            path,
            query: params
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            bearer_token: token.clone(),
            timeout: self.timeout,
        };

        log::debug!("{} {} {:?}", request.method, request.url, request.query);

        if !self.retry.retry_on_rate_limit {
            return self.send_once(&request).await;
        }

        (|| self.send_once(&request))
            .retry(
                ConstantBuilder::default()
                    .with_delay(self.retry.delay)
                    .with_max_times(1),
            )
            .sleep(tokio::time::sleep)
            .when(LookupError::is_rate_limited)
            .notify(|err, delay| {
                log::warn!("{} for {}; retrying once in {:?}", err, request.path, delay);
            })
            .await
    }

    async fn send_once(&self, request: &ApiRequest) -> LookupResult<ApiResponse> {
        let raw = self.backend.send(request).await?;
        interpret(raw)
    }
}

/// Map a raw response onto the transport outcome.
fn interpret(raw: RawResponse) -> LookupResult<ApiResponse> {
    match raw.status {
        429 => Err(LookupError::RateLimited),
        200..=299 => {
            let body: Value = serde_json::from_str(&raw.body)
                .map_err(|e| LookupError::Parse(format!("response is not JSON: {e}")))?;
            Ok(ApiResponse {
                status: raw.status,
                body,
            })
        }
        status => Err(LookupError::Http {
            status,
            message: error_message(&raw.body),
        }),
    }
}

/// Best-effort human-readable message from an error body.
///
/// Genius reports errors either as `{"meta": {"message": ..}}` or as an
/// OAuth-style `{"error": .., "error_description": ..}`.
fn error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let message = json
            .pointer("/meta/message")
            .or_else(|| json.get("error_description"))
            .or_else(|| json.get("error"))
            .and_then(Value::as_str);
        if let Some(message) = message {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY).collect()
}
