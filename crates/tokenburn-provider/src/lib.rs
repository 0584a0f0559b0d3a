//! # tokenburn Provider
//!
//! A pooled, rate-limited HTTP client for the REST backends of the burn page:
//! the block explorer that lists burn transactions and the price API. Both
//! are public endpoints with tight request quotas, so every request waits on
//! a shared token bucket before going out.
//!
//! ## Example
//!
//! ```ignore
//! use tokenburn_provider::{HttpClient, HttpClientConfig, RateLimitConfig};
//!
//! let client = HttpClient::with_config(HttpClientConfig::default(), Some(RateLimitConfig::default()))?;
//! let body: serde_json::Value = client
//!     .get_json("https://api.etherscan.io/v2/api", &[("module", "account")])
//!     .await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokenburn_error::BurnError;
use url::Url;

/// Provider-related errors
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client could not be built
    #[error("Client configuration error: {0}")]
    Config(String),

    /// Rate limited by the remote side
    #[error("Rate limited")]
    RateLimited,

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status {
        /// Status code
        status: u16,
        /// Response body (truncated)
        body: String,
    },

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ProviderError> for BurnError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::RateLimited => BurnError::RateLimited,
            ProviderError::Json(e) => BurnError::JsonError(e.to_string()),
            ProviderError::InvalidUrl(e) | ProviderError::Config(e) => BurnError::ConfigError(e),
            ProviderError::Http(e) if e.is_timeout() => BurnError::HttpError(format!("timeout: {e}")),
            other => BurnError::HttpError(other.to_string()),
        }
    }
}

/// Longest error body kept in [`ProviderError::Status`]
pub const MAX_ERROR_BODY: usize = 256;

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,
    /// Idle connection timeout
    pub pool_idle_timeout_secs: u64,
    /// Connection timeout
    pub connect_timeout_secs: u64,
    /// Request timeout
    pub request_timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
    /// Enable gzip compression
    pub gzip: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: 10,
            pool_idle_timeout_secs: 90,
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            user_agent: format!("tokenburn/{}", env!("CARGO_PKG_VERSION")),
            gzip: true,
        }
    }
}

impl HttpClientConfig {
    /// Sets the request timeout
    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }
}

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per second
    pub requests_per_second: u32,
    /// Burst size (max requests in a burst)
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    /// Etherscan's free tier allows 5 calls per second
    fn default() -> Self {
        Self {
            requests_per_second: 5,
            burst_size: 5,
        }
    }
}

/// HTTP client with connection pooling and rate limiting
pub struct HttpClient {
    client: Client,
    rate_limiter: Option<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    request_count: AtomicU64,
}

impl HttpClient {
    /// Creates a new client with default configuration and no rate limit
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default(), None)
    }

    /// Creates a new client with custom configuration
    pub fn with_config(
        http_config: HttpClientConfig,
        rate_limit: Option<RateLimitConfig>,
    ) -> Result<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(http_config.pool_max_idle_per_host)
            .pool_idle_timeout(Duration::from_secs(http_config.pool_idle_timeout_secs))
            .connect_timeout(Duration::from_secs(http_config.connect_timeout_secs))
            .timeout(Duration::from_secs(http_config.request_timeout_secs))
            .user_agent(&http_config.user_agent)
            .gzip(http_config.gzip)
            .build()
            .map_err(|e| ProviderError::Config(e.to_string()))?;

        let rate_limiter = rate_limit.map(build_limiter).transpose()?;

        Ok(Self {
            client,
            rate_limiter,
            request_count: AtomicU64::new(0),
        })
    }

    /// Makes a GET request with query parameters and decodes a JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = Url::parse(url).map_err(|e| ProviderError::InvalidUrl(format!("{url}: {e}")))?;

        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }
        self.request_count.fetch_add(1, Ordering::SeqCst);

        tracing::debug!(host = url.host_str().unwrap_or_default(), path = url.path(), "GET");
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Returns the number of requests made
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }
}

/// Cuts an error body to at most [`MAX_ERROR_BODY`] bytes on a char boundary
fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        body.truncate(cut);
    }
    body
}

fn build_limiter(
    config: RateLimitConfig,
) -> Result<RateLimiter<NotKeyed, InMemoryState, DefaultClock>> {
    let per_second = NonZeroU32::new(config.requests_per_second)
        .ok_or_else(|| ProviderError::Config("requests_per_second must be non-zero".into()))?;
    let burst = NonZeroU32::new(config.burst_size)
        .ok_or_else(|| ProviderError::Config("burst_size must be non-zero".into()))?;
    Ok(RateLimiter::direct(Quota::per_second(per_second).allow_burst(burst)))
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("request_count", &self.request_count())
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish()
    }
}
