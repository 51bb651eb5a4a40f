//! DuckDuckGo image and video search client.
//!
//! Provides a [`SearchProvider`] backed by DuckDuckGo's JSON endpoints, with
//! rate limiting, token negotiation, and response normalization.
//!
//! ### Protocol
//!
//! - **Token**: `GET /?q=<query>` returns a landing page carrying a `vqd`
//!   token that must accompany the search request.
//! - **Images**: `GET /i.js` with region, query, token, filters, safe search.
//! - **Videos**: `GET /v.js` with the same shape and video filter slots.
//! - **Rate Limiting**: a minimum interval between upstream requests;
//!   403 and 429 are reported as rate limiting.
//! - **Normalization**: rows become ordered [`SearchResult`] field maps.

pub mod request;
pub mod response;

pub use request::extract_vqd;
pub use response::{DdgResponse, ImageRow, VideoRow};

use std::sync::Arc;
use std::time::{Duration, Instant};

use asana_core::{MediaKind, ProviderError, SearchProvider, SearchQuery, SearchResult};
use async_trait::async_trait;
use reqwest::{StatusCode, header};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::ClientError;

/// Default base URL for DuckDuckGo.
const DEFAULT_BASE_URL: &str = "https://duckduckgo.com";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "asana/0.1";

/// Default minimum interval between upstream requests.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(750);

/// DuckDuckGo client configuration.
#[derive(Debug, Clone)]
pub struct DdgConfig {
    /// Base URL (default: https://duckduckgo.com).
    pub base_url: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: asana/0.x).
    pub user_agent: String,
    /// Minimum spacing between requests (default: 750ms).
    pub min_request_interval: Duration,
}

impl Default for DdgConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            min_request_interval: MIN_REQUEST_INTERVAL,
        }
    }
}

/// Rate limiter to enforce request intervals.
#[derive(Debug)]
struct RateLimiter {
    last_request: Mutex<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Mutex::new(Instant::now().checked_sub(min_interval).unwrap_or_else(Instant::now)),
            min_interval,
        }
    }

    /// Acquire permission to make a request, waiting if necessary.
    async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < self.min_interval {
            tokio::time::sleep(self.min_interval - elapsed).await;
        }
        *last = Instant::now();
    }
}

/// DuckDuckGo media search client.
#[derive(Debug, Clone)]
pub struct DdgClient {
    http: reqwest::Client,
    config: DdgConfig,
    rate_limiter: Arc<RateLimiter>,
}

impl DdgClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DdgConfig) -> Result<Self, ClientError> {
        let base = url::Url::parse(&config.base_url).map_err(|e| ClientError::InvalidConfig(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidConfig(format!("unsupported scheme: {}", base.scheme())));
        }

        let http = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| ClientError::Network(Arc::new(e)))?;

        let rate_limiter = Arc::new(RateLimiter::new(config.min_request_interval));
        Ok(Self { http, config, rate_limiter })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Fetch the `vqd` token required by the JSON endpoints.
    async fn vqd(&self, keywords: &str) -> Result<String, ClientError> {
        self.rate_limiter.acquire().await;

        let response = self.http.get(self.endpoint("")).query(&[("q", keywords)]).send().await?;
        check_status(response.status())?;

        let html = response.text().await?;
        extract_vqd(&html).ok_or_else(|| ClientError::MissingToken(keywords.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self, path: &str, params: &[(&'static str, String)],
    ) -> Result<T, ClientError> {
        self.rate_limiter.acquire().await;

        let response = self
            .http
            .get(self.endpoint(path))
            .header(header::ACCEPT, "application/json")
            .header(header::REFERER, format!("{}/", self.config.base_url.trim_end_matches('/')))
            .query(params)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("DuckDuckGo {} response status: {}", path, status);
        check_status(status)?;

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// Execute an image search.
    pub async fn images(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ClientError> {
        let start = Instant::now();
        let vqd = self.vqd(&query.text).await?;
        let raw: DdgResponse<ImageRow> = self.get_json("i.js", &request::image_params(query, &vqd)).await?;
        let results = response::normalize(raw, query.max_results);
        tracing::debug!("image search completed in {:?}, {} results", start.elapsed(), results.len());
        Ok(results)
    }

    /// Execute a video search.
    pub async fn videos(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ClientError> {
        let start = Instant::now();
        let vqd = self.vqd(&query.text).await?;
        let raw: DdgResponse<VideoRow> = self.get_json("v.js", &request::video_params(query, &vqd)).await?;
        let results = response::normalize(raw, query.max_results);
        tracing::debug!("video search completed in {:?}, {} results", start.elapsed(), results.len());
        Ok(results)
    }
}

fn check_status(status: StatusCode) -> Result<(), ClientError> {
    if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
        return Err(ClientError::RateLimited);
    }
    if status.is_client_error() || status.is_server_error() {
        return Err(ClientError::HttpError { status: status.as_u16() });
    }
    Ok(())
}

#[async_trait]
impl SearchProvider for DdgClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ProviderError> {
        tracing::debug!("searching DuckDuckGo: kind={} query={}", query.kind, query.text);
        let results = match query.kind {
            MediaKind::Image => self.images(query).await?,
            MediaKind::Video => self.videos(query).await?,
        };
        Ok(results)
    }
}
