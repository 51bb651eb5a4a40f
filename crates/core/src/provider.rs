//! External collaborator seams.
//!
//! The resolver and the prompt tools only see these traits; concrete HTTP
//! implementations live in `asana-client`.

use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::media::{SearchQuery, SearchResult};

/// Errors raised by a search or generation backend.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Request did not complete within the configured timeout.
    #[error("request timeout")]
    Timeout,

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status.
    #[error("HTTP error: {0}")]
    HttpStatus(u16),

    /// Provider throttled the request.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// Response body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Failures caused by load or throttling rather than by the query itself.
    ///
    /// A retry shortly afterwards may well succeed, so these outcomes are not
    /// worth remembering.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::Timeout | ProviderError::RateLimited)
    }
}

/// Safe search filtering levels.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    Off,
    #[default]
    Moderate,
    Strict,
}

impl SafeSearch {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafeSearch::Off => "off",
            SafeSearch::Moderate => "moderate",
            SafeSearch::Strict => "strict",
        }
    }
}

impl FromStr for SafeSearch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(SafeSearch::Off),
            "moderate" => Ok(SafeSearch::Moderate),
            "strict" | "on" => Ok(SafeSearch::Strict),
            other => Err(Error::InvalidInput(format!("invalid safesearch: {}", other))),
        }
    }
}

/// A media search backend.
///
/// Implementations return results in the provider's relevance order.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, ProviderError>;
}

/// A chat model that turns a prompt into markdown text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
