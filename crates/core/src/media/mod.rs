//! Media resolution for pose subjects.
//!
//! Resolves a free-text subject to a representative image or video URL using
//! a [`SearchProvider`](crate::SearchProvider). It supports:
//!
//! - Kind-specific field priority over provider results
//! - Rejection of empty, non-HTTP(S) and inline base64 candidates
//! - Time-bounded memoization with least-recently-used eviction
//! - Fail-open lookups: provider failures resolve to [`MediaOutcome::NotFound`]

pub mod cache;
pub mod resolver;
pub mod select;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::provider::SafeSearch;

pub use cache::{CacheEntry, CacheKey, MediaCache};
pub use resolver::{MediaResolver, ResolverConfig};
pub use select::{is_acceptable_url, select_url};

/// Media category requested for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Result fields consulted for a candidate URL, in priority order.
    pub fn field_priority(&self) -> &'static [&'static str] {
        match self {
            MediaKind::Image => &["image", "thumbnail"],
            MediaKind::Video => &["content", "href", "thumbnail"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            other => Err(Error::InvalidInput(format!("invalid media kind: {}", other))),
        }
    }
}

/// Outcome of a media lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaOutcome {
    Found(String),
    NotFound,
}

impl MediaOutcome {
    pub fn url(&self) -> Option<&str> {
        match self {
            MediaOutcome::Found(url) => Some(url),
            MediaOutcome::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, MediaOutcome::Found(_))
    }

    pub fn into_option(self) -> Option<String> {
        match self {
            MediaOutcome::Found(url) => Some(url),
            MediaOutcome::NotFound => None,
        }
    }
}

impl From<Option<String>> for MediaOutcome {
    fn from(url: Option<String>) -> Self {
        url.map_or(MediaOutcome::NotFound, MediaOutcome::Found)
    }
}

/// One record returned by a search provider.
///
/// A flat mapping from field name to value. Which fields matter depends on
/// the [`MediaKind`] being resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchResult {
    fields: BTreeMap<String, String>,
}

impl SearchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Insert only when a value is present.
    pub fn insert_opt(&mut self, name: impl Into<String>, value: Option<String>) {
        if let Some(value) = value {
            self.insert(name, value);
        }
    }

    /// Get a field value, treating empty strings as absent.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchResult {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

/// Parameters for a single provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Full query text, domain suffix included.
    pub text: String,
    pub kind: MediaKind,
    /// Region code, e.g. `in-en`.
    pub region: String,
    pub safesearch: SafeSearch,
    pub max_results: usize,
}
