//! Memoized subject → media URL resolution.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use std::time::Duration;

use tokio::sync::Mutex;

use super::cache::{CacheKey, MediaCache};
use super::select::select_url;
use super::{MediaKind, MediaOutcome, SearchQuery};
use crate::provider::{SafeSearch, SearchProvider};

/// Default TTL for resolved outcomes (1 hour).
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Default maximum number of cached outcomes.
pub const DEFAULT_CAPACITY: usize = 256;

/// Default upper bound on a single provider call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolver configuration.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// How long an outcome stays valid (default: 1h).
    pub ttl: Duration,
    /// Maximum cached outcomes before LRU eviction (default: 256).
    pub capacity: NonZeroUsize,
    /// Appended to the raw subject to build the query (default: " yoga pose").
    pub query_suffix: String,
    /// Provider region (default: "in-en").
    pub region: String,
    pub safesearch: SafeSearch,
    /// Results requested per provider call (default: 5).
    pub max_results: usize,
    /// Provider call timeout (default: 10s).
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_TTL,
            capacity: NonZeroUsize::new(DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN),
            query_suffix: " yoga pose".to_string(),
            region: "in-en".to_string(),
            safesearch: SafeSearch::Moderate,
            max_results: 5,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// In-flight lookup slots, one per key with a miss in progress.
type InflightMap = StdMutex<HashMap<CacheKey, Arc<Mutex<()>>>>;

/// Result of one provider round trip.
enum Lookup {
    /// Worth caching for the full TTL.
    Settled(MediaOutcome),
    /// The provider timed out or throttled us; answer NotFound but do not remember it.
    Transient,
}

/// Resolves subjects to media URLs through a [`SearchProvider`].
///
/// One resolver is meant to be built per process and shared behind an `Arc`.
/// [`resolve`](Self::resolve) never fails: provider errors, timeouts, empty
/// result sets and fully rejected result sets all become
/// [`MediaOutcome::NotFound`]. Timeouts and rate limiting are not cached;
/// every other outcome is.
pub struct MediaResolver {
    provider: Arc<dyn SearchProvider>,
    cache: MediaCache,
    inflight: InflightMap,
    config: ResolverConfig,
}

/// Drops the in-flight slot for a key once the caller holding its lock is done,
/// including when the `resolve` future is cancelled.
///
/// Only the slot this caller locked is removed; a newer slot for the same key
/// is left alone.
struct SlotRelease<'a> {
    inflight: &'a InflightMap,
    key: &'a CacheKey,
    slot: &'a Arc<Mutex<()>>,
}

impl Drop for SlotRelease<'_> {
    fn drop(&mut self) {
        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        if inflight.get(self.key).is_some_and(|current| Arc::ptr_eq(current, self.slot)) {
            inflight.remove(self.key);
        }
    }
}

impl MediaResolver {
    pub fn new(provider: Arc<dyn SearchProvider>, config: ResolverConfig) -> Self {
        Self {
            provider,
            cache: MediaCache::new(config.capacity, config.ttl),
            inflight: StdMutex::new(HashMap::new()),
            config,
        }
    }

    /// Resolve a subject to a media URL.
    ///
    /// At most one provider call is made per key and TTL window. Concurrent
    /// misses for the same key wait on the first caller's lookup.
    pub async fn resolve(&self, subject: &str, kind: MediaKind) -> MediaOutcome {
        let key = CacheKey::new(subject, kind);

        if let Some(outcome) = self.cache.get(&key).await {
            tracing::debug!(subject = key.subject(), %kind, found = outcome.is_found(), "media cache hit");
            return outcome;
        }

        let slot = self.inflight_slot(&key);
        let _turn = slot.lock().await;
        let _release = SlotRelease { inflight: &self.inflight, key: &key, slot: &slot };

        if let Some(outcome) = self.cache.get(&key).await {
            tracing::debug!(subject = key.subject(), %kind, "media resolved by concurrent lookup");
            return outcome;
        }

        match self.lookup(subject, kind).await {
            Lookup::Settled(outcome) => {
                self.cache.insert(key.clone(), outcome.clone()).await;
                outcome
            }
            Lookup::Transient => MediaOutcome::NotFound,
        }
    }

    fn inflight_slot(&self, key: &CacheKey) -> Arc<Mutex<()>> {
        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);
        inflight.entry(key.clone()).or_default().clone()
    }

    /// Query the provider and apply the selection policy.
    async fn lookup(&self, subject: &str, kind: MediaKind) -> Lookup {
        let query = self.build_query(subject, kind);
        tracing::debug!(query = %query.text, %kind, "media cache miss, querying provider");

        let results = match tokio::time::timeout(self.config.timeout, self.provider.search(&query)).await {
            Ok(Ok(results)) => results,
            Ok(Err(e)) if e.is_transient() => {
                tracing::warn!(query = %query.text, %kind, error = %e, "media search unavailable, not caching");
                return Lookup::Transient;
            }
            Ok(Err(e)) => {
                tracing::warn!(query = %query.text, %kind, error = %e, "media search failed");
                return Lookup::Settled(MediaOutcome::NotFound);
            }
            Err(_) => {
                tracing::warn!(query = %query.text, %kind, timeout = ?self.config.timeout, "media search timed out");
                return Lookup::Transient;
            }
        };

        if results.is_empty() {
            tracing::debug!(query = %query.text, %kind, "media search returned no results");
            return Lookup::Settled(MediaOutcome::NotFound);
        }

        let outcome = MediaOutcome::from(select_url(&results, kind));
        tracing::debug!(
            query = %query.text,
            %kind,
            candidates = results.len(),
            found = outcome.is_found(),
            "media search completed"
        );
        Lookup::Settled(outcome)
    }

    /// The query uses the raw subject; only the cache key is normalised.
    fn build_query(&self, subject: &str, kind: MediaKind) -> SearchQuery {
        SearchQuery {
            text: format!("{}{}", subject, self.config.query_suffix),
            kind,
            region: self.config.region.clone(),
            safesearch: self.config.safesearch,
            max_results: self.config.max_results,
        }
    }

    /// Number of cached outcomes, expired ones included until next touched.
    pub async fn cached_len(&self) -> usize {
        self.cache.len().await
    }

    /// Drop every cached outcome.
    pub async fn clear(&self) {
        self.cache.clear().await;
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}
