//! Bounded in-memory cache of resolved media outcomes.
//!
//! Entries expire after a fixed TTL and the least-recently-used entry is
//! evicted once capacity is reached. Nothing is persisted.

use std::num::NonZeroUsize;
use std::time::Duration;

use lru::LruCache;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::{MediaKind, MediaOutcome};

/// Composite cache key: normalised subject + media kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Lowercased, trimmed subject.
    subject: String,
    kind: MediaKind,
}

impl CacheKey {
    /// Build a cache key so that `"Downward Dog"` and `"downward dog "` collide.
    pub fn new(subject: &str, kind: MediaKind) -> Self {
        Self { subject: subject.trim().to_lowercase(), kind }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }
}

/// Cached outcome with the instant it was produced.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    outcome: MediaOutcome,
    stored_at: Instant,
}

impl CacheEntry {
    pub fn new(outcome: MediaOutcome) -> Self {
        Self { outcome, stored_at: Instant::now() }
    }

    pub fn outcome(&self) -> &MediaOutcome {
        &self.outcome
    }

    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

/// LRU map of [`CacheKey`] to [`CacheEntry`] with TTL-based staleness.
pub struct MediaCache {
    entries: Mutex<LruCache<CacheKey, CacheEntry>>,
    ttl: Duration,
}

impl MediaCache {
    pub fn new(capacity: NonZeroUsize, ttl: Duration) -> Self {
        Self { entries: Mutex::new(LruCache::new(capacity)), ttl }
    }

    /// Look up a live outcome. Expired entries are dropped and reported as a miss.
    pub async fn get(&self, key: &CacheKey) -> Option<MediaOutcome> {
        let mut entries = self.entries.lock().await;
        let expired = match entries.get(key) {
            Some(entry) if !entry.is_expired(self.ttl) => return Some(entry.outcome.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            tracing::debug!(subject = key.subject(), kind = %key.kind(), "media cache entry expired");
            entries.pop(key);
        }
        None
    }

    /// Store an outcome, superseding any previous entry for the key.
    pub async fn insert(&self, key: CacheKey, outcome: MediaOutcome) {
        let mut entries = self.entries.lock().await;
        if let Some((evicted, _)) = entries.push(key.clone(), CacheEntry::new(outcome))
            && evicted != key
        {
            tracing::debug!(subject = evicted.subject(), kind = %evicted.kind(), "media cache evicted entry");
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
