//! In-memory LRU artifact cache implementation.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use lru::LruCache;
use tokio::sync::RwLock;
use tracing::{debug, trace};

use crate::domain::entities::{Artifact, ArtifactId};
use crate::domain::ports::ArtifactCachePort;

/// Default maximum number of artifacts to cache in memory.
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

/// In-memory LRU cache for transcoded artifacts.
///
/// The `lru` crate provides the O(1) hash-map-plus-linked-list recency
/// structure; every operation that touches recency takes the write lock,
/// so lookups, inserts, removals and sweeps are mutually exclusive. The
/// lock is never held across a transcode.
pub struct MemoryArtifactCache {
    entries: RwLock<LruCache<ArtifactId, Arc<Artifact>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryArtifactCache {
    /// Creates a new cache with the specified capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: RwLock::new(LruCache::new(cap)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Creates a new cache with the default capacity.
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }

    /// Returns cache statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 {
            (hits as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        CacheStats {
            hits,
            misses,
            hit_rate,
            size: ArtifactCachePort::len(self),
        }
    }
}

impl Default for MemoryArtifactCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Hit rate as a percentage.
    pub hit_rate: f64,
    /// Current number of cached artifacts.
    pub size: usize,
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cache: {} artifacts, {:.1}% hit rate ({} hits, {} misses)",
            self.size, self.hit_rate, self.hits, self.misses
        )
    }
}

#[async_trait::async_trait]
impl ArtifactCachePort for MemoryArtifactCache {
    async fn get(&self, id: &ArtifactId) -> Option<Arc<Artifact>> {
        let mut entries = self.entries.write().await;
        if let Some(artifact) = entries.get(id) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(id = %id, "Artifact cache hit");
            Some(artifact.clone())
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            trace!(id = %id, "Artifact cache miss");
            None
        }
    }

    async fn put(&self, artifact: Artifact) {
        let id = artifact.id.clone();
        let mut entries = self.entries.write().await;
        debug!(id = %id, size = artifact.size_bytes(), "Storing artifact");
        if let Some((evicted_id, _)) = entries.push(id.clone(), Arc::new(artifact)) {
            if evicted_id != id {
                debug!(id = %evicted_id, "Evicted least-recently-used artifact");
            }
        }
    }

    async fn remove(&self, id: &ArtifactId) {
        let mut entries = self.entries.write().await;
        if entries.pop(id).is_some() {
            debug!(id = %id, "Removed artifact from cache");
        }
    }

    async fn sweep_expired(&self, now: Instant, max_age: Duration) -> usize {
        let mut entries = self.entries.write().await;
        let expired: Vec<ArtifactId> = entries
            .iter()
            .filter(|(_, artifact)| {
                now.checked_duration_since(artifact.created_at)
                    .is_some_and(|age| age > max_age)
            })
            .map(|(id, _)| id.clone())
            .collect();

        for id in &expired {
            entries.pop(id);
            trace!(id = %id, "Swept expired artifact");
        }
        expired.len()
    }

    fn len(&self) -> usize {
        // Best-effort: a concurrent writer may briefly hold the lock.
        self.entries.try_read().map(|e| e.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Dimensions, OutputFormat};
    use bytes::Bytes;

    fn artifact(name: &str) -> Artifact {
        artifact_created_at(name, Instant::now())
    }

    fn artifact_created_at(name: &str, created_at: Instant) -> Artifact {
        Artifact {
            id: ArtifactId::generate(),
            bytes: Bytes::from_static(b"payload"),
            original_name: name.to_string(),
            format: OutputFormat::Webp,
            created_at,
            dimensions: Dimensions {
                width: 8,
                height: 8,
            },
        }
    }

    #[tokio::test]
    async fn put_and_get_round_trip() {
        let cache = MemoryArtifactCache::new(10);
        let a = artifact("a");
        let id = a.id.clone();

        cache.put(a).await;
        let fetched = cache.get(&id).await.unwrap();
        assert_eq!(fetched.original_name, "a");
        assert_eq!(fetched.bytes, Bytes::from_static(b"payload"));
    }

    #[tokio::test]
    async fn miss_is_none_not_error() {
        let cache = MemoryArtifactCache::new(10);
        assert!(cache.get(&ArtifactId::generate()).await.is_none());
    }

    #[tokio::test]
    async fn capacity_invariant_holds_across_inserts() {
        let cache = MemoryArtifactCache::new(3);
        for i in 0..10 {
            cache.put(artifact(&format!("f{i}"))).await;
            assert!(ArtifactCachePort::len(&cache) <= 3);
        }
        assert_eq!(ArtifactCachePort::len(&cache), 3);
    }

    #[tokio::test]
    async fn first_inserted_is_evicted_without_intervening_gets() {
        let cache = MemoryArtifactCache::new(3);
        let first = artifact("first");
        let first_id = first.id.clone();

        cache.put(first).await;
        cache.put(artifact("b")).await;
        cache.put(artifact("c")).await;
        cache.put(artifact("d")).await;

        assert!(cache.get(&first_id).await.is_none());
    }

    #[tokio::test]
    async fn get_promotes_entry_to_most_recently_used() {
        let cache = MemoryArtifactCache::new(3);
        let a = artifact("a");
        let b = artifact("b");
        let a_id = a.id.clone();
        let b_id = b.id.clone();

        cache.put(a).await;
        cache.put(b).await;
        cache.put(artifact("c")).await;

        // Touch a, then insert past capacity: b is now the LRU victim.
        cache.get(&a_id).await.unwrap();
        cache.put(artifact("d")).await;

        assert!(cache.get(&a_id).await.is_some());
        assert!(cache.get(&b_id).await.is_none());
    }

    #[tokio::test]
    async fn remove_is_unconditional() {
        let cache = MemoryArtifactCache::new(3);
        let a = artifact("a");
        let id = a.id.clone();

        cache.put(a).await;
        cache.remove(&id).await;
        assert!(cache.get(&id).await.is_none());

        // Removing an absent id is a no-op.
        cache.remove(&id).await;
    }

    #[tokio::test]
    async fn sweep_respects_age_boundary() {
        let cache = MemoryArtifactCache::new(10);
        let max_age = Duration::from_secs(3600);
        let base = Instant::now();

        // Sweep from a vantage point one second past the stale entry's age
        // bound; the fresh entry sits two seconds inside it.
        let stale = artifact_created_at("stale", base);
        let fresh = artifact_created_at("fresh", base + Duration::from_secs(2));
        let stale_id = stale.id.clone();
        let fresh_id = fresh.id.clone();

        cache.put(stale).await;
        cache.put(fresh).await;

        let now = base + max_age + Duration::from_secs(1);
        let removed = cache.sweep_expired(now, max_age).await;
        assert_eq!(removed, 1);
        assert!(cache.get(&stale_id).await.is_none());
        assert!(cache.get(&fresh_id).await.is_some());
    }

    #[tokio::test]
    async fn sweep_ignores_recency() {
        let cache = MemoryArtifactCache::new(10);
        let max_age = Duration::from_secs(60);
        let base = Instant::now();

        let stale = artifact_created_at("stale", base);
        let stale_id = stale.id.clone();
        cache.put(stale).await;

        // A hit promotes the entry but must not refresh its age.
        cache.get(&stale_id).await.unwrap();

        let now = base + Duration::from_secs(120);
        assert_eq!(cache.sweep_expired(now, max_age).await, 1);
        assert!(cache.get(&stale_id).await.is_none());
    }

    #[tokio::test]
    async fn stats_track_hits_and_misses() {
        let cache = MemoryArtifactCache::new(10);
        let a = artifact("a");
        let id = a.id.clone();
        cache.put(a).await;

        let _ = cache.get(&id).await;
        let _ = cache.get(&ArtifactId::generate()).await;

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }
}
