//! Port definition for the shared artifact store.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::entities::{Artifact, ArtifactId};

/// Port for the bounded, recency-ordered artifact store.
///
/// Implementations must be thread-safe and must serialize every recency
/// mutation (insert, promote, evict, sweep) relative to each other: a
/// lookup concurrent with a sweep must never observe a torn recency state.
#[async_trait::async_trait]
pub trait ArtifactCachePort: Send + Sync {
    /// Looks up an artifact, promoting it to most-recently-used on hit.
    /// A miss (unknown or expired id) is `None`, not an error.
    async fn get(&self, id: &ArtifactId) -> Option<Arc<Artifact>>;

    /// Inserts an artifact, evicting the least-recently-used entry first
    /// when at capacity. The inserted entry becomes most-recently-used.
    async fn put(&self, artifact: Artifact);

    /// Removes an entry unconditionally.
    async fn remove(&self, id: &ArtifactId);

    /// Removes every entry older than `max_age` relative to `now`,
    /// regardless of recency. Returns the number of entries removed.
    async fn sweep_expired(&self, now: Instant, max_age: Duration) -> usize;

    /// Current number of cached artifacts.
    fn len(&self) -> usize;

    /// True when the cache holds no artifacts.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
