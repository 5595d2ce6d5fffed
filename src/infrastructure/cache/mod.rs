//! Artifact caching.
//!
//! Two mechanisms bound the cache's memory, and both are necessary: LRU
//! eviction caps the entry count against high-volume clients, while the
//! periodic age sweep reclaims artifacts that were never collected even
//! when traffic stays below capacity.

mod memory_cache;
mod sweeper;

pub use memory_cache::{CacheStats, DEFAULT_CACHE_CAPACITY, MemoryArtifactCache};
pub use sweeper::CacheSweeper;
