//! Infrastructure layer with adapters for the transcoding core.

/// Bulk archive packaging.
pub mod archive;
/// In-memory artifact cache and background sweeper.
pub mod cache;
/// `image`-crate backed transcoder.
pub mod codec;
/// Core configuration.
pub mod config;

pub use archive::ZipPackager;
pub use cache::{CacheStats, CacheSweeper, MemoryArtifactCache};
pub use codec::ImageTranscoder;
pub use config::ForgeConfig;
