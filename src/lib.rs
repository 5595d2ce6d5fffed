//! imgforge - A batch image transcoding core.
//!
//! This crate accepts batches of raw images, transcodes each to a target
//! format and quality, and keeps the results in a bounded, time-bounded
//! in-memory artifact cache for later single or bulk retrieval. The HTTP
//! layer, multipart parsing and the codec UI are deliberately out of scope;
//! transports map their requests onto [`ArtifactService`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the batch scheduler and service facade.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing the cache, codec and archive adapters.
pub mod infrastructure;

use std::sync::Arc;

pub use application::{ArtifactService, BatchConfig, BatchScheduler, FetchedArtifact};
pub use domain::entities::{
    Artifact, ArtifactId, ArtifactSummary, BatchFailure, BatchOutcome, Dimensions, InputFile,
    OutputFormat,
};
pub use domain::errors::{TranscodeError, TranscodeResult};
pub use domain::ports::{ArtifactCachePort, TranscoderPort};
pub use infrastructure::{
    CacheStats, CacheSweeper, ForgeConfig, ImageTranscoder, MemoryArtifactCache, ZipPackager,
};

/// Current version of the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Assembles the full core from one configuration: shared cache, background
/// age sweeper, `image`-crate codec and the service facade.
///
/// Must be called from within a tokio runtime, since the sweeper task is
/// spawned immediately. Call [`CacheSweeper::shutdown`] on termination to
/// stop the sweep loop cleanly.
#[must_use]
pub fn bootstrap(config: ForgeConfig) -> (ArtifactService, CacheSweeper) {
    let cache: Arc<dyn ArtifactCachePort> =
        Arc::new(MemoryArtifactCache::new(config.cache_capacity));
    let sweeper = CacheSweeper::spawn(cache.clone(), config.sweep_period, config.cache_max_age);
    let transcoder: Arc<dyn TranscoderPort> =
        Arc::new(ImageTranscoder::new(cache.clone(), config.max_input_bytes));
    let service = ArtifactService::new(
        cache,
        transcoder,
        config.batch_config(),
        config.compression_level,
    );
    (service, sweeper)
}
