//! Application layer wiring the scheduler, cache and packager together.

/// Service implementations.
pub mod services;

pub use services::{ArtifactService, BatchConfig, BatchScheduler, FetchedArtifact};
