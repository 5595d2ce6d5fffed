mod artifact_service;
mod batch_scheduler;

pub use artifact_service::{ArtifactService, FetchedArtifact, MAX_QUALITY, MIN_QUALITY};
pub use batch_scheduler::{BatchConfig, BatchScheduler};
