//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{Artifact, ArtifactId, ArtifactSummary, InputFile, OutputFormat};
pub use errors::{TranscodeError, TranscodeResult};
pub use ports::{ArtifactCachePort, TranscoderPort};
