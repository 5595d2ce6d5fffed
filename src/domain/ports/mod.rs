//! Port definitions for the transcoding core.

mod artifact_cache_port;
mod transcoder_port;

pub use artifact_cache_port::ArtifactCachePort;
pub use transcoder_port::TranscoderPort;
