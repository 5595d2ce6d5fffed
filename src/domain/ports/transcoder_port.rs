//! Port definition for the image transcoder.

use crate::domain::entities::{ArtifactSummary, InputFile, OutputFormat};
use crate::domain::errors::TranscodeResult;

/// Port for transforming one raw input into one cached artifact.
///
/// Implementations decode the input, re-encode at the requested format and
/// quality, and insert the resulting artifact into the shared cache before
/// returning. Callers only ever see the summary; retrieval of the encoded
/// bytes goes through the cache.
#[async_trait::async_trait]
pub trait TranscoderPort: Send + Sync {
    /// Transcodes a single file.
    ///
    /// # Errors
    /// `Decode` for malformed input, `Encode` for codec failure,
    /// `InputTooLarge` when the input exceeds the configured cap.
    async fn transcode(
        &self,
        file: InputFile,
        format: OutputFormat,
        quality: u8,
    ) -> TranscodeResult<ArtifactSummary>;
}
