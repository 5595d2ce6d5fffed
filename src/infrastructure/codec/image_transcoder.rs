//! `image`-crate backed transcoder implementation.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use tracing::debug;

use crate::domain::entities::{
    Artifact, ArtifactId, ArtifactSummary, Dimensions, InputFile, OutputFormat,
};
use crate::domain::errors::{TranscodeError, TranscodeResult};
use crate::domain::ports::{ArtifactCachePort, TranscoderPort};

/// Transcodes raw uploads through the `image` crate and stores results in
/// the shared artifact cache.
///
/// Decode and encode are CPU-bound and run on the blocking pool; the cache
/// lock is only taken after the codec work finishes, never across it. The
/// input buffer is dropped as soon as the codec is done with it.
pub struct ImageTranscoder {
    cache: Arc<dyn ArtifactCachePort>,
    max_input_bytes: usize,
}

impl ImageTranscoder {
    /// Creates a transcoder writing into `cache`. `max_input_bytes` caps the
    /// size of a single raw input; `0` disables the check.
    #[must_use]
    pub fn new(cache: Arc<dyn ArtifactCachePort>, max_input_bytes: usize) -> Self {
        Self {
            cache,
            max_input_bytes,
        }
    }
}

#[async_trait::async_trait]
impl TranscoderPort for ImageTranscoder {
    async fn transcode(
        &self,
        file: InputFile,
        format: OutputFormat,
        quality: u8,
    ) -> TranscodeResult<ArtifactSummary> {
        let InputFile {
            original_name,
            bytes,
        } = file;

        if self.max_input_bytes > 0 && bytes.len() > self.max_input_bytes {
            return Err(TranscodeError::input_too_large(
                original_name,
                bytes.len(),
                self.max_input_bytes,
            ));
        }

        let name = original_name.clone();
        let (encoded, dimensions) =
            tokio::task::spawn_blocking(move || encode_bytes(&bytes, format, quality, &name))
                .await
                .map_err(|e| {
                    TranscodeError::encode(&original_name, format!("codec task panicked: {e}"))
                })??;

        let artifact = Artifact {
            id: ArtifactId::generate(),
            bytes: encoded,
            original_name,
            format,
            created_at: Instant::now(),
            dimensions,
        };
        let summary = artifact.summary();

        debug!(
            id = %summary.id,
            file = %summary.original_name,
            format = %format,
            size = summary.size_bytes,
            "Transcoded image"
        );
        self.cache.put(artifact).await;

        Ok(summary)
    }
}

/// Decodes `raw`, re-encodes at the requested format and quality, and
/// returns the output with the source dimensions. Runs on the blocking pool.
fn encode_bytes(
    raw: &[u8],
    format: OutputFormat,
    quality: u8,
    name: &str,
) -> TranscodeResult<(Bytes, Dimensions)> {
    let img =
        image::load_from_memory(raw).map_err(|e| TranscodeError::decode(name, e.to_string()))?;
    let dimensions = Dimensions {
        width: img.width(),
        height: img.height(),
    };

    let mut out = Vec::new();
    let result = match format {
        OutputFormat::Jpg => {
            // The JPEG encoder takes 8-bit RGB or luma only.
            let img = match img {
                DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => img,
                other => DynamicImage::ImageRgb8(other.to_rgb8()),
            };
            img.write_with_encoder(JpegEncoder::new_with_quality(
                &mut Cursor::new(&mut out),
                quality,
            ))
        }
        OutputFormat::Png => img.write_with_encoder(PngEncoder::new(&mut Cursor::new(&mut out))),
        OutputFormat::Webp => {
            // WebP through the `image` crate is lossless and limited to
            // 8-bit RGB(A); the quality knob only drives JPEG output.
            let img = match img {
                DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => img,
                other => DynamicImage::ImageRgba8(other.to_rgba8()),
            };
            img.write_with_encoder(WebPEncoder::new_lossless(&mut Cursor::new(&mut out)))
        }
    };
    result.map_err(|e| TranscodeError::encode(name, e.to_string()))?;

    Ok((Bytes::from(out), dimensions))
}
