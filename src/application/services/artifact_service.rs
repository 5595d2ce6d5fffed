//! Facade over the transcoding core.

use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use crate::domain::entities::{ArtifactId, BatchOutcome, InputFile, OutputFormat};
use crate::domain::errors::{TranscodeError, TranscodeResult};
use crate::domain::ports::{ArtifactCachePort, TranscoderPort};
use crate::infrastructure::archive::ZipPackager;

use super::batch_scheduler::{BatchConfig, BatchScheduler};

/// Lowest accepted quality value.
pub const MIN_QUALITY: u8 = 1;
/// Highest accepted quality value.
pub const MAX_QUALITY: u8 = 100;

/// Everything a transport needs to serve one fetched artifact.
#[derive(Debug, Clone)]
pub struct FetchedArtifact {
    /// Encoded content.
    pub bytes: Bytes,
    /// MIME type of the content.
    pub mime: &'static str,
    /// Default download filename, `{original_name}.{extension}`.
    pub suggested_filename: String,
}

/// Application facade over the transcoding core.
///
/// Owns the shared cache handle, the batch scheduler and the bulk
/// packager. The out-of-scope HTTP layer maps requests directly onto the
/// three operations here; nothing is persisted across restarts.
pub struct ArtifactService {
    cache: Arc<dyn ArtifactCachePort>,
    scheduler: BatchScheduler,
    packager: ZipPackager,
}

impl ArtifactService {
    /// Wires the facade from its collaborators.
    #[must_use]
    pub fn new(
        cache: Arc<dyn ArtifactCachePort>,
        transcoder: Arc<dyn TranscoderPort>,
        batch_config: BatchConfig,
        compression_level: i32,
    ) -> Self {
        Self {
            scheduler: BatchScheduler::new(transcoder, batch_config),
            packager: ZipPackager::new(cache.clone(), compression_level),
            cache,
        }
    }

    /// Validates the whole submission, then runs the batch.
    ///
    /// Format and quality are checked once, before any transcoding starts:
    /// an invalid submission is rejected as a whole. Past that point,
    /// per-file failures are downgraded to records inside the outcome and
    /// the call itself succeeds even when every file fails.
    ///
    /// # Errors
    /// `EmptyBatch`, `UnsupportedFormat` or `QualityOutOfRange`, all raised
    /// before the first transcode.
    pub async fn submit_batch(
        &self,
        files: Vec<InputFile>,
        format: &str,
        quality: u8,
    ) -> TranscodeResult<BatchOutcome> {
        if files.is_empty() {
            return Err(TranscodeError::EmptyBatch);
        }
        let format: OutputFormat = format.parse()?;
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&quality) {
            return Err(TranscodeError::QualityOutOfRange { quality });
        }

        debug!(files = files.len(), format = %format, quality, "Accepted batch submission");
        Ok(self.scheduler.run_batch(files, format, quality).await)
    }

    /// Fetches one artifact by id.
    ///
    /// A miss (unknown or expired id) is `None`, not an error; the hit
    /// promotes the artifact to most-recently-used. Repeated fetches of a
    /// live artifact return byte-identical content.
    pub async fn fetch_artifact(&self, id: &ArtifactId) -> Option<FetchedArtifact> {
        let artifact = self.cache.get(id).await?;
        Some(FetchedArtifact {
            bytes: artifact.bytes.clone(),
            mime: artifact.mime(),
            suggested_filename: artifact.download_name(),
        })
    }

    /// Packs several artifacts into one zip archive, skipping ids that no
    /// longer resolve.
    ///
    /// # Errors
    /// `NoArtifactsFound` when zero of the requested ids resolve.
    pub async fn fetch_bulk(&self, ids: &[ArtifactId]) -> TranscodeResult<Vec<u8>> {
        self.packager.pack(ids).await
    }

    /// Current number of cached artifacts.
    #[must_use]
    pub fn cached_artifacts(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ArtifactSummary, Dimensions};
    use crate::infrastructure::archive::DEFAULT_COMPRESSION_LEVEL;
    use crate::infrastructure::cache::MemoryArtifactCache;
    use crate::infrastructure::codec::ImageTranscoder;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use test_case::test_case;

    /// Counts transcode calls so validation tests can prove fail-fast.
    struct CountingTranscoder {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl TranscoderPort for CountingTranscoder {
        async fn transcode(
            &self,
            file: InputFile,
            format: OutputFormat,
            _quality: u8,
        ) -> TranscodeResult<ArtifactSummary> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ArtifactSummary {
                id: ArtifactId::generate(),
                original_name: file.original_name,
                format,
                size_bytes: file.bytes.len(),
                dimensions: Dimensions {
                    width: 1,
                    height: 1,
                },
            })
        }
    }

    fn counting_service() -> (ArtifactService, Arc<CountingTranscoder>) {
        let cache: Arc<dyn ArtifactCachePort> = Arc::new(MemoryArtifactCache::new(10));
        let transcoder = Arc::new(CountingTranscoder {
            calls: AtomicUsize::new(0),
        });
        let service = ArtifactService::new(
            cache,
            transcoder.clone(),
            BatchConfig::default(),
            DEFAULT_COMPRESSION_LEVEL,
        );
        (service, transcoder)
    }

    fn real_service() -> ArtifactService {
        let cache: Arc<dyn ArtifactCachePort> = Arc::new(MemoryArtifactCache::new(10));
        let transcoder: Arc<dyn TranscoderPort> = Arc::new(ImageTranscoder::new(cache.clone(), 0));
        ArtifactService::new(
            cache,
            transcoder,
            BatchConfig::default(),
            DEFAULT_COMPRESSION_LEVEL,
        )
    }

    fn png_file(name: &str) -> InputFile {
        let img = image::DynamicImage::new_rgb8(4, 4);
        let mut out = Vec::new();
        img.write_with_encoder(image::codecs::png::PngEncoder::new(&mut Cursor::new(
            &mut out,
        )))
        .unwrap();
        InputFile::new(name, out)
    }

    #[test_case(0)]
    #[test_case(101)]
    #[tokio::test]
    async fn out_of_range_quality_is_rejected_before_transcoding(quality: u8) {
        let (service, transcoder) = counting_service();

        let err = service
            .submit_batch(vec![png_file("a")], "webp", quality)
            .await
            .unwrap_err();

        assert_eq!(err, TranscodeError::QualityOutOfRange { quality });
        assert_eq!(transcoder.calls.load(Ordering::SeqCst), 0);
    }

    #[test_case(1)]
    #[test_case(100)]
    #[tokio::test]
    async fn boundary_qualities_are_accepted(quality: u8) {
        let (service, _) = counting_service();

        let outcome = service
            .submit_batch(vec![png_file("a")], "webp", quality)
            .await
            .unwrap();
        assert_eq!(outcome.processed(), 1);
    }

    #[tokio::test]
    async fn unsupported_format_fails_before_any_transcode() {
        let (service, transcoder) = counting_service();

        let err = service
            .submit_batch(vec![png_file("a"), png_file("b")], "gif", 80)
            .await
            .unwrap_err();

        assert!(matches!(err, TranscodeError::UnsupportedFormat { ref format } if format == "gif"));
        assert_eq!(transcoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_submission_is_rejected() {
        let (service, _) = counting_service();

        let err = service.submit_batch(Vec::new(), "webp", 80).await.unwrap_err();
        assert_eq!(err, TranscodeError::EmptyBatch);
    }

    #[tokio::test]
    async fn repeated_fetches_return_identical_bytes() {
        let service = real_service();

        let outcome = service
            .submit_batch(vec![png_file("stable")], "png", 80)
            .await
            .unwrap();
        let id = outcome.results[0].id.clone();

        let first = service.fetch_artifact(&id).await.unwrap();
        let second = service.fetch_artifact(&id).await.unwrap();

        assert_eq!(first.bytes, second.bytes);
        assert_eq!(first.mime, "image/png");
        assert_eq!(first.suggested_filename, "stable.png");
    }

    #[tokio::test]
    async fn fetch_miss_is_none() {
        let service = real_service();
        assert!(service.fetch_artifact(&ArtifactId::generate()).await.is_none());
    }

    #[tokio::test]
    async fn bulk_fetch_skips_unknown_ids() {
        let service = real_service();

        let outcome = service
            .submit_batch(vec![png_file("kept")], "jpg", 80)
            .await
            .unwrap();
        let valid = outcome.results[0].id.clone();

        let archive = service
            .fetch_bulk(&[valid, ArtifactId::generate()])
            .await
            .unwrap();
        let zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        assert_eq!(zip.len(), 1);

        let err = service
            .fetch_bulk(&[ArtifactId::generate()])
            .await
            .unwrap_err();
        assert_eq!(err, TranscodeError::NoArtifactsFound);
    }

    #[tokio::test]
    async fn submission_with_corrupt_file_reports_partial_success() {
        let service = real_service();

        let outcome = service
            .submit_batch(
                vec![
                    png_file("good-1"),
                    InputFile::new("broken", b"not an image".as_slice()),
                    png_file("good-2"),
                ],
                "webp",
                80,
            )
            .await
            .unwrap();

        assert_eq!(outcome.processed(), 2);
        assert_eq!(outcome.failed(), 1);
        assert_eq!(outcome.failures[0].original_name, "broken");
        assert_eq!(service.cached_artifacts(), 2);
    }
}
