//! Zip assembly of cached artifacts.

use std::io::{Cursor, Write};
use std::sync::Arc;

use tracing::{debug, trace};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::domain::entities::ArtifactId;
use crate::domain::errors::{TranscodeError, TranscodeResult};
use crate::domain::ports::ArtifactCachePort;

/// Default deflate level for bulk archives. Moderate on purpose: higher
/// levels cost CPU for little gain on already-compressed image payloads.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 6;

/// Assembles cached artifacts into one deflate-compressed zip archive.
pub struct ZipPackager {
    cache: Arc<dyn ArtifactCachePort>,
    compression_level: i32,
}

impl ZipPackager {
    /// Creates a packager reading from `cache` at the given deflate level.
    #[must_use]
    pub fn new(cache: Arc<dyn ArtifactCachePort>, compression_level: i32) -> Self {
        Self {
            cache,
            compression_level,
        }
    }

    /// Packs the artifacts behind `ids` into a zip archive.
    ///
    /// Ids that no longer resolve (evicted, expired or never issued) are
    /// silently skipped. Entries are named `{original_name}.{extension}`;
    /// colliding names are not deduplicated and readers resolve to the
    /// later entry. Each artifact's bytes are released as soon as its entry
    /// is written.
    ///
    /// # Errors
    /// `NoArtifactsFound` when zero of the requested ids resolve.
    pub async fn pack(&self, ids: &[ArtifactId]) -> TranscodeResult<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(self.compression_level));

        let mut packed = 0usize;
        for id in ids {
            let Some(artifact) = self.cache.get(id).await else {
                trace!(id = %id, "Skipping unknown or expired artifact");
                continue;
            };
            let entry_name = artifact.download_name();
            writer
                .start_file(&entry_name, options)
                .map_err(|e| archive_error(&entry_name, &e))?;
            writer
                .write_all(&artifact.bytes)
                .map_err(|e| archive_error(&entry_name, &e))?;
            drop(artifact);
            packed += 1;
        }

        if packed == 0 {
            return Err(TranscodeError::NoArtifactsFound);
        }

        let archive = writer
            .finish()
            .map_err(|e| archive_error("archive", &e))?
            .into_inner();
        debug!(
            entries = packed,
            requested = ids.len(),
            bytes = archive.len(),
            "Packed bulk archive"
        );
        Ok(archive)
    }
}

// Archive assembly is in-memory and practically infallible; a failure is
// treated like a codec failure on the offending entry.
fn archive_error(entry: &str, err: &dyn std::fmt::Display) -> TranscodeError {
    TranscodeError::encode(entry, format!("archive write failed: {err}"))
}
