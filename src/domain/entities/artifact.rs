//! Transcoded artifact entities.

use std::fmt;
use std::time::Instant;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::format::OutputFormat;

/// Opaque unique identifier of a cached artifact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing identifier string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// One transcoded result held in the artifact cache.
///
/// Immutable once created; only its recency position in the cache changes.
/// The MIME type and byte size derive from `format` and `bytes`.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Cache key, generated at creation.
    pub id: ArtifactId,
    /// Encoded output content.
    pub bytes: Bytes,
    /// Caller-supplied source filename. Not guaranteed unique.
    pub original_name: String,
    /// Canonical output format.
    pub format: OutputFormat,
    /// Insertion timestamp, used for age-based eviction.
    pub created_at: Instant,
    /// Pixel dimensions of the source image.
    pub dimensions: Dimensions,
}

impl Artifact {
    /// MIME type matching the output format.
    #[must_use]
    pub const fn mime(&self) -> &'static str {
        self.format.mime()
    }

    /// Length of the encoded content in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Default download name, `{original_name}.{extension}`.
    #[must_use]
    pub fn download_name(&self) -> String {
        format!("{}.{}", self.original_name, self.format.extension())
    }

    /// Builds the lightweight summary handed back to the submitter.
    #[must_use]
    pub fn summary(&self) -> ArtifactSummary {
        ArtifactSummary {
            id: self.id.clone(),
            original_name: self.original_name.clone(),
            format: self.format,
            size_bytes: self.size_bytes(),
            dimensions: self.dimensions,
        }
    }
}

/// Per-file result of a successful transcode.
///
/// Carries everything the caller needs to fetch the artifact later; the
/// encoded bytes themselves stay in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSummary {
    /// Cache key to fetch the artifact with.
    pub id: ArtifactId,
    /// Caller-supplied source filename.
    pub original_name: String,
    /// Canonical output format.
    pub format: OutputFormat,
    /// Encoded size in bytes.
    pub size_bytes: usize,
    /// Pixel dimensions of the source image.
    pub dimensions: Dimensions,
}
