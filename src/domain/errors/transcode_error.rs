//! Transcoding error taxonomy.

use thiserror::Error;

/// Result type for transcoding and packaging operations.
pub type TranscodeResult<T> = std::result::Result<T, TranscodeError>;

/// Closed error set for batch submission, transcoding and bulk packaging.
///
/// A cache miss on single fetch is deliberately *not* represented here:
/// an unknown or expired id is an expected outcome and surfaces as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscodeError {
    /// Requested target format is outside the supported set.
    #[error("unsupported format: {format}")]
    UnsupportedFormat {
        /// The format string as the caller supplied it.
        format: String,
    },

    /// Requested quality is outside `[1, 100]`.
    #[error("quality {quality} out of range, must be between 1 and 100")]
    QualityOutOfRange {
        /// The rejected quality value.
        quality: u8,
    },

    /// Input bytes could not be decoded as an image.
    #[error("failed to decode {file}: {reason}")]
    Decode {
        /// Filename of the offending input.
        file: String,
        /// Codec diagnostic.
        reason: String,
    },

    /// The codec failed to produce output.
    #[error("failed to encode {file}: {reason}")]
    Encode {
        /// Filename of the offending input.
        file: String,
        /// Codec diagnostic.
        reason: String,
    },

    /// Input file exceeds the configured size cap.
    #[error("{file} is {size} bytes, limit is {limit} bytes")]
    InputTooLarge {
        /// Filename of the offending input.
        file: String,
        /// Actual input size in bytes.
        size: usize,
        /// Configured cap in bytes.
        limit: usize,
    },

    /// A batch submission carried no files.
    #[error("no files submitted")]
    EmptyBatch,

    /// A bulk request resolved zero artifacts.
    #[error("none of the requested artifacts were found")]
    NoArtifactsFound,
}

impl TranscodeError {
    /// Creates an unsupported-format error.
    #[must_use]
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Creates a decode error for a single file.
    #[must_use]
    pub fn decode(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Creates an encode error for a single file.
    #[must_use]
    pub fn encode(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Encode {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Creates an input-too-large error for a single file.
    #[must_use]
    pub fn input_too_large(file: impl Into<String>, size: usize, limit: usize) -> Self {
        Self::InputTooLarge {
            file: file.into(),
            size,
            limit,
        }
    }

    /// True when the error belongs to a single file rather than the whole
    /// submission. Per-file errors are downgraded to failure records by the
    /// batch scheduler instead of propagating.
    #[must_use]
    pub const fn is_per_file(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::Encode { .. } | Self::InputTooLarge { .. }
        )
    }
}
