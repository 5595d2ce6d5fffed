//! Target output format resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::TranscodeError;

/// Canonical target format for a transcode request.
///
/// Resolves the caller-supplied, case-insensitive format string into a fixed
/// `(extension, MIME)` pair. Anything outside this closed set is rejected
/// before transcoding starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// WebP output. The default target when callers do not specify one.
    #[default]
    Webp,
    /// JPEG output. `jpeg` and `jpg` both normalize to `jpg`.
    Jpg,
    /// PNG output.
    Png,
}

impl OutputFormat {
    /// Canonical file extension, without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Webp => "webp",
            Self::Jpg => "jpg",
            Self::Png => "png",
        }
    }

    /// Matching MIME type.
    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Webp => "image/webp",
            Self::Jpg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = TranscodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "webp" => Ok(Self::Webp),
            "jpeg" | "jpg" => Ok(Self::Jpg),
            "png" => Ok(Self::Png),
            _ => Err(TranscodeError::unsupported_format(s)),
        }
    }
}
