//! Batch submission inputs and the combined outcome report.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::artifact::ArtifactSummary;

/// One raw input file of a batch submission.
#[derive(Debug, Clone)]
pub struct InputFile {
    /// Caller-supplied filename, echoed into results and failure records.
    pub original_name: String,
    /// Raw image content.
    pub bytes: Bytes,
}

impl InputFile {
    /// Creates an input file from a name and raw content.
    #[must_use]
    pub fn new(original_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            original_name: original_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Per-file error record. A failure never aborts the batch or any sibling
/// file's processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// Filename of the file that failed.
    pub original_name: String,
    /// Human-readable failure reason.
    pub reason: String,
}

/// Combined report of a batch run.
///
/// Always produced, even when every file fails; callers distinguish
/// "operation failed" from "zero successes" explicitly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Summaries of successfully transcoded files, in group order.
    pub results: Vec<ArtifactSummary>,
    /// Per-file failure records, in group order.
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    /// Number of files transcoded successfully.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.results.len()
    }

    /// Number of files that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// True when at least one file succeeded.
    #[must_use]
    pub fn any_succeeded(&self) -> bool {
        !self.results.is_empty()
    }
}
