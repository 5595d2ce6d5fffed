//! Domain entity definitions.

mod artifact;
mod batch;
mod format;

pub use artifact::{Artifact, ArtifactId, ArtifactSummary, Dimensions};
pub use batch::{BatchFailure, BatchOutcome, InputFile};
pub use format::OutputFormat;
