//! Domain error types.

mod transcode_error;

pub use transcode_error::{TranscodeError, TranscodeResult};
