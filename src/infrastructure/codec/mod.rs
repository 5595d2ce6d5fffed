//! Image transcoding via the `image` crate.

mod image_transcoder;

pub use image_transcoder::ImageTranscoder;
