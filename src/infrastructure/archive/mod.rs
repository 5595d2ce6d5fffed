//! Bulk artifact packaging.

mod zip_packager;

pub use zip_packager::{DEFAULT_COMPRESSION_LEVEL, ZipPackager};
