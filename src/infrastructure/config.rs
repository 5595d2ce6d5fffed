//! Core configuration.

use std::time::Duration;

use crate::application::BatchConfig;
use crate::infrastructure::archive::DEFAULT_COMPRESSION_LEVEL;
use crate::infrastructure::cache::DEFAULT_CACHE_CAPACITY;

/// Default quality applied when callers do not specify one.
pub const DEFAULT_QUALITY: u8 = 80;

/// Default cap on a single raw input, in bytes.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Top-level tuning for the transcoding core.
///
/// Every knob from the reference configuration is here; [`Default`] matches
/// the reference values. Nothing is persisted: the whole core is
/// process-memory-resident and a restart loses all cached artifacts.
#[derive(Debug, Clone)]
pub struct ForgeConfig {
    /// Maximum artifacts held in the cache.
    pub cache_capacity: usize,
    /// Age bound for the periodic sweep.
    pub cache_max_age: Duration,
    /// How often the sweep runs.
    pub sweep_period: Duration,
    /// Files per scheduling group.
    pub batch_size: usize,
    /// Groups concurrently in flight per window.
    pub max_concurrent_groups: usize,
    /// Pause between concurrency windows.
    pub window_delay: Duration,
    /// Deflate level for bulk archives.
    pub compression_level: i32,
    /// Per-file input cap in bytes; `0` disables the check.
    pub max_input_bytes: usize,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_max_age: Duration::from_secs(3600),
            sweep_period: Duration::from_secs(3600),
            batch_size: 5,
            max_concurrent_groups: 2,
            window_delay: Duration::from_millis(100),
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl ForgeConfig {
    /// The scheduler's view of this configuration.
    #[must_use]
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            batch_size: self.batch_size,
            max_concurrent_groups: self.max_concurrent_groups,
            window_delay: self.window_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_configuration() {
        let config = ForgeConfig::default();
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.cache_max_age, Duration::from_secs(3600));
        assert_eq!(config.sweep_period, Duration::from_secs(3600));
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.max_concurrent_groups, 2);
        assert_eq!(config.window_delay, Duration::from_millis(100));
        assert_eq!(config.compression_level, 6);
        assert_eq!(config.max_input_bytes, 10 * 1024 * 1024);
        assert_eq!(DEFAULT_QUALITY, 80);
    }
}
