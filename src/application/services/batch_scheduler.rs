//! Bounded-concurrency batch execution.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::domain::entities::{BatchFailure, BatchOutcome, InputFile, OutputFormat};
use crate::domain::ports::TranscoderPort;

/// Tuning knobs for batch scheduling.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Files per group.
    pub batch_size: usize,
    /// Groups concurrently in flight per window. `1` degenerates to strict
    /// sequential groups; it is the same mechanism, not a separate mode.
    pub max_concurrent_groups: usize,
    /// Pause between concurrency windows, capping sustained codec load.
    pub window_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            max_concurrent_groups: 2,
            window_delay: Duration::from_millis(100),
        }
    }
}

/// Runs a batch of transcodes under a bounded concurrency window.
///
/// Files are partitioned into groups of `batch_size`; each window admits up
/// to `max_concurrent_groups` groups, so at most `batch_size *
/// max_concurrent_groups` transcodes are in flight at any instant. The
/// whole window completes before the next is admitted, with a fixed delay
/// in between.
pub struct BatchScheduler {
    transcoder: Arc<dyn TranscoderPort>,
    config: BatchConfig,
}

impl BatchScheduler {
    /// Creates a scheduler driving `transcoder` with the given tuning.
    #[must_use]
    pub fn new(transcoder: Arc<dyn TranscoderPort>, config: BatchConfig) -> Self {
        Self { transcoder, config }
    }

    /// Transcodes every file, isolating per-file failures.
    ///
    /// The outcome is always produced: a file's decode or encode failure
    /// becomes a [`BatchFailure`] record and never aborts the batch or a
    /// sibling's processing. A panicked transcode task is recorded the same
    /// way. Group order is preserved in `results` and `failures`; order
    /// within a group follows submission, not completion.
    ///
    /// Spawned transcodes run to completion even if the caller stops
    /// waiting; their artifacts still land in the cache.
    pub async fn run_batch(
        &self,
        files: Vec<InputFile>,
        format: OutputFormat,
        quality: u8,
    ) -> BatchOutcome {
        let batch_size = self.config.batch_size.max(1);
        let groups_per_window = self.config.max_concurrent_groups.max(1);
        let total = files.len();

        let mut groups: Vec<Vec<InputFile>> = Vec::new();
        let mut iter = files.into_iter();
        loop {
            let group: Vec<InputFile> = iter.by_ref().take(batch_size).collect();
            if group.is_empty() {
                break;
            }
            groups.push(group);
        }

        debug!(
            files = total,
            groups = groups.len(),
            in_flight_bound = batch_size * groups_per_window,
            "Starting batch run"
        );

        let mut outcome = BatchOutcome::default();
        let mut groups = groups.into_iter().peekable();
        let mut first_window = true;

        while groups.peek().is_some() {
            if !first_window {
                tokio::time::sleep(self.config.window_delay).await;
            }
            first_window = false;

            // Spawn the full window before awaiting anything, so every file
            // in it transcodes concurrently.
            let window: Vec<Vec<InputFile>> = groups.by_ref().take(groups_per_window).collect();
            let mut window_handles = Vec::with_capacity(window.len());
            for group in window {
                let mut handles = Vec::with_capacity(group.len());
                for file in group {
                    let transcoder = self.transcoder.clone();
                    let name = file.original_name.clone();
                    let task =
                        tokio::spawn(
                            async move { transcoder.transcode(file, format, quality).await },
                        );
                    handles.push((name, task));
                }
                window_handles.push(handles);
            }

            for handles in window_handles {
                let joined = join_all(
                    handles
                        .into_iter()
                        .map(|(name, task)| async move { (name, task.await) }),
                )
                .await;
                for (name, result) in joined {
                    match result {
                        Ok(Ok(summary)) => outcome.results.push(summary),
                        Ok(Err(err)) => {
                            warn!(file = %name, error = %err, "File failed to transcode");
                            outcome.failures.push(BatchFailure {
                                original_name: name,
                                reason: err.to_string(),
                            });
                        }
                        // A panicked task is isolated like a codec failure.
                        Err(join_err) => {
                            warn!(file = %name, error = %join_err, "Transcode task panicked");
                            outcome.failures.push(BatchFailure {
                                original_name: name,
                                reason: format!("internal error: {join_err}"),
                            });
                        }
                    }
                }
            }
        }

        debug!(
            processed = outcome.processed(),
            failed = outcome.failed(),
            "Batch run complete"
        );
        outcome
    }
}
