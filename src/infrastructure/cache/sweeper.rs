//! Background age sweep for the artifact cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use crate::domain::ports::ArtifactCachePort;

/// Handle to the periodic sweep task.
///
/// The sweep runs on a fixed period independent of request traffic. Call
/// [`shutdown`](Self::shutdown) for clean termination; dropping the handle
/// also stops the loop, so a sweeper never outlives its owner in tests.
pub struct CacheSweeper {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl CacheSweeper {
    /// Spawns a sweep loop over `cache`, firing every `period` and removing
    /// entries older than `max_age`.
    #[must_use]
    pub fn spawn(
        cache: Arc<dyn ArtifactCachePort>,
        period: Duration,
        max_age: Duration,
    ) -> Self {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; consume it so the first
            // real sweep happens one full period after startup.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let removed = cache.sweep_expired(Instant::now(), max_age).await;
                        if removed > 0 {
                            debug!(removed, "Swept expired artifacts");
                        } else {
                            trace!("Sweep found no expired artifacts");
                        }
                    }
                    // Fires on explicit shutdown and when the handle is dropped.
                    _ = shutdown_rx.changed() => break,
                }
            }
        });

        Self {
            shutdown_tx,
            handle,
        }
    }

    /// Stops the sweep loop and waits for it to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.handle.await;
    }
}
