//! Janitor Task
//!
//! Background task that periodically removes expired cache entries.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::cache::CacheStore;

/// Shortest sweep period accepted; tokio intervals reject a zero period.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

// == Janitor ==
/// Handle to a running sweep task.
///
/// The task wakes every `interval`, removes every expired entry, and exits
/// once [`stop`](Self::stop) is called. Stopping does not touch the store;
/// lookups keep evicting lazily afterwards.
#[derive(Debug)]
pub struct Janitor {
    interval: Duration,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Janitor {
    /// Spawns the sweep task for `store` on the current tokio runtime.
    ///
    /// # Panics
    /// Panics if called outside of a tokio runtime.
    pub fn start<K, V>(store: Arc<CacheStore<K, V>>, interval: Duration) -> Self
    where
        K: Eq + Hash + Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        let interval = if interval < MIN_SWEEP_INTERVAL {
            warn!(
                "Sweep interval {:?} is below the minimum, using {:?}",
                interval, MIN_SWEEP_INTERVAL
            );
            MIN_SWEEP_INTERVAL
        } else {
            interval
        };

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(Self::run(store, interval, cancel.clone()));

        Self {
            interval,
            cancel,
            handle,
        }
    }

    async fn run<K, V>(store: Arc<CacheStore<K, V>>, interval: Duration, cancel: CancellationToken)
    where
        K: Eq + Hash,
    {
        info!("Starting janitor with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        // A late wake sweeps once, never twice in a row
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; sweeps start one interval in
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let removed = store.purge_expired();
                    if removed > 0 {
                        info!("Janitor sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Janitor sweep: no expired entries found");
                    }
                }
            }
        }

        info!("Janitor stopped");
    }

    // == Stop ==
    /// Signals the task to exit. Calling it again has no effect.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Returns true until the task has been stopped.
    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled() && !self.handle.is_finished()
    }

    #[cfg(test)]
    pub(crate) fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stops the task and waits for it to exit.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Err(err) = (&mut self.handle).await {
            warn!("Janitor task ended abnormally: {}", err);
        }
    }
}

impl Drop for Janitor {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
