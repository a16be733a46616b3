//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::persistence::{KeyFilter, SnapshotPolicy, DEFAULT_RELOAD_TTL, FAKEIP_PREFIX};

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Interval between background sweeps
    pub cleanup_interval: Duration,
    /// Location of the snapshot file used by the host binary
    pub snapshot_path: PathBuf,
    /// Key prefix selecting which entries are persisted
    pub snapshot_prefix: String,
    /// TTL applied to every entry loaded from a snapshot
    pub reload_ttl: Duration,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CLEANUP_INTERVAL_MS` - Sweep interval in milliseconds (default: 1000)
    /// - `SNAPSHOT_PATH` - Snapshot file location (default: cache.db)
    /// - `SNAPSHOT_PREFIX` - Persisted key prefix (default: fakeip:)
    /// - `RELOAD_TTL_SECS` - TTL of reloaded entries in seconds (default: 600)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cleanup_interval: env::var("CLEANUP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.cleanup_interval),
            snapshot_path: env::var("SNAPSHOT_PATH")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.snapshot_path),
            snapshot_prefix: env::var("SNAPSHOT_PREFIX")
                .ok()
                .unwrap_or(defaults.snapshot_prefix),
            reload_ttl: env::var("RELOAD_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.reload_ttl),
        }
    }

    /// Sets the sweep interval.
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// Sets the snapshot file location.
    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = path.into();
        self
    }

    /// Sets the persisted key prefix.
    pub fn with_snapshot_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.snapshot_prefix = prefix.into();
        self
    }

    /// Sets the TTL of reloaded entries.
    pub fn with_reload_ttl(mut self, ttl: Duration) -> Self {
        self.reload_ttl = ttl;
        self
    }

    /// Builds the snapshot policy described by this configuration.
    pub fn snapshot_policy(&self) -> SnapshotPolicy {
        SnapshotPolicy::new(KeyFilter::prefix(self.snapshot_prefix.clone()))
            .with_reload_ttl(self.reload_ttl)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: Duration::from_secs(1),
            snapshot_path: PathBuf::from("cache.db"),
            snapshot_prefix: FAKEIP_PREFIX.to_string(),
            reload_ttl: DEFAULT_RELOAD_TTL,
        }
    }
}
