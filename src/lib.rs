//! TTL Cache - A process-local cache with per-entry expiration
//!
//! Provides a concurrent key/value store with lazy and background expiration,
//! and selective snapshots that can be reloaded with a fixed TTL.

pub mod cache;
pub mod config;
pub mod error;
pub mod persistence;
pub mod tasks;

pub use cache::{Cache, CacheStats, CacheStore};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use persistence::{KeyFilter, SnapshotPolicy, SnapshotValue};
