//! Cache Module
//!
//! Provides concurrent in-memory caching with per-entry TTL expiration.

mod entry;
mod handle;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use handle::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;
