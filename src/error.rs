//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Only snapshot persistence can fail; lookups represent absence as `None`.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Snapshot file could not be created, written or flushed
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot mapping could not be encoded
    #[error("Snapshot encoding error: {0}")]
    Encode(#[from] bincode::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
