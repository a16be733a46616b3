//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// Represents a single cache entry with its payload and expiration moment.
///
/// Entries are never mutated; replacing a key stores a new entry.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    payload: V,
    expires_at: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    ///
    /// A TTL too large for the clock saturates to the latest representable
    /// timestamp.
    pub fn new(payload: V, ttl: Duration) -> Self {
        Self {
            payload,
            expires_at: expiration_from_now(ttl),
        }
    }

    /// Creates an entry with an explicit expiration timestamp.
    pub fn with_expiration(payload: V, expires_at: DateTime<Utc>) -> Self {
        Self {
            payload,
            expires_at,
        }
    }

    /// Returns the stored payload.
    pub fn payload(&self) -> &V {
        &self.payload
    }

    /// Returns the expiration timestamp.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is strictly past its
    /// expiration timestamp.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks expiration against a given observation time.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

// == Utility Functions ==
/// Computes `now + ttl`, saturating at the latest representable timestamp.
pub fn expiration_from_now(ttl: Duration) -> DateTime<Utc> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|delta| Utc::now().checked_add_signed(delta))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
