//! Persistence Module
//!
//! Selective snapshots of string-keyed caches.
//!
//! # Contract
//! - `save` writes the entries accepted by a [`KeyFilter`] whose values are text
//! - `reload` loads every pair in the file with a fixed TTL and never reports errors

mod filter;
mod snapshot;

pub use filter::{KeyFilter, SnapshotPolicy, DEFAULT_RELOAD_TTL, FAKEIP_PREFIX};
pub use snapshot::SnapshotValue;
