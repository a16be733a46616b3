//! Background Tasks Module
//!
//! Contains background tasks that run periodically for the lifetime of a cache.
//!
//! # Tasks
//! - Janitor: Removes expired cache entries at a fixed interval

mod janitor;

pub use janitor::{Janitor, MIN_SWEEP_INTERVAL};
