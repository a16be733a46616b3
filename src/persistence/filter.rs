//! Snapshot selection rules.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Key namespace persisted by default.
pub const FAKEIP_PREFIX: &str = "fakeip:";

/// TTL given to every entry loaded from a snapshot.
pub const DEFAULT_RELOAD_TTL: Duration = Duration::from_secs(600);

// == Key Filter ==
/// Decides which keys a snapshot keeps.
#[derive(Clone)]
pub enum KeyFilter {
    /// Keys starting with the given literal prefix
    Prefix(String),
    /// Every key
    All,
    /// Caller-supplied predicate
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl KeyFilter {
    /// Accepts keys starting with `prefix`.
    pub fn prefix(prefix: impl Into<String>) -> Self {
        KeyFilter::Prefix(prefix.into())
    }

    /// Accepts keys in the `fakeip:` namespace.
    pub fn fakeip() -> Self {
        Self::prefix(FAKEIP_PREFIX)
    }

    /// Accepts keys for which `predicate` returns true.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        KeyFilter::Custom(Arc::new(predicate))
    }

    /// Returns true if `key` belongs in a snapshot.
    pub fn accepts(&self, key: &str) -> bool {
        match self {
            KeyFilter::Prefix(prefix) => key.starts_with(prefix.as_str()),
            KeyFilter::All => true,
            KeyFilter::Custom(predicate) => predicate(key),
        }
    }
}

impl fmt::Debug for KeyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyFilter::Prefix(prefix) => f.debug_tuple("Prefix").field(prefix).finish(),
            KeyFilter::All => f.write_str("All"),
            KeyFilter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

// == Snapshot Policy ==
/// Which entries `save` writes and how long `reload`ed entries live.
#[derive(Debug, Clone)]
pub struct SnapshotPolicy {
    filter: KeyFilter,
    reload_ttl: Duration,
}

impl SnapshotPolicy {
    /// Creates a policy with the given filter and the default reload TTL.
    pub fn new(filter: KeyFilter) -> Self {
        Self {
            filter,
            reload_ttl: DEFAULT_RELOAD_TTL,
        }
    }

    /// Overrides the TTL applied on reload.
    pub fn with_reload_ttl(mut self, ttl: Duration) -> Self {
        self.reload_ttl = ttl;
        self
    }

    pub fn filter(&self) -> &KeyFilter {
        &self.filter
    }

    pub fn reload_ttl(&self) -> Duration {
        self.reload_ttl
    }
}

impl Default for SnapshotPolicy {
    /// `fakeip:` keys, reloaded with a 600 second TTL.
    fn default() -> Self {
        Self::new(KeyFilter::fakeip())
    }
}
