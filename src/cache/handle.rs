//! Cache Handle Module
//!
//! The public cache object: a store plus the janitor that sweeps it.

use std::borrow::Borrow;
use std::hash::Hash;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::cache::{CacheStats, CacheStore};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::persistence::{SnapshotPolicy, SnapshotValue};
use crate::tasks::Janitor;

// == Cache ==
/// A TTL cache owning its store and background janitor.
///
/// Call [`close`](Self::close) when done with the cache; dropping it has the
/// same effect. After closing, every operation stays available and expired
/// entries are still evicted on lookup, but no more background sweeps run.
///
/// The handle is not `Clone`; share it behind an `Arc`.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use ttl_cache::Cache;
///
/// #[tokio::main]
/// async fn main() {
///     let cache = Cache::new(Duration::from_secs(1));
///     cache.put("fakeip:10.0.0.1".to_string(), "host-a".to_string(), Duration::from_secs(60));
///     assert_eq!(cache.get("fakeip:10.0.0.1"), Some("host-a".to_string()));
///     cache.close();
/// }
/// ```
#[derive(Debug)]
pub struct Cache<K, V>
where
    K: Eq + Hash,
{
    store: Arc<CacheStore<K, V>>,
    janitor: Janitor,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty cache swept every `interval`.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime context. The cache requires
    /// a runtime to spawn its janitor.
    pub fn new(interval: Duration) -> Self {
        if tokio::runtime::Handle::try_current().is_err() {
            panic!(
                "ttl_cache::Cache requires a Tokio runtime. \
                 Create it from within a #[tokio::main] or #[tokio::test] context, \
                 or from code running on a Tokio runtime."
            );
        }

        let store = Arc::new(CacheStore::new());
        let janitor = Janitor::start(Arc::clone(&store), interval);
        debug!("Cache created with sweep interval {:?}", janitor.interval());

        Self { store, janitor }
    }

    /// Creates an empty cache using the configured sweep interval.
    pub fn with_config(config: &CacheConfig) -> Self {
        Self::new(config.cleanup_interval)
    }
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash,
{
    /// Inserts or replaces `key`, expiring `ttl` from now.
    pub fn put(&self, key: K, payload: V, ttl: Duration) {
        self.store.put(key, payload, ttl);
    }

    /// Returns the live payload for `key`, evicting it if expired.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.store.get(key)
    }

    /// Returns the live payload for `key` and its expiration timestamp.
    pub fn get_with_expire<Q>(&self, key: &Q) -> Option<(V, DateTime<Utc>)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.store.get_with_expire(key)
    }

    /// Removes `key`; returns `true` if it was present.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.store.delete(key)
    }

    /// Runs one sweep immediately, outside the janitor schedule.
    pub fn purge_expired(&self) -> usize {
        self.store.purge_expired()
    }

    /// Returns the number of entries present, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    /// Returns true while background sweeps are active.
    pub fn janitor_running(&self) -> bool {
        self.janitor.is_running()
    }

    // == Close ==
    /// Stops background sweeping. Safe to call more than once.
    pub fn close(&self) {
        if self.janitor.is_running() {
            info!("Closing cache, stopping janitor");
        }
        self.janitor.stop();
    }
}

impl<V> Cache<String, V>
where
    V: SnapshotValue,
{
    /// Writes the entries selected by `policy` to `path`.
    ///
    /// See [`CacheStore::save`].
    pub fn save(&self, path: impl AsRef<Path>, policy: &SnapshotPolicy) -> Result<usize> {
        self.store.save(path, policy)
    }

    /// Loads a snapshot from `path`; returns 0 on any failure.
    ///
    /// See [`CacheStore::reload`].
    pub fn reload(&self, path: impl AsRef<Path>, policy: &SnapshotPolicy) -> u32 {
        self.store.reload(path, policy)
    }
}

impl<K, V> Drop for Cache<K, V>
where
    K: Eq + Hash,
{
    fn drop(&mut self) {
        self.janitor.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_put_and_get() {
        let cache = Cache::new(Duration::from_secs(1));
        cache.put("key1".to_string(), 10u32, Duration::from_secs(60));

        assert_eq!(cache.get("key1"), Some(10));
        assert_eq!(cache.get("missing"), None);
        assert!(cache.janitor_running());
        cache.close();
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_keeps_lazy_eviction() {
        let cache = Cache::new(Duration::from_millis(10));
        cache.close();
        cache.close();
        assert!(!cache.janitor_running());

        cache.put("key1", "value1", Duration::from_millis(10));
        assert_eq!(cache.get("key1"), Some("value1"));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.len(), 1, "No sweep should run after close");
        assert_eq!(cache.get_with_expire("key1"), None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_drop_stops_janitor() {
        let cache: Cache<String, String> = Cache::new(Duration::from_millis(10));
        let cancel = cache.janitor.cancellation_token();

        drop(cache);
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn test_with_config_uses_interval() {
        let config = CacheConfig::default().with_cleanup_interval(Duration::from_millis(25));
        let cache: Cache<String, String> = Cache::with_config(&config);

        assert_eq!(cache.janitor.interval(), Duration::from_millis(25));
    }

    #[test]
    #[should_panic(expected = "requires a Tokio runtime")]
    fn test_new_outside_runtime_panics() {
        let _cache: Cache<String, String> = Cache::new(Duration::from_secs(1));
    }
}
