//! Cache Store Module
//!
//! Concurrent key/entry storage with lazy expiration on lookup.

use std::borrow::Borrow;
use std::hash::Hash;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::cache::stats::StatsCounters;
use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Concurrency-safe mapping from key to [`CacheEntry`].
///
/// Every method takes `&self`; synchronization is internal to the sharded map,
/// so the store can be shared through an `Arc` between any number of callers
/// and the background sweeper.
#[derive(Debug)]
pub struct CacheStore<K, V>
where
    K: Eq + Hash,
{
    entries: DashMap<K, CacheEntry<V>>,
    stats: StatsCounters,
}

impl<K, V> CacheStore<K, V>
where
    K: Eq + Hash,
{
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            stats: StatsCounters::default(),
        }
    }

    // == Put ==
    /// Inserts or replaces the entry for `key`, expiring `ttl` from now.
    pub fn put(&self, key: K, payload: V, ttl: Duration) {
        self.entries.insert(key, CacheEntry::new(payload, ttl));
    }

    // == Get ==
    /// Returns the payload for `key` if present and not expired.
    ///
    /// An expired entry is removed as a side effect.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.lookup(key).map(|(payload, _)| payload)
    }

    // == Get With Expire ==
    /// Same as [`get`](Self::get), also returning the expiration timestamp.
    pub fn get_with_expire<Q>(&self, key: &Q) -> Option<(V, DateTime<Utc>)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.lookup(key)
    }

    fn lookup<Q>(&self, key: &Q) -> Option<(V, DateTime<Utc>)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        let Some(entry) = self.entries.get(key) else {
            self.stats.record_miss();
            return None;
        };

        if entry.is_expired() {
            // The shard guard must be released before removing from the same shard
            drop(entry);
            // Only remove if no fresh entry replaced the expired one meanwhile
            if self
                .entries
                .remove_if(key, |_, current| current.is_expired())
                .is_some()
            {
                self.stats.record_lazy_eviction();
            }
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        Some((entry.payload().clone(), entry.expires_at()))
    }

    // == Delete ==
    /// Removes `key`. Returns `true` if an entry was present.
    ///
    /// Removing an absent key is a no-op.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.remove(key).is_some()
    }

    // == Purge Expired ==
    /// Removes every entry whose expiration has passed.
    ///
    /// Each entry is checked against its own observation of the clock.
    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let mut removed = 0;

        self.entries.retain(|_, entry| {
            if entry.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });

        self.stats.record_swept(removed);
        removed
    }

    // == Length ==
    /// Returns the number of entries physically present, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.entries.len())
    }

    /// Direct access to the underlying map for snapshotting.
    pub(crate) fn entries(&self) -> &DashMap<K, CacheEntry<V>> {
        &self.entries
    }
}

impl<K, V> Default for CacheStore<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
