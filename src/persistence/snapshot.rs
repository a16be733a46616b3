//! Snapshot save and reload for string-keyed stores.
//!
//! The file holds a single bincode-encoded `HashMap<String, String>`. There is
//! no version field and no checksum.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::error::Result;
use crate::persistence::SnapshotPolicy;

// == Snapshot Value ==
/// Values that can be written to and read back from a snapshot.
///
/// `as_snapshot_str` returning `None` marks a value as not text-shaped;
/// `save` skips such entries.
pub trait SnapshotValue {
    fn as_snapshot_str(&self) -> Option<&str>;

    fn from_snapshot_string(value: String) -> Self;
}

impl SnapshotValue for String {
    fn as_snapshot_str(&self) -> Option<&str> {
        Some(self.as_str())
    }

    fn from_snapshot_string(value: String) -> Self {
        value
    }
}

impl SnapshotValue for Arc<str> {
    fn as_snapshot_str(&self) -> Option<&str> {
        Some(self.as_ref())
    }

    fn from_snapshot_string(value: String) -> Self {
        Arc::from(value)
    }
}

impl<V> CacheStore<String, V>
where
    V: SnapshotValue,
{
    // == Save ==
    /// Writes every entry accepted by `policy` whose value is text-shaped to
    /// `path`, replacing any existing file.
    ///
    /// The store is not locked as a whole while iterating, so concurrent
    /// writes may or may not appear in the snapshot. Entries that are expired
    /// but not yet removed are included.
    ///
    /// Returns the number of entries written.
    pub fn save(&self, path: impl AsRef<Path>, policy: &SnapshotPolicy) -> Result<usize> {
        let path = path.as_ref();
        let mut file = File::create(path)?;

        let snapshot: HashMap<String, String> = self
            .entries()
            .iter()
            .filter(|item| policy.filter().accepts(item.key()))
            .filter_map(|item| {
                item.value()
                    .payload()
                    .as_snapshot_str()
                    .map(|value| (item.key().clone(), value.to_string()))
            })
            .collect();

        // Encode fully before touching the file so write failures surface as I/O
        let encoded = bincode::serialize(&snapshot)?;
        file.write_all(&encoded)?;
        file.flush()?;

        info!(
            "Snapshot saved: {} entries written to {}",
            snapshot.len(),
            path.display()
        );
        Ok(snapshot.len())
    }

    // == Reload ==
    /// Loads a snapshot from `path`, storing every pair with the policy's
    /// reload TTL.
    ///
    /// Keys are not checked against the policy filter. A missing, unreadable
    /// or corrupt file loads nothing and returns 0; the failure is only
    /// logged.
    pub fn reload(&self, path: impl AsRef<Path>, policy: &SnapshotPolicy) -> u32 {
        let path = path.as_ref();

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                debug!("Snapshot {} not loaded: {}", path.display(), err);
                return 0;
            }
        };

        let items: HashMap<String, String> = match bincode::deserialize(&bytes) {
            Ok(items) => items,
            Err(err) => {
                warn!("Snapshot {} could not be decoded: {}", path.display(), err);
                return 0;
            }
        };

        let mut loaded = 0u32;
        for (key, value) in items {
            self.put(key, V::from_snapshot_string(value), policy.reload_ttl());
            loaded += 1;
        }

        info!("Snapshot reloaded: {} entries from {}", loaded, path.display());
        loaded
    }
}
