//! Single-threaded versioned store

use crate::config::StoreConfig;
use crate::core::history::{DeletePolicy, KeyHistory};
use crate::core::temporal::{Timestamp, Ttl};
use crate::core::version::Version;
use crate::storage::{StoreStats, VersionedKv};
use std::collections::HashMap;
use tracing::{debug, trace};

/// In-memory mapping from key to its append-only version history.
///
/// Keys are created lazily by the first write. All operations run to
/// completion synchronously; wrap the store in a lock, or use
/// [`SharedStore`](crate::storage::SharedStore), when it has to be shared
/// between threads.
#[derive(Debug, Clone)]
pub struct VersionedStore<V = String> {
    histories: HashMap<String, KeyHistory<V>>,
    delete_policy: DeletePolicy,
}

impl<V: Clone> VersionedStore<V> {
    /// Create an empty store with the default configuration
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store from a configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            histories: HashMap::new(),
            delete_policy: config.delete_policy,
        }
    }

    /// Active delete policy
    pub fn delete_policy(&self) -> DeletePolicy {
        self.delete_policy
    }

    /// Append a live version. Out-of-order and duplicate timestamps are accepted.
    pub fn write(&mut self, key: &str, value: V, timestamp: Timestamp, ttl: Option<Ttl>) {
        trace!(key, %timestamp, ?ttl, "write");
        self.histories
            .entry(key.to_owned())
            .or_default()
            .append(Version::live(value, timestamp, ttl));
    }

    /// Value considered current as of `timestamp`
    pub fn read_current(&self, key: &str, timestamp: Timestamp) -> Option<V> {
        let value = self
            .histories
            .get(key)
            .and_then(|history| history.visible(timestamp))
            .cloned();
        trace!(key, %timestamp, found = value.is_some(), "read");
        value
    }

    /// Value as it was at `timestamp`.
    ///
    /// Point-in-time reads and current reads resolve the same way; there is
    /// a single time axis.
    pub fn read_at(&self, key: &str, timestamp: Timestamp) -> Option<V> {
        self.read_current(key, timestamp)
    }

    /// Mark `key` deleted as of `timestamp`. Deleting a missing key is a no-op.
    pub fn delete(&mut self, key: &str, timestamp: Timestamp) {
        match self.histories.get_mut(key) {
            Some(history) => {
                let added = history.delete_at(timestamp, self.delete_policy);
                debug!(key, %timestamp, tombstones = added, "delete");
            }
            None => trace!(key, %timestamp, "delete of missing key ignored"),
        }
    }

    /// Versions of `key` in insertion order, empty when the key is unknown
    pub fn history(&self, key: &str) -> &[Version<V>] {
        self.histories
            .get(key)
            .map(|history| history.versions())
            .unwrap_or(&[])
    }

    /// Summary counters
    pub fn stats(&self) -> StoreStats {
        self.histories
            .values()
            .fold(StoreStats::default(), |mut stats, history| {
                stats.keys += 1;
                stats.versions += history.len();
                stats.tombstones += history.tombstones();
                stats
            })
    }

    /// Number of keys with a history
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    /// Check if the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }
}

impl<V: Clone> Default for VersionedStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> VersionedKv<V> for VersionedStore<V> {
    fn write(&mut self, key: &str, value: V, timestamp: Timestamp, ttl: Option<Ttl>) {
        VersionedStore::write(self, key, value, timestamp, ttl)
    }

    fn read_current(&self, key: &str, timestamp: Timestamp) -> Option<V> {
        VersionedStore::read_current(self, key, timestamp)
    }

    fn read_at(&self, key: &str, timestamp: Timestamp) -> Option<V> {
        VersionedStore::read_at(self, key, timestamp)
    }

    fn delete(&mut self, key: &str, timestamp: Timestamp) {
        VersionedStore::delete(self, key, timestamp)
    }

    fn history(&self, key: &str) -> Vec<Version<V>> {
        VersionedStore::history(self, key).to_vec()
    }

    fn stats(&self) -> StoreStats {
        VersionedStore::stats(self)
    }
}
