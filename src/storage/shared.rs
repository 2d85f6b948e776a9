//! Concurrent versioned store with one lock per key

use crate::config::StoreConfig;
use crate::core::history::{DeletePolicy, KeyHistory};
use crate::core::temporal::{Timestamp, Ttl};
use crate::core::version::Version;
use crate::storage::{StoreStats, VersionedKv};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Thread-safe versioned store.
///
/// Each key's history sits behind its own map entry lock, so operations on
/// one key are serialized while different keys proceed in parallel.
/// Cloning yields another handle to the same store.
#[derive(Debug, Clone)]
pub struct SharedStore<V = String> {
    histories: Arc<DashMap<String, KeyHistory<V>>>,
    delete_policy: DeletePolicy,
}

impl<V: Clone> SharedStore<V> {
    /// Create an empty store with the default configuration
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store from a configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            histories: Arc::new(DashMap::new()),
            delete_policy: config.delete_policy,
        }
    }

    /// Append a live version
    pub fn write(&self, key: &str, value: V, timestamp: Timestamp, ttl: Option<Ttl>) {
        trace!(key, %timestamp, ?ttl, "write");
        self.histories
            .entry(key.to_owned())
            .or_default()
            .append(Version::live(value, timestamp, ttl));
    }

    /// Value considered current as of `timestamp`
    pub fn read_current(&self, key: &str, timestamp: Timestamp) -> Option<V> {
        self.histories
            .get(key)
            .and_then(|history| history.visible(timestamp).cloned())
    }

    /// Value as it was at `timestamp`
    pub fn read_at(&self, key: &str, timestamp: Timestamp) -> Option<V> {
        self.read_current(key, timestamp)
    }

    /// Mark `key` deleted as of `timestamp`. Deleting a missing key is a no-op.
    pub fn delete(&self, key: &str, timestamp: Timestamp) {
        if let Some(mut history) = self.histories.get_mut(key) {
            let added = history.delete_at(timestamp, self.delete_policy);
            debug!(key, %timestamp, tombstones = added, "delete");
        }
    }

    /// Snapshot of the versions of `key` in insertion order
    pub fn history(&self, key: &str) -> Vec<Version<V>> {
        self.histories
            .get(key)
            .map(|history| history.versions().to_vec())
            .unwrap_or_default()
    }

    /// Summary counters.
    ///
    /// Shards are visited one at a time, so concurrent writers may be
    /// partially reflected.
    pub fn stats(&self) -> StoreStats {
        self.histories
            .iter()
            .fold(StoreStats::default(), |mut stats, entry| {
                stats.keys += 1;
                stats.versions += entry.len();
                stats.tombstones += entry.tombstones();
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

impl<V: Clone> Default for SharedStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> VersionedKv<V> for SharedStore<V> {
    fn write(&mut self, key: &str, value: V, timestamp: Timestamp, ttl: Option<Ttl>) {
        SharedStore::write(self, key, value, timestamp, ttl)
    }

    fn read_current(&self, key: &str, timestamp: Timestamp) -> Option<V> {
        SharedStore::read_current(self, key, timestamp)
    }

    fn read_at(&self, key: &str, timestamp: Timestamp) -> Option<V> {
        SharedStore::read_at(self, key, timestamp)
    }

    fn delete(&mut self, key: &str, timestamp: Timestamp) {
        SharedStore::delete(self, key, timestamp)
    }

    fn history(&self, key: &str) -> Vec<Version<V>> {
        SharedStore::history(self, key)
    }

    fn stats(&self) -> StoreStats {
        SharedStore::stats(self)
    }
}
