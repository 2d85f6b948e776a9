//! Storage layer: the versioned stores and the trait they share

pub mod shared;
pub mod store;

pub use shared::*;
pub use store::*;

use crate::core::temporal::{Timestamp, Ttl};
use crate::core::version::Version;
use serde::{Deserialize, Serialize};

/// Trait for versioned key-value store implementations
pub trait VersionedKv<V: Clone> {
    /// Append a live version for `key`
    fn write(&mut self, key: &str, value: V, timestamp: Timestamp, ttl: Option<Ttl>);

    /// Value considered current as of `timestamp`
    fn read_current(&self, key: &str, timestamp: Timestamp) -> Option<V>;

    /// Value as it was at `timestamp` (time travel)
    fn read_at(&self, key: &str, timestamp: Timestamp) -> Option<V>;

    /// Mark `key` deleted as of `timestamp`
    fn delete(&mut self, key: &str, timestamp: Timestamp);

    /// Full append-only log for `key`, empty when the key was never written
    fn history(&self, key: &str) -> Vec<Version<V>>;

    /// Summary counters
    fn stats(&self) -> StoreStats;
}

/// Summary counters over a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoreStats {
    /// Keys with at least one version
    pub keys: usize,
    /// Versions across all keys, tombstones included
    pub versions: usize,
    /// Tombstones across all keys
    pub tombstones: usize,
}
