//! Key history: append-only sequence of versions for one key

use crate::core::temporal::Timestamp;
use crate::core::version::Version;
use serde::{Deserialize, Serialize};

/// How a delete turns into tombstones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// One tombstone per prior record at or before the delete timestamp,
    /// each inheriting that record's payload and ttl.
    #[default]
    FanOut,
    /// A single tombstone per delete call with no ttl.
    Single,
}

/// Complete history of versions for a single key.
///
/// Records are kept in insertion order, which is also the tie-break order
/// for lookups. As long as timestamps never decrease along that order the
/// history is "ordered" and lookups can binary search; a single
/// out-of-order append switches it to a full reverse scan for good.
#[derive(Debug, Clone)]
pub struct KeyHistory<V = String> {
    versions: Vec<Version<V>>,
    ordered: bool,
}

impl<V> KeyHistory<V> {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            versions: Vec::new(),
            ordered: true,
        }
    }

    /// Append a version at the end of the log
    pub fn append(&mut self, version: Version<V>) {
        if let Some(last) = self.versions.last() {
            if version.timestamp() < last.timestamp() {
                self.ordered = false;
            }
        }
        self.versions.push(version);
    }

    /// Latest-inserted version visible at `timestamp`.
    ///
    /// Visible means `version.timestamp <= timestamp` and TTL-valid at
    /// `timestamp`. Tombstones are returned as-is; callers decide what a
    /// tombstone means.
    pub fn resolve(&self, timestamp: Timestamp) -> Option<&Version<V>> {
        let candidates = if self.ordered {
            let end = self
                .versions
                .partition_point(|v| v.timestamp() <= timestamp);
            &self.versions[..end]
        } else {
            &self.versions[..]
        };

        candidates.iter().rev().find(|v| v.is_visible_at(timestamp))
    }

    /// Payload visible at `timestamp`, or `None` when missing, expired or deleted
    pub fn visible(&self, timestamp: Timestamp) -> Option<&V> {
        self.resolve(timestamp)
            .filter(|v| !v.is_deleted())
            .map(|v| v.value())
    }

    /// All versions in insertion order
    pub fn versions(&self) -> &[Version<V>] {
        &self.versions
    }

    /// Whether timestamps are non-decreasing in insertion order
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Get number of versions
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Number of tombstones in the log
    pub fn tombstones(&self) -> usize {
        self.versions.iter().filter(|v| v.is_deleted()).count()
    }
}

impl<V: Clone> KeyHistory<V> {
    /// Append tombstones for a delete at `timestamp`, returning how many were added.
    ///
    /// Only records at or before `timestamp` qualify. When none do, the
    /// history is left untouched.
    pub fn delete_at(&mut self, timestamp: Timestamp, policy: DeletePolicy) -> usize {
        let tombstones: Vec<Version<V>> = match policy {
            DeletePolicy::FanOut => self
                .versions
                .iter()
                .filter(|v| v.timestamp() <= timestamp)
                .map(|v| v.tombstone_at(timestamp))
                .collect(),
            DeletePolicy::Single => self
                .versions
                .iter()
                .rev()
                .find(|v| v.timestamp() <= timestamp)
                .map(|v| Version::tombstone(v.value().clone(), timestamp, None))
                .into_iter()
                .collect(),
        };

        let added = tombstones.len();
        for tombstone in tombstones {
            self.append(tombstone);
        }
        added
    }
}

impl<V> Default for KeyHistory<V> {
    fn default() -> Self {
        Self::new()
    }
}
