//! Version records: one write or delete event for one key

use crate::core::temporal::{Timestamp, Ttl};
use serde::{Deserialize, Serialize};

/// Immutable record of a single write or delete.
///
/// Fields are private so a record cannot change once it is in a history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version<V = String> {
    /// Logical time of the operation
    timestamp: Timestamp,
    /// Stored payload (carried but meaningless on tombstones)
    value: V,
    /// Optional time-to-live; `None` never expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ttl: Option<Ttl>,
    /// Tombstone flag
    #[serde(default)]
    deleted: bool,
}

impl<V> Version<V> {
    /// Create a live (non-deleted) version
    pub fn live(value: V, timestamp: Timestamp, ttl: Option<Ttl>) -> Self {
        Self {
            timestamp,
            value,
            ttl,
            deleted: false,
        }
    }

    /// Create a tombstone carrying the given payload and ttl
    pub fn tombstone(value: V, timestamp: Timestamp, ttl: Option<Ttl>) -> Self {
        Self {
            timestamp,
            value,
            ttl,
            deleted: true,
        }
    }

    /// Get the logical timestamp
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Get the payload
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Get the ttl, if any
    pub fn ttl(&self) -> Option<Ttl> {
        self.ttl
    }

    /// Whether this record is a tombstone
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Check TTL validity at `query`; records without a ttl are always valid
    pub fn is_valid_at(&self, query: Timestamp) -> bool {
        match self.ttl {
            None => true,
            Some(ttl) => ttl.covers(self.timestamp, query),
        }
    }

    /// Whether this record is a lookup candidate for a read at `query`
    pub fn is_visible_at(&self, query: Timestamp) -> bool {
        self.timestamp <= query && self.is_valid_at(query)
    }

    /// Consume the record and return its payload
    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V: Clone> Version<V> {
    /// Tombstone inheriting this record's payload and ttl, stamped at `timestamp`
    pub fn tombstone_at(&self, timestamp: Timestamp) -> Self {
        Self::tombstone(self.value.clone(), timestamp, self.ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_version() {
        let v = Version::live("a".to_string(), Timestamp::new(3), None);

        assert_eq!(v.value(), "a");
        assert_eq!(v.timestamp(), Timestamp::new(3));
        assert!(!v.is_deleted());
        assert!(v.is_valid_at(Timestamp::new(i64::MAX)));
    }

    #[test]
    fn test_validity_with_ttl() {
        let v = Version::live("a", Timestamp::new(2), Some(Ttl::new(3)));

        assert!(v.is_visible_at(Timestamp::new(4)));
        assert!(!v.is_visible_at(Timestamp::new(5)));
        assert!(!v.is_visible_at(Timestamp::new(1)));
    }

    #[test]
    fn test_tombstone_inherits_payload_and_ttl() {
        let v = Version::live("a", Timestamp::new(1), Some(Ttl::new(10)));
        let t = v.tombstone_at(Timestamp::new(4));

        assert!(t.is_deleted());
        assert_eq!(t.value(), &"a");
        assert_eq!(t.ttl(), Some(Ttl::new(10)));
        assert_eq!(t.timestamp(), Timestamp::new(4));
        assert!(!t.is_valid_at(Timestamp::new(14)));
    }

    #[test]
    fn test_json_shape() {
        let v = Version::live("a".to_string(), Timestamp::new(7), Some(Ttl::new(2)));
        let json = serde_json::to_value(&v).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"timestamp": 7, "value": "a", "ttl": 2, "deleted": false})
        );

        let plain: Version = serde_json::from_str(r#"{"timestamp": 1, "value": "x"}"#).unwrap();
        assert_eq!(plain.ttl(), None);
        assert!(!plain.is_deleted());
    }
}
