//! Temporal-KV: in-memory time-indexed key-value store
//!
//! Every key maps to an append-only history of versions. Each version is
//! stamped with a caller-supplied logical timestamp, may carry a
//! time-to-live, and may be a tombstone left by a delete.
//!
//! # Core Concepts
//!
//! - **Versions**: Immutable records of a single write or delete
//! - **Histories**: Per-key logs in insertion order; the latest-inserted
//!   record wins ties, whatever its timestamp
//! - **TTL**: A version written at `t` with ttl `d` is valid on `[t, t + d)`
//! - **Tombstones**: Deletes append records that hide older values
//!
//! # Example
//!
//! ```
//! use temporal_kv::prelude::*;
//!
//! let mut store = VersionedStore::new();
//! store.write("k", "a".to_string(), Timestamp::new(1), None);
//! store.write("k", "b".to_string(), Timestamp::new(2), Some(Ttl::new(3)));
//!
//! assert_eq!(store.read_current("k", Timestamp::new(4)), Some("b".to_string()));
//! // "b" expired at 5, so the read falls back to "a".
//! assert_eq!(store.read_current("k", Timestamp::new(5)), Some("a".to_string()));
//!
//! store.delete("k", Timestamp::new(6));
//! assert_eq!(store.read_at("k", Timestamp::new(7)), None);
//! assert_eq!(store.read_at("k", Timestamp::new(1)), Some("a".to_string()));
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod query;
pub mod storage;

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::StoreConfig;
    pub use crate::core::*;
    pub use crate::error::{Error, Result};
    pub use crate::storage::*;
}
