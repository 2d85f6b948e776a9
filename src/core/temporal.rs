//! Logical time and time-to-live handling

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical timestamp supplied by the caller.
///
/// Timestamps are plain integers with no relation to wall-clock time. They
/// only order operations; nothing in the store ever reads a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Smallest representable timestamp
    pub const MIN: Timestamp = Timestamp(i64::MIN);

    /// Largest representable timestamp
    pub const MAX: Timestamp = Timestamp(i64::MAX);

    /// Create a timestamp from a raw logical tick
    pub const fn new(tick: i64) -> Self {
        Self(tick)
    }

    /// Get the raw logical tick
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Distance from `earlier` to `self`, widened so it cannot overflow
    pub fn since(&self, earlier: Timestamp) -> i128 {
        self.0 as i128 - earlier.0 as i128
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Timestamp {
    fn from(tick: i64) -> Self {
        Self(tick)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

/// Time-to-live measured in logical ticks.
///
/// A version written at `t` with ttl `d` is alive on the half-open window
/// `[t, t + d)`. Zero and negative durations are accepted as given and
/// describe a version that is never alive at or after its own timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ttl(i64);

impl Ttl {
    /// Create a ttl from a tick count
    pub const fn new(ticks: i64) -> Self {
        Self(ticks)
    }

    /// Get the tick count
    pub const fn get(&self) -> i64 {
        self.0
    }

    /// Check whether a version written at `written` is still alive at `query`
    pub fn covers(&self, written: Timestamp, query: Timestamp) -> bool {
        query.since(written) < self.0 as i128
    }

    /// First timestamp at which a version written at `written` is expired
    ///
    /// Returns `None` when the expiry lies beyond the representable range.
    pub fn expires_at(&self, written: Timestamp) -> Option<Timestamp> {
        written.get().checked_add(self.0).map(Timestamp)
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Ttl {
    fn from(ticks: i64) -> Self {
        Self(ticks)
    }
}
