//! Engine time
//!
//! The engine never reads a wall clock. Every operation that needs the
//! current time takes a [`Timestamp`] supplied by the hosting platform,
//! which keeps operations deterministic and replayable. Deadlines are
//! business-level values checked against the supplied timestamp.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds since the platform epoch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    /// Create a timestamp from raw milliseconds
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Raw milliseconds
    pub fn millis(&self) -> u64 {
        self.0
    }

    /// True if `self` is strictly after `other`
    pub fn is_after(&self, other: Timestamp) -> bool {
        self.0 > other.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl From<u64> for Timestamp {
    fn from(millis: u64) -> Self {
        Self(millis)
    }
}

impl From<Timestamp> for u64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}
