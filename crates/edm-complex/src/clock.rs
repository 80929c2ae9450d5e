//! Source of the current instant.

use chrono::{DateTime, TimeZone, Utc};

/// Supplies "now" to sentinel expansion.
///
/// Expanded literals carry whole milliseconds since the Unix epoch, so any
/// sub-millisecond part of the instant is truncated toward the earlier
/// millisecond.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// A clock stuck at `millis` milliseconds since the Unix epoch.
    /// Returns `None` when the instant is out of range.
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
