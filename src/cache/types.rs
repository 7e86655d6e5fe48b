// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for cache bookkeeping
//!
//! - [`TimestampMillis`]: a point in time, in Unix milliseconds, as reported
//!   by a [`Clock`](super::Clock)
//! - [`AccessSequence`]: monotonic tie-breaker for LRU ordering

use std::time::Duration;

/// Unix timestamp in milliseconds.
///
/// # Examples
///
/// ```
/// use swapscan::cache::TimestampMillis;
/// use std::time::Duration;
///
/// let fetched = TimestampMillis::from_millis(1_000);
/// let now = TimestampMillis::from_millis(61_000);
/// assert_eq!(now.duration_since(fetched), Duration::from_secs(60));
/// assert_eq!(fetched.duration_since(now), Duration::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TimestampMillis(u64);

impl TimestampMillis {
    /// Creates a timestamp from a raw millisecond value
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Raw millisecond value
    pub const fn as_millis(&self) -> u64 {
        self.0
    }

    /// Time elapsed from `earlier` to `self`, saturating at zero.
    pub fn duration_since(&self, earlier: TimestampMillis) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    /// Returns this timestamp moved forward by `duration`.
    pub fn saturating_add(&self, duration: Duration) -> Self {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(millis))
    }
}

/// Monotonic sequence number for deterministic LRU ordering.
///
/// Two entries touched within the same millisecond are ordered by sequence,
/// lower meaning older.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct AccessSequence(u64);

impl AccessSequence {
    /// Returns the next sequence number
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturating_add_moves_forward() {
        let ts = TimestampMillis::from_millis(500);
        assert_eq!(ts.saturating_add(Duration::from_millis(250)).as_millis(), 750);
        assert_eq!(
            TimestampMillis::from_millis(u64::MAX).saturating_add(Duration::from_secs(1)),
            TimestampMillis::from_millis(u64::MAX)
        );
    }

    #[test]
    fn access_sequence_is_monotonic() {
        let first = AccessSequence::default();
        let second = first.next();
        assert!(first < second);
        assert!(second < second.next());
    }
}
