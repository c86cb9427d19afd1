//! Point-in-time values used for deadlines and the host clock.

use core::fmt;

/// Seconds since the Unix epoch.
///
/// Deadlines are plain timestamps compared once, at operation entry,
/// against the host's current time: an operation whose deadline is
/// strictly earlier than "now" is rejected.
///
/// # Examples
///
/// ```
/// use hydra_exchange::domain::Timestamp;
///
/// let now = Timestamp::new(1_000);
/// assert!(Timestamp::new(999).has_passed(now));
/// assert!(!Timestamp::new(1_000).has_passed(now));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch.
    pub const ZERO: Self = Self(0);

    /// Creates a timestamp from seconds.
    #[must_use]
    pub const fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Returns the raw seconds.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns `true` if this deadline is strictly earlier than `now`.
    #[must_use]
    pub const fn has_passed(&self, now: Self) -> bool {
        now.0 > self.0
    }

    /// Returns the timestamp `seconds` later, saturating at `u64::MAX`.
    #[must_use]
    pub const fn plus(&self, seconds: u64) -> Self {
        Self(self.0.saturating_add(seconds))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
