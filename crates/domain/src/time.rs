//! Time and timestamp helpers.
//!
//! Two planes of time coexist: wall-clock [`Timestamp`]s stamp event records
//! for humans, while [`MonotonicTime`] drives all scheduling decisions. The
//! two are never compared or converted.

use std::ops::Add;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// UTC timestamp used on event records and log output.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// A monotonic instant, measured as the elapsed time since an arbitrary
/// origin chosen by the clock implementation.
///
/// Values from different clocks must not be mixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonotonicTime(Duration);

impl MonotonicTime {
    /// The clock origin.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Build from the elapsed time since the clock origin.
    #[must_use]
    pub fn from_duration(since_origin: Duration) -> Self {
        Self(since_origin)
    }

    /// Build from whole seconds since the clock origin.
    #[must_use]
    pub fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    /// Elapsed time since the clock origin.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        self.0
    }

    /// Elapsed time since `earlier`, saturating to zero if `earlier` is
    /// in the future.
    #[must_use]
    pub fn duration_since(self, earlier: Self) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<Duration> for MonotonicTime {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs)
    }
}

/// When a scheduled callback should next fire.
///
/// [`Deadline::Never`] is the park sentinel: a timer rescheduled to `Never`
/// stays registered but will not fire until rescheduled to a concrete time.
/// Cancellation is expressed purely through this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// Fire at the given monotonic time (which may already have passed,
    /// meaning "as soon as possible").
    At(MonotonicTime),
    /// Do not fire until rescheduled.
    Never,
}

impl Deadline {
    /// `true` for the park sentinel.
    #[must_use]
    pub fn is_never(self) -> bool {
        matches!(self, Self::Never)
    }

    /// The concrete fire time, if any.
    #[must_use]
    pub fn time(self) -> Option<MonotonicTime> {
        match self {
            Self::At(t) => Some(t),
            Self::Never => None,
        }
    }

    /// Whether this deadline has come due at `now`.
    #[must_use]
    pub fn is_due(self, now: MonotonicTime) -> bool {
        match self {
            Self::At(t) => t <= now,
            Self::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_return_current_utc_time() {
        let before = Utc::now();
        let ts = now();
        let after = Utc::now();
        assert!(ts >= before);
        assert!(ts <= after);
    }

    #[test]
    fn should_order_monotonic_times() {
        let a = MonotonicTime::from_secs(5);
        let b = MonotonicTime::from_secs(11);
        assert!(a < b);
        assert_eq!(b.duration_since(a), Duration::from_secs(6));
    }

    #[test]
    fn should_saturate_duration_since_when_earlier_is_later() {
        let a = MonotonicTime::from_secs(5);
        let b = MonotonicTime::from_secs(11);
        assert_eq!(a.duration_since(b), Duration::ZERO);
    }

    #[test]
    fn should_advance_by_adding_a_duration() {
        let t = MonotonicTime::from_secs(5) + Duration::from_secs(3);
        assert_eq!(t, MonotonicTime::from_secs(8));
    }

    #[test]
    fn should_report_at_deadline_due_once_reached() {
        let deadline = Deadline::At(MonotonicTime::from_secs(10));
        assert!(!deadline.is_due(MonotonicTime::from_secs(9)));
        assert!(deadline.is_due(MonotonicTime::from_secs(10)));
        assert!(deadline.is_due(MonotonicTime::from_secs(11)));
    }

    #[test]
    fn should_never_report_never_deadline_due() {
        assert!(!Deadline::Never.is_due(MonotonicTime::from_secs(u64::MAX / 2)));
        assert!(Deadline::Never.is_never());
        assert_eq!(Deadline::Never.time(), None);
    }

    #[test]
    fn should_expose_time_of_at_deadline() {
        let t = MonotonicTime::from_secs(42);
        assert_eq!(Deadline::At(t).time(), Some(t));
        assert!(!Deadline::At(t).is_never());
    }
}
