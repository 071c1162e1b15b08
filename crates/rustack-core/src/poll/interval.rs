//! Fixed-interval schedule with an optional ceiling.

use super::PollClock;
use std::time::Duration;

/// A constant delay between checks, optionally bounded by a total ceiling.
///
/// The ceiling is compared against time elapsed since [`FixedInterval::start`]
/// *after* each sleep, so a wait with interval `i` and ceiling `c` gives up on
/// the first tick where elapsed time is strictly greater than `c`.
///
/// # Examples
///
/// ```rust
/// use rustack_core::poll::FixedInterval;
/// use std::time::Duration;
///
/// // Lock conflicts: retry every 500ms for at most 20 minutes
/// let lock_retry = FixedInterval::new(Duration::from_millis(500))
///     .with_ceiling(Duration::from_secs(1200));
///
/// // Lock wait: check every second, forever
/// let lock_wait = FixedInterval::new(Duration::from_secs(1));
/// assert_eq!(lock_wait.ceiling(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInterval {
    interval: Duration,
    ceiling: Option<Duration>,
}

impl FixedInterval {
    /// Create an unbounded schedule that sleeps `interval` between checks.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            ceiling: None,
        }
    }

    /// Bound the total wait.
    pub fn with_ceiling(mut self, ceiling: Duration) -> Self {
        self.ceiling = Some(ceiling);
        self
    }

    /// Bound the total wait when `ceiling` is `Some`, leave it unbounded otherwise.
    pub fn with_optional_ceiling(mut self, ceiling: Option<Duration>) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Delay between checks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ceiling on the total wait, if any.
    pub fn ceiling(&self) -> Option<Duration> {
        self.ceiling
    }

    /// Start a wait on this schedule. Elapsed time is measured from now.
    pub fn start(&self) -> PollClock {
        PollClock::new(*self)
    }
}
