//! Clock sources for task timestamps
//!
//! Timestamps are offsets from a clock's own origin. The recorder only ever
//! subtracts two readings of the same clock, so the origin never leaks into
//! reported durations.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A single clock reading, measured from the clock's origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(Duration);

impl Timestamp {
    /// The clock origin
    pub const ZERO: Timestamp = Timestamp(Duration::ZERO);

    pub fn from_duration(offset: Duration) -> Self {
        Self(offset)
    }

    /// Build a timestamp from fractional seconds since the origin
    ///
    /// Negative, non-finite, and overflowing values collapse to the origin.
    pub fn from_secs_f64(secs: f64) -> Self {
        Duration::try_from_secs_f64(secs)
            .map(Self)
            .unwrap_or(Self::ZERO)
    }

    pub fn as_duration(self) -> Duration {
        self.0
    }

    /// Time elapsed since `earlier`, or `None` if `earlier` is later than `self`
    pub fn checked_duration_since(self, earlier: Timestamp) -> Option<Duration> {
        self.0.checked_sub(earlier.0)
    }

    /// Time elapsed since `earlier`, clamped to zero
    pub fn saturating_duration_since(self, earlier: Timestamp) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

/// Source of timestamps for the recorder
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time from the monotonic `Instant` source
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed())
    }
}

/// Externally driven clock
///
/// Clones share the same reading, so a test (or an event-log replay) can keep
/// one handle and move time forward while the recorder owns another.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use taskprof::clock::{Clock, ManualClock, Timestamp};
///
/// let clock = ManualClock::new();
/// let handle = clock.clone();
/// handle.advance(Duration::from_secs(5));
/// assert_eq!(clock.now(), Timestamp::from_duration(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    /// Create a clock reading the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Jump to an absolute reading (may move backwards)
    pub fn set(&self, at: Timestamp) {
        let nanos = u64::try_from(at.as_duration().as_nanos()).unwrap_or(u64::MAX);
        self.nanos.store(nanos, Ordering::SeqCst);
    }

    /// Move the reading forward
    pub fn advance(&self, by: Duration) {
        let by = u64::try_from(by.as_nanos()).unwrap_or(u64::MAX);
        let _ = self
            .nanos
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                Some(n.saturating_add(by))
            });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(Duration::from_nanos(self.nanos.load(Ordering::SeqCst)))
    }
}
