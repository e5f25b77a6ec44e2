//! Human-readable time formatting ("1h 1m 1.5s")

use std::fmt;
use std::time::Duration;

/// A duration split into base-60 units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeUnits {
    pub hours: u64,
    pub minutes: u64,
    /// Remaining seconds, fractional part kept
    pub seconds: f64,
}

impl fmt::Display for TimeUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours != 0 {
            write!(f, "{}h ", self.hours)?;
        }
        if self.minutes != 0 {
            write!(f, "{}m ", self.minutes)?;
        }
        write!(f, "{:.1}s", self.seconds)
    }
}

/// Split seconds into hours, minutes, and remaining seconds
///
/// Negative and non-finite input is treated as zero.
///
/// # Example
/// ```
/// use taskprof::format::extract_units;
///
/// let units = extract_units(3661.5);
/// assert_eq!((units.hours, units.minutes, units.seconds), (1, 1, 1.5));
/// ```
pub fn extract_units(seconds: f64) -> TimeUnits {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    };

    TimeUnits {
        hours: (total / 3600.0).floor() as u64,
        minutes: ((total % 3600.0) / 60.0).floor() as u64,
        seconds: total % 60.0,
    }
}

/// Render units, omitting zero hours and minutes
///
/// Seconds are always shown with one fractional digit.
pub fn format_time(hours: u64, minutes: u64, seconds: f64) -> String {
    TimeUnits {
        hours,
        minutes,
        seconds,
    }
    .to_string()
}

/// Format a span given in seconds
///
/// The value is rounded to a tenth of a second before splitting, so a span
/// just under a minute boundary renders as "1m 0.0s" rather than "60.0s".
pub fn format_seconds(seconds: f64) -> String {
    extract_units((seconds * 10.0).round() / 10.0).to_string()
}

pub fn format_duration(elapsed: Duration) -> String {
    format_seconds(elapsed.as_secs_f64())
}
