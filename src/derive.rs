//! Duration derivation from start-only events
//!
//! Each task ends when the next one starts; the final task ends at the
//! pipeline end instant. Durations therefore partition the span from the
//! first task start to pipeline end with no gaps or overlaps.

use crate::clock::Timestamp;
use crate::error::ProfilerError;
use crate::recorder::{PipelineWindow, TaskStartEvent};
use std::iter::FusedIterator;
use std::time::Duration;

/// Elapsed time attributed to one recorded task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationRecord<'a> {
    pub label: &'a str,
    pub elapsed: Duration,
}

impl DurationRecord<'_> {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Pair every task start with the boundary that closes it
///
/// Fails with [`ProfilerError::PipelineNotEnded`] when the window has no end
/// instant, since the last task would have no closing boundary.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use taskprof::clock::Timestamp;
/// use taskprof::derive::derive;
/// use taskprof::recorder::{PipelineWindow, TaskStartEvent};
///
/// let at = |s: u64| Timestamp::from_duration(Duration::from_secs(s));
/// let timeline = vec![
///     TaskStartEvent { label: "A".into(), started_at: at(0) },
///     TaskStartEvent { label: "B".into(), started_at: at(5) },
/// ];
/// let window = PipelineWindow { started_at: Some(at(0)), ended_at: Some(at(12)) };
///
/// let elapsed: Vec<_> = derive(&timeline, &window)?.map(|r| r.elapsed).collect();
/// assert_eq!(elapsed, [Duration::from_secs(5), Duration::from_secs(7)]);
/// # Ok::<(), taskprof::error::ProfilerError>(())
/// ```
pub fn derive<'a>(
    timeline: &'a [TaskStartEvent],
    window: &PipelineWindow,
) -> Result<Durations<'a>, ProfilerError> {
    let end = window.ended_at.ok_or(ProfilerError::PipelineNotEnded)?;
    Ok(Durations {
        timeline,
        end,
        next: 0,
    })
}

/// Lazy iterator over derived durations
///
/// A clone continues from the same position. Call [`derive`] again for a
/// fresh pass over the timeline.
#[derive(Debug, Clone)]
pub struct Durations<'a> {
    timeline: &'a [TaskStartEvent],
    end: Timestamp,
    next: usize,
}

impl<'a> Iterator for Durations<'a> {
    type Item = DurationRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.timeline.get(self.next)?;
        self.next += 1;

        let boundary = self
            .timeline
            .get(self.next)
            .map_or(self.end, |following| following.started_at);

        let elapsed = match boundary.checked_duration_since(event.started_at) {
            Some(elapsed) => elapsed,
            None => {
                tracing::warn!(
                    label = %event.label,
                    started = ?event.started_at.as_duration(),
                    boundary = ?boundary.as_duration(),
                    "non-monotonic clock: task ends before it starts, clamping to zero"
                );
                Duration::ZERO
            }
        };

        Some(DurationRecord {
            label: &event.label,
            elapsed,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.timeline.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Durations<'_> {}

impl FusedIterator for Durations<'_> {}
