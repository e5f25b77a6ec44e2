//! JSON-lines lifecycle logs and their replay
//!
//! One event per line; blank lines and `#` comments are skipped. `at` is
//! seconds since the log's origin.
//!
//! ```text
//! {"event":"pipeline_start","at":0.0}
//! {"event":"task_start","name":"A","at":0.0}
//! {"event":"handler_task_start","name":"restart","at":5.0}
//! {"event":"pipeline_end","at":12.0}
//! ```

use crate::clock::{ManualClock, Timestamp};
use crate::config::ProfilerConfig;
use crate::error::ProfilerError;
use crate::hooks::{dispatch, LifecycleEvent, PipelineCallbacks, TaskProfiler};
use crate::report::{LineSink, Report};
use serde::{Deserialize, Serialize};

/// A lifecycle notification captured with its timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LoggedEvent {
    PipelineStart {
        at: f64,
    },
    TaskStart {
        name: String,
        at: f64,
        #[serde(default)]
        is_conditional: bool,
    },
    HandlerTaskStart {
        name: String,
        at: f64,
    },
    PipelineEnd {
        at: f64,
    },
}

impl LoggedEvent {
    /// Seconds since the log origin
    pub fn at(&self) -> f64 {
        match self {
            LoggedEvent::PipelineStart { at }
            | LoggedEvent::TaskStart { at, .. }
            | LoggedEvent::HandlerTaskStart { at, .. }
            | LoggedEvent::PipelineEnd { at } => *at,
        }
    }

    /// Host callback equivalent, `None` for the pipeline end marker
    pub fn lifecycle(&self) -> Option<LifecycleEvent> {
        match self {
            LoggedEvent::PipelineStart { .. } => Some(LifecycleEvent::PipelineStart),
            LoggedEvent::TaskStart {
                name,
                is_conditional,
                ..
            } => Some(LifecycleEvent::TaskStart {
                name: name.clone(),
                is_conditional: *is_conditional,
            }),
            LoggedEvent::HandlerTaskStart { name, .. } => {
                Some(LifecycleEvent::HandlerTaskStart { name: name.clone() })
            }
            LoggedEvent::PipelineEnd { .. } => None,
        }
    }
}

/// Parse a JSON-lines event log
///
/// # Errors
/// [`ProfilerError::InvalidEvent`] with the 1-based line number for malformed
/// JSON, unknown event kinds, or a negative / non-finite `at`.
pub fn parse_event_log(content: &str) -> Result<Vec<LoggedEvent>, ProfilerError> {
    let mut events = Vec::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let event: LoggedEvent =
            serde_json::from_str(line).map_err(|e| ProfilerError::InvalidEvent {
                line: idx + 1,
                message: e.to_string(),
            })?;

        let at = event.at();
        if !at.is_finite() || at < 0.0 {
            return Err(ProfilerError::InvalidEvent {
                line: idx + 1,
                message: format!("timestamp must be a non-negative number of seconds, got {at}"),
            });
        }
        events.push(event);
    }
    Ok(events)
}

/// Feed logged events through a profiler driven by a manual clock
///
/// The summary is written to `sink` after the last event. A log without a
/// `pipeline_end` event ends at its last timestamp.
pub fn replay<S: LineSink>(
    events: &[LoggedEvent],
    config: ProfilerConfig,
    sink: S,
) -> Result<(Report, S), ProfilerError> {
    let clock = ManualClock::new();
    let mut profiler = TaskProfiler::with_clock(config, clock.clone(), sink);
    let mut last = Timestamp::ZERO;

    for event in events {
        let at = Timestamp::from_secs_f64(event.at());
        if at < last {
            tracing::warn!(
                at = event.at(),
                previous = last.as_duration().as_secs_f64(),
                "event log timestamp goes backwards"
            );
        }
        last = at;
        clock.set(at);

        match event.lifecycle() {
            Some(lifecycle) => {
                dispatch(&mut profiler, lifecycle)?;
            }
            None => profiler.finish(),
        }
    }

    let report = profiler.on_stats()?;
    Ok((report, profiler.into_sink()))
}
