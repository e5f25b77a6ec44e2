//! Timeline recording for a single pipeline run
//!
//! The recorder owns the chronological list of task starts plus the pipeline
//! window. Only start instants are captured: a task's duration is derived
//! later from the start of the task that follows it (see [`crate::derive`]).

use crate::clock::{Clock, MonotonicClock, Timestamp};
use crate::derive::{derive, Durations};
use crate::error::ProfilerError;
use std::time::Duration;

/// Marker prepended to handler task labels
pub const HANDLER_PREFIX: &str = "HANDLER: ";

/// A task (or handler) that began executing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStartEvent {
    pub label: String,
    pub started_at: Timestamp,
}

/// Overall run start and end instants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineWindow {
    pub started_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
}

impl PipelineWindow {
    /// Total pipeline runtime
    ///
    /// A window whose end precedes its start yields zero.
    pub fn runtime(&self) -> Result<Duration, ProfilerError> {
        let started = self.started_at.ok_or(ProfilerError::PipelineNotStarted)?;
        let ended = self.ended_at.ok_or(ProfilerError::PipelineNotEnded)?;
        Ok(ended.saturating_duration_since(started))
    }
}

/// Records task starts and the pipeline window for one run
#[derive(Debug)]
pub struct Recorder<C = MonotonicClock> {
    clock: C,
    timeline: Vec<TaskStartEvent>,
    window: PipelineWindow,
}

impl Recorder<MonotonicClock> {
    /// Create a recorder backed by the monotonic system clock
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::new())
    }
}

impl Default for Recorder<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Recorder<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            timeline: Vec::new(),
            window: PipelineWindow::default(),
        }
    }

    /// Record the start of a task, stamped with the current clock reading
    pub fn record_start(&mut self, label: impl Into<String>) {
        let event = TaskStartEvent {
            label: label.into(),
            started_at: self.clock.now(),
        };
        tracing::debug!(
            label = %event.label,
            at = ?event.started_at.as_duration(),
            index = self.timeline.len(),
            "task started"
        );
        self.timeline.push(event);
    }

    /// Record the start of a handler task under the handler prefix
    pub fn record_handler_start(&mut self, name: &str) {
        self.record_start(format!("{HANDLER_PREFIX}{name}"));
    }

    /// Mark the pipeline start (last write wins)
    pub fn record_pipeline_start(&mut self) {
        let now = self.clock.now();
        tracing::debug!(at = ?now.as_duration(), "pipeline started");
        self.window.started_at = Some(now);
    }

    /// Mark the pipeline end (last write wins)
    pub fn record_pipeline_end(&mut self) {
        let now = self.clock.now();
        tracing::debug!(at = ?now.as_duration(), "pipeline ended");
        self.window.ended_at = Some(now);
    }

    pub fn timeline(&self) -> &[TaskStartEvent] {
        &self.timeline
    }

    pub fn window(&self) -> &PipelineWindow {
        &self.window
    }

    /// Per-task durations derived from the current timeline
    pub fn durations(&self) -> Result<Durations<'_>, ProfilerError> {
        derive(&self.timeline, &self.window)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
