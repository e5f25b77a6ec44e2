//! Lifecycle callbacks between the host pipeline and the profiler
//!
//! The host calls the [`PipelineCallbacks`] methods directly, or hands
//! [`LifecycleEvent`] values to [`dispatch`] when events arrive as data
//! (for example from an event log).

use crate::clock::{Clock, MonotonicClock};
use crate::config::ProfilerConfig;
use crate::error::ProfilerError;
use crate::recorder::Recorder;
use crate::report::{LineSink, Report, Reporter};

/// Notifications a sequential pipeline host emits, in execution order
pub trait PipelineCallbacks {
    /// Run begins (called once)
    fn on_pipeline_start(&mut self);

    /// A task begins executing
    fn on_task_start(&mut self, name: &str, is_conditional: bool);

    /// A handler task (triggered by another task's outcome) begins executing
    fn on_handler_task_start(&mut self, name: &str);

    /// Run finished; produce the summary (called once)
    fn on_stats(&mut self) -> Result<Report, ProfilerError>;
}

/// A host notification carried as data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    PipelineStart,
    TaskStart { name: String, is_conditional: bool },
    HandlerTaskStart { name: String },
    Stats,
}

/// Route an event to the matching callback
///
/// Returns the report when the event is [`LifecycleEvent::Stats`].
pub fn dispatch<H>(handler: &mut H, event: LifecycleEvent) -> Result<Option<Report>, ProfilerError>
where
    H: PipelineCallbacks + ?Sized,
{
    match event {
        LifecycleEvent::PipelineStart => handler.on_pipeline_start(),
        LifecycleEvent::TaskStart {
            name,
            is_conditional,
        } => handler.on_task_start(&name, is_conditional),
        LifecycleEvent::HandlerTaskStart { name } => handler.on_handler_task_start(&name),
        LifecycleEvent::Stats => return handler.on_stats().map(Some),
    }
    Ok(None)
}

/// Task and pipeline profiler wired to a host through [`PipelineCallbacks`]
///
/// # Example
/// ```
/// use std::time::Duration;
/// use taskprof::clock::ManualClock;
/// use taskprof::config::ProfilerConfig;
/// use taskprof::hooks::{PipelineCallbacks, TaskProfiler};
///
/// let clock = ManualClock::new();
/// let mut profiler = TaskProfiler::with_clock(ProfilerConfig::default(), clock.clone(), Vec::<String>::new());
///
/// profiler.on_pipeline_start();
/// profiler.on_task_start("compile", false);
/// clock.advance(Duration::from_secs(3));
/// let report = profiler.on_stats()?;
///
/// assert_eq!(report.tasks[0].elapsed, "3.0s");
/// assert_eq!(profiler.sink()[1], "Top 10 tasks:");
/// # Ok::<(), taskprof::error::ProfilerError>(())
/// ```
#[derive(Debug)]
pub struct TaskProfiler<C, S> {
    recorder: Recorder<C>,
    reporter: Reporter,
    sink: S,
}

impl<S: LineSink> TaskProfiler<MonotonicClock, S> {
    pub fn new(config: ProfilerConfig, sink: S) -> Self {
        Self::with_clock(config, MonotonicClock::new(), sink)
    }
}

impl<C: Clock, S: LineSink> TaskProfiler<C, S> {
    pub fn with_clock(config: ProfilerConfig, clock: C, sink: S) -> Self {
        Self {
            recorder: Recorder::with_clock(clock),
            reporter: Reporter::new(config),
            sink,
        }
    }

    pub fn recorder(&self) -> &Recorder<C> {
        &self.recorder
    }

    /// Mark the pipeline end ahead of the stats callback
    pub fn finish(&mut self) {
        self.recorder.record_pipeline_end();
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<C: Clock, S: LineSink> PipelineCallbacks for TaskProfiler<C, S> {
    fn on_pipeline_start(&mut self) {
        self.recorder.record_pipeline_start();
    }

    fn on_task_start(&mut self, name: &str, _is_conditional: bool) {
        self.recorder.record_start(name);
    }

    fn on_handler_task_start(&mut self, name: &str) {
        self.recorder.record_handler_start(name);
    }

    fn on_stats(&mut self) -> Result<Report, ProfilerError> {
        self.reporter
            .report_final_stats(&mut self.recorder, &mut self.sink)
    }
}
