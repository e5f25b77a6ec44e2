//! Error types for the profiler core
//!
//! All inputs come from a trusted host under a fixed call order, so the only
//! failures are caller contract violations and output sink errors.

use thiserror::Error;

/// Errors raised by the recorder, deriver, and reporter
#[derive(Debug, Error)]
pub enum ProfilerError {
    #[error("Pipeline not started: no pipeline start was recorded before reporting")]
    PipelineNotStarted,

    #[error("Pipeline not ended: durations requested before pipeline end was recorded")]
    PipelineNotEnded,

    #[error("Failed to write report line: {0}")]
    Sink(#[from] std::io::Error),

    #[error("Invalid event on line {line}: {message}")]
    InvalidEvent { line: usize, message: String },
}
