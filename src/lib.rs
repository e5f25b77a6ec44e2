//! taskprof - per-task runtime profiler for sequential pipelines
//!
//! The host pipeline reports when the run starts and when each task (or
//! handler task) begins. At the end of the run the profiler derives every
//! task's duration from consecutive start times, ranks them, and prints a
//! fixed-width summary of the slowest tasks.

pub mod cli;
pub mod clock;
pub mod config;
pub mod derive;
pub mod error;
pub mod event_log;
pub mod format;
pub mod hooks;
pub mod rank;
pub mod recorder;
pub mod report;
pub mod runner;
