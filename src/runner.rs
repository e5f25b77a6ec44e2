//! Sequential shell-command pipeline host
//!
//! Runs the tasks of a TOML pipeline file one after another, notifying a
//! [`PipelineCallbacks`] implementation as each begins. Command output is
//! captured and only surfaced through logging.
//!
//! ```toml
//! [[task]]
//! name = "build"
//! command = "make"
//!
//! [[task]]
//! name = "reload"
//! command = "systemctl reload app"
//! handler = true
//! ```

use crate::hooks::PipelineCallbacks;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::process::Command;

/// One step of a pipeline file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineTask {
    pub name: String,
    /// Shell command line, run with `sh -c`
    pub command: String,
    /// Report the step as a handler task
    #[serde(default)]
    pub handler: bool,
}

/// Ordered list of pipeline steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pipeline {
    #[serde(rename = "task", default)]
    pub tasks: Vec<PipelineTask>,
}

impl Pipeline {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse pipeline definition")
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read pipeline file: {}", path.as_ref().display())
        })?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid pipeline file: {}", path.as_ref().display()))
    }
}

/// A step whose command exited unsuccessfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTask {
    pub name: String,
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

/// Result of running a pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// Number of steps that ran to success
    pub completed: usize,
    /// First failing step; later steps were not started
    pub failed: Option<FailedTask>,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.failed.is_none()
    }
}

/// Run every step in order, stopping at the first failure
///
/// The host is notified of the pipeline start and of each step start. It is
/// left to the caller to request the final stats.
///
/// # Errors
/// Returns error if a command can't be spawned at all.
pub fn run_pipeline<H>(pipeline: &Pipeline, host: &mut H) -> Result<RunOutcome>
where
    H: PipelineCallbacks + ?Sized,
{
    let mut outcome = RunOutcome::default();
    host.on_pipeline_start();

    for task in &pipeline.tasks {
        if task.handler {
            host.on_handler_task_start(&task.name);
        } else {
            host.on_task_start(&task.name, false);
        }

        tracing::debug!(task = %task.name, command = %task.command, "running task");
        let output = Command::new("sh")
            .arg("-c")
            .arg(&task.command)
            .output()
            .with_context(|| format!("Failed to spawn command for task '{}'", task.name))?;

        if !output.status.success() {
            tracing::warn!(
                task = %task.name,
                code = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                "task failed, stopping pipeline"
            );
            outcome.failed = Some(FailedTask {
                name: task.name.clone(),
                code: output.status.code(),
            });
            break;
        }

        tracing::debug!(
            task = %task.name,
            stdout = %String::from_utf8_lossy(&output.stdout).trim_end(),
            "task finished"
        );
        outcome.completed += 1;
    }

    Ok(outcome)
}
