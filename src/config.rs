//! Profiler configuration loaded from TOML
//!
//! Every field has a default, so an empty file (or no file) is valid.
//!
//! ```toml
//! top_tasks = 10
//! label_width = 65
//! duration_width = 14
//! runtime_label = "Playbook runtime"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// How many tasks the summary shows by default
pub const DEFAULT_TOP_TASKS: usize = 10;

/// Report settings, fixed for the lifetime of a run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfilerConfig {
    /// Number of slowest tasks listed in the summary
    pub top_tasks: usize,
    /// Minimum width of the left-justified label column
    pub label_width: usize,
    /// Minimum width of the right-justified duration column
    pub duration_width: usize,
    /// Label of the total-runtime line
    pub runtime_label: String,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            top_tasks: DEFAULT_TOP_TASKS,
            label_width: 65,
            duration_width: 14,
            runtime_label: "Playbook runtime".to_string(),
        }
    }
}

impl ProfilerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse profiler configuration")
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// Returns error if the file can't be read, has invalid TOML syntax, or
    /// contains unknown keys.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read profiler config: {}", path.as_ref().display())
        })?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid profiler config: {}", path.as_ref().display()))
    }

    /// Replace the top-N setting (used for command-line overrides)
    pub fn with_top_tasks(mut self, top_tasks: usize) -> Self {
        self.top_tasks = top_tasks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ProfilerConfig::default();
        assert_eq!(config.top_tasks, 10);
        assert_eq!(config.label_width, 65);
        assert_eq!(config.duration_width, 14);
        assert_eq!(config.runtime_label, "Playbook runtime");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = ProfilerConfig::from_toml_str("").unwrap();
        assert_eq!(config, ProfilerConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = ProfilerConfig::from_toml_str("top_tasks = 3\nruntime_label = \"Total\"").unwrap();
        assert_eq!(config.top_tasks, 3);
        assert_eq!(config.runtime_label, "Total");
        assert_eq!(config.label_width, 65);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ProfilerConfig::from_toml_str("top_task = 3").is_err());
    }

    #[test]
    fn test_invalid_type_rejected() {
        assert!(ProfilerConfig::from_toml_str("top_tasks = -1").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "top_tasks = 5").unwrap();

        let config = ProfilerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.top_tasks, 5);
    }

    #[test]
    fn test_from_missing_file() {
        let err = ProfilerConfig::from_file("/nonexistent/taskprof.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read profiler config"));
    }

    #[test]
    fn test_with_top_tasks() {
        let config = ProfilerConfig::default().with_top_tasks(20);
        assert_eq!(config.top_tasks, 20);
    }
}
