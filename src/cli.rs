//! CLI argument parsing for taskprof

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width text table (default)
    Text,
    /// JSON summary for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "taskprof")]
#[command(version)]
#[command(about = "Per-task runtime profiler for sequential pipelines", long_about = None)]
pub struct Cli {
    /// Enable debug tracing on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Profiler configuration file (TOML)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Number of slowest tasks to display (overrides the config file)
    #[arg(long = "top", value_name = "N", global = true)]
    pub top: Option<usize>,

    /// Report format
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a JSON-lines lifecycle log and report task durations
    Replay {
        /// Event log file
        #[arg(value_name = "LOG")]
        log: PathBuf,
    },

    /// Run the shell-command tasks of a TOML pipeline file and profile them
    Run {
        /// Pipeline file
        #[arg(value_name = "PIPELINE")]
        pipeline: PathBuf,
    },
}
