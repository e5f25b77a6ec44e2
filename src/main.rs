use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io;
use taskprof::cli::{Cli, Command, OutputFormat};
use taskprof::config::ProfilerConfig;
use taskprof::event_log::{parse_event_log, replay};
use taskprof::hooks::{PipelineCallbacks, TaskProfiler};
use taskprof::report::{LineSink, Report, WriterSink};
use taskprof::runner::{run_pipeline, Pipeline};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(io::stderr)
            .init();
    }
}

/// Resolve the profiler config from the optional file and `--top`
fn load_config(args: &Cli) -> Result<ProfilerConfig> {
    let config = match &args.config {
        Some(path) => ProfilerConfig::from_file(path)?,
        None => ProfilerConfig::default(),
    };
    Ok(match args.top {
        Some(top) => config.with_top_tasks(top),
        None => config,
    })
}

/// Text reports stream straight to stdout; JSON reports are printed whole
/// once finished, so their lines are collected and dropped
fn report_sink(format: OutputFormat) -> Box<dyn LineSink> {
    match format {
        OutputFormat::Text => Box::new(WriterSink::new(io::stdout())),
        OutputFormat::Json => Box::new(Vec::<String>::new()),
    }
}

fn print_json(format: OutputFormat, report: &Report) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(report)?);
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let config = load_config(&args)?;
    let mut sink = report_sink(args.format);

    match &args.command {
        Command::Replay { log } => {
            let content = fs::read_to_string(log)
                .with_context(|| format!("Failed to read event log: {}", log.display()))?;
            let events = parse_event_log(&content)
                .with_context(|| format!("Invalid event log: {}", log.display()))?;

            let (report, _) = replay(&events, config, &mut *sink)?;
            print_json(args.format, &report)?;
        }
        Command::Run { pipeline } => {
            let pipeline = Pipeline::from_file(pipeline)?;

            let mut profiler = TaskProfiler::new(config, &mut *sink);
            let outcome = run_pipeline(&pipeline, &mut profiler)?;
            let report = profiler.on_stats()?;
            print_json(args.format, &report)?;

            if let Some(failed) = outcome.failed {
                match failed.code {
                    Some(code) => anyhow::bail!("Task '{}' failed with exit code {}", failed.name, code),
                    None => anyhow::bail!("Task '{}' was terminated by a signal", failed.name),
                }
            }
        }
    }

    Ok(())
}
