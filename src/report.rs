//! Final summary report
//!
//! Runs the derive → rank → format chain once the pipeline completes and
//! writes fixed-width lines to a [`LineSink`]:
//!
//! ```text
//! Playbook runtime                                                          12.0s
//! Top 10 tasks:
//! B                                                                          7.0s
//! A                                                                          5.0s
//! ```

use crate::clock::Clock;
use crate::config::ProfilerConfig;
use crate::error::ProfilerError;
use crate::format::format_duration;
use crate::rank::rank;
use crate::recorder::Recorder;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::time::Duration;

/// Line-oriented destination for report output
pub trait LineSink {
    fn write_line(&mut self, line: &str) -> io::Result<()>;
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}

/// Collects lines in memory
impl LineSink for Vec<String> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// Writes newline-terminated lines to any `io::Write`
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{line}")?;
        self.writer.flush()
    }
}

/// Emits each line as an `info` event on the `taskprof::report` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LineSink for TracingSink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        tracing::info!(target: "taskprof::report", "{line}");
        Ok(())
    }
}

/// One ranked entry of a finished report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTask {
    pub label: String,
    pub elapsed_seconds: f64,
    /// Human-readable form, e.g. "1m 3.2s"
    pub elapsed: String,
}

/// Summary of a finished pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub runtime_seconds: f64,
    pub runtime: String,
    /// Configured top-N limit
    pub top_tasks: usize,
    /// Slowest tasks, longest first
    pub tasks: Vec<RankedTask>,
}

/// Renders the end-of-pipeline summary
#[derive(Debug, Clone, Default)]
pub struct Reporter {
    config: ProfilerConfig,
}

impl Reporter {
    pub fn new(config: ProfilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProfilerConfig {
        &self.config
    }

    /// Write the runtime line and the top-N slowest tasks
    ///
    /// Records the pipeline end first if the host has not done so.
    ///
    /// # Errors
    /// [`ProfilerError::PipelineNotStarted`] if no pipeline start was
    /// recorded (nothing is written), or [`ProfilerError::Sink`] if a line
    /// can't be written.
    pub fn report_final_stats<C, S>(
        &self,
        recorder: &mut Recorder<C>,
        sink: &mut S,
    ) -> Result<Report, ProfilerError>
    where
        C: Clock,
        S: LineSink + ?Sized,
    {
        if recorder.window().ended_at.is_none() {
            recorder.record_pipeline_end();
        }
        let runtime = recorder.window().runtime()?;

        let runtime_text = format_duration(runtime);
        sink.write_line(&self.format_line(&self.config.runtime_label, &runtime_text))?;

        let ranked = rank(recorder.durations()?, self.config.top_tasks);
        tracing::debug!(
            recorded = recorder.timeline().len(),
            shown = ranked.len(),
            "ranked task durations"
        );

        sink.write_line(&format!("Top {} tasks:", self.config.top_tasks))?;
        let mut tasks = Vec::with_capacity(ranked.len());
        for record in ranked {
            let elapsed = format_duration(record.elapsed);
            sink.write_line(&self.format_line(record.label, &elapsed))?;
            tasks.push(RankedTask {
                label: record.label.to_string(),
                elapsed_seconds: record.elapsed_seconds(),
                elapsed,
            });
        }

        Ok(Report {
            runtime_seconds: runtime.as_secs_f64(),
            runtime: runtime_text,
            top_tasks: self.config.top_tasks,
            tasks,
        })
    }

    fn format_line(&self, label: &str, duration: &str) -> String {
        format!(
            "{label:<label_width$}{duration:>duration_width$}",
            label_width = self.config.label_width,
            duration_width = self.config.duration_width,
        )
    }
}

impl Report {
    pub fn runtime(&self) -> Duration {
        Duration::from_secs_f64(self.runtime_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn scenario() -> Recorder<ManualClock> {
        let clock = ManualClock::new();
        let mut recorder = Recorder::with_clock(clock.clone());
        recorder.record_pipeline_start();
        recorder.record_start("A");
        clock.advance(Duration::from_secs(5));
        recorder.record_start("B");
        clock.advance(Duration::from_secs(7));
        recorder.record_pipeline_end();
        recorder
    }

    #[test]
    fn test_report_lines() {
        let mut recorder = scenario();
        let mut lines: Vec<String> = Vec::new();

        Reporter::default()
            .report_final_stats(&mut recorder, &mut lines)
            .unwrap();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], format!("{:<65}{:>14}", "Playbook runtime", "12.0s"));
        assert_eq!(lines[1], "Top 10 tasks:");
        assert_eq!(lines[2], format!("{:<65}{:>14}", "B", "7.0s"));
        assert_eq!(lines[3], format!("{:<65}{:>14}", "A", "5.0s"));
    }

    #[test]
    fn test_report_summary() {
        let mut recorder = scenario();
        let report = Reporter::default()
            .report_final_stats(&mut recorder, &mut Vec::<String>::new())
            .unwrap();

        assert_eq!(report.runtime, "12.0s");
        assert_eq!(report.runtime(), Duration::from_secs(12));
        assert_eq!(report.top_tasks, 10);
        let labels: Vec<_> = report.tasks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "A"]);
        assert_eq!(report.tasks[0].elapsed_seconds, 7.0);
    }

    #[test]
    fn test_report_records_missing_end() {
        let clock = ManualClock::new();
        let mut recorder = Recorder::with_clock(clock.clone());
        recorder.record_pipeline_start();
        recorder.record_start("only");
        clock.advance(Duration::from_secs(3));

        let report = Reporter::default()
            .report_final_stats(&mut recorder, &mut Vec::<String>::new())
            .unwrap();

        assert!(recorder.window().ended_at.is_some());
        assert_eq!(report.tasks[0].elapsed, "3.0s");
    }

    #[test]
    fn test_report_keeps_existing_end() {
        let mut recorder = scenario();
        let end = recorder.window().ended_at;
        recorder.clock().advance(Duration::from_secs(100));

        let report = Reporter::default()
            .report_final_stats(&mut recorder, &mut Vec::<String>::new())
            .unwrap();

        assert_eq!(recorder.window().ended_at, end);
        assert_eq!(report.runtime, "12.0s");
    }

    #[test]
    fn test_report_without_start_fails_fast() {
        let mut recorder = Recorder::with_clock(ManualClock::new());
        recorder.record_start("orphan");
        let mut lines: Vec<String> = Vec::new();

        let result = Reporter::default().report_final_stats(&mut recorder, &mut lines);

        assert!(matches!(result, Err(ProfilerError::PipelineNotStarted)));
        assert!(lines.is_empty());
    }

    #[test]
    fn test_report_zero_tasks() {
        let mut recorder = Recorder::with_clock(ManualClock::new());
        recorder.record_pipeline_start();
        let mut lines: Vec<String> = Vec::new();

        let report = Reporter::default()
            .report_final_stats(&mut recorder, &mut lines)
            .unwrap();

        assert!(report.tasks.is_empty());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Top 10 tasks:");
    }

    #[test]
    fn test_report_respects_top_tasks_and_widths() {
        let clock = ManualClock::new();
        let mut recorder = Recorder::with_clock(clock.clone());
        recorder.record_pipeline_start();
        for secs in [1, 4, 2, 3] {
            recorder.record_start(format!("task-{secs}"));
            clock.advance(Duration::from_secs(secs));
        }

        let config = ProfilerConfig {
            top_tasks: 2,
            label_width: 10,
            duration_width: 8,
            runtime_label: "Total".to_string(),
        };
        let mut lines: Vec<String> = Vec::new();
        Reporter::new(config)
            .report_final_stats(&mut recorder, &mut lines)
            .unwrap();

        assert_eq!(
            lines,
            vec![
                "Total        10.0s".to_string(),
                "Top 2 tasks:".to_string(),
                "task-4        4.0s".to_string(),
                "task-3        3.0s".to_string(),
            ]
        );
    }

    #[test]
    fn test_writer_sink_appends_newlines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_line("one").unwrap();
        sink.write_line("two").unwrap();
        assert_eq!(sink.into_inner(), b"one\ntwo\n");
    }

    #[test]
    fn test_tracing_sink_accepts_lines() {
        let mut sink = TracingSink;
        assert!(sink.write_line("Top 10 tasks:").is_ok());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut recorder = scenario();
        let report = Reporter::default()
            .report_final_stats(&mut recorder, &mut Vec::<String>::new())
            .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["runtime"], "12.0s");
        assert_eq!(json["tasks"][0]["label"], "B");
        assert_eq!(json["tasks"][1]["elapsed_seconds"], 5.0);
    }
}
