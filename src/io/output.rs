use crate::analysis::AnalysisResult;
use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub trait OutputWriter {
    fn write_results(&mut self, results: &AnalysisResult) -> anyhow::Result<()>;
}

pub fn create_writer<'w>(
    format: OutputFormat,
    writer: Box<dyn Write + 'w>,
) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Text => Box::new(TextWriter::new(writer)),
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_results(&mut self, results: &AnalysisResult) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(results)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

/// Human-readable report
pub struct TextWriter<W: Write> {
    writer: W,
}

impl<W: Write> TextWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TextWriter<W> {
    fn write_results(&mut self, results: &AnalysisResult) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "=== Process Analysis Report ===".bold())?;
        writeln!(self.writer)?;
        self.write_metrics(results)?;
        self.write_reachability(results)?;
        self.write_deadlocks(results)?;
        self.write_paths(results)?;
        self.write_workload(results)?;
        self.write_warnings(results)?;
        Ok(())
    }
}

impl<W: Write> TextWriter<W> {
    fn write_metrics(&mut self, results: &AnalysisResult) -> anyhow::Result<()> {
        let metrics = &results.metrics;
        let counts = &metrics.elements;
        writeln!(self.writer, "{}", "Process Metrics:".bold())?;
        writeln!(self.writer, "  Total Elements: {}", counts.total)?;
        writeln!(self.writer, "  - Events: {}", counts.events)?;
        writeln!(self.writer, "  - Activities: {}", counts.activities)?;
        writeln!(self.writer, "  - Gateways: {}", counts.gateways)?;
        writeln!(self.writer, "  - Sequence Flows: {}", counts.flows)?;
        writeln!(self.writer, "  Complexity Score: {}", metrics.complexity)?;
        writeln!(self.writer, "  Process Depth: {}", metrics.depth)?;
        writeln!(self.writer, "  Process Width: {}", metrics.width)?;
        writeln!(self.writer, "  Connectivity: {:.2}", metrics.connectivity)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_reachability(&mut self, results: &AnalysisResult) -> anyhow::Result<()> {
        let reachability = &results.reachability;
        writeln!(self.writer, "{}", "Reachability Analysis:".bold())?;
        self.write_id_list(
            &reachability.unreachable_elements,
            "Unreachable Elements:",
            "All elements are reachable from start",
        )?;
        self.write_id_list(
            &reachability.dead_end_elements,
            "Dead-end Elements:",
            "All elements can reach an end event",
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_deadlocks(&mut self, results: &AnalysisResult) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Deadlock Detection:".bold())?;
        if results.deadlocks.is_empty() {
            writeln!(self.writer, "  {} No deadlocks detected", "✓".green())?;
        } else {
            writeln!(self.writer, "  {} Potential Deadlocks Found:", "⚠".yellow())?;
            for deadlock in &results.deadlocks {
                writeln!(
                    self.writer,
                    "    - Type: {}",
                    deadlock.kind.to_string().red()
                )?;
                writeln!(
                    self.writer,
                    "      Elements: {}",
                    deadlock.elements.join(", ")
                )?;
                writeln!(self.writer, "      Description: {}", deadlock.description)?;
            }
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_paths(&mut self, results: &AnalysisResult) -> anyhow::Result<()> {
        let paths = &results.paths;
        writeln!(self.writer, "{}", "Path Analysis:".bold())?;
        let truncated = if paths.truncated { " (truncated)" } else { "" };
        writeln!(
            self.writer,
            "  Total Paths: {}{}",
            paths.path_count(),
            truncated
        )?;
        if paths.path_count() > 0 {
            writeln!(
                self.writer,
                "  Shortest Path Length: {}",
                paths.min_path_length
            )?;
            writeln!(
                self.writer,
                "  Longest Path Length: {}",
                paths.max_path_length
            )?;
            writeln!(
                self.writer,
                "  Average Path Length: {:.2}",
                paths.average_path_length
            )?;
            writeln!(
                self.writer,
                "  Critical Path: {}",
                paths.critical_path.join(" -> ")
            )?;
        }

        if paths.loop_detected {
            writeln!(
                self.writer,
                "  {} Loops Detected: {}",
                "⚠".yellow(),
                paths.loops.len()
            )?;
            for (i, lp) in paths.loops.iter().enumerate() {
                writeln!(
                    self.writer,
                    "    Loop {}: {}",
                    i + 1,
                    lp.elements.join(" -> ")
                )?;
            }
        } else {
            writeln!(self.writer, "  {} No loops detected", "✓".green())?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_workload(&mut self, results: &AnalysisResult) -> anyhow::Result<()> {
        let workload = &results.agent_workload;
        writeln!(self.writer, "{}", "Agent Workload Analysis:".bold())?;
        if !workload.agent_tasks.is_empty() {
            writeln!(self.writer, "  Task Distribution:")?;
            for (agent, tasks) in &workload.agent_tasks {
                writeln!(self.writer, "    - {}: {} tasks", agent, tasks.len())?;
            }
            writeln!(
                self.writer,
                "  Workload Balance Score: {:.2}",
                workload.workload_balance
            )?;
            if !workload.overloaded_agents.is_empty() {
                writeln!(
                    self.writer,
                    "  {} Overloaded Agents: {}",
                    "⚠".yellow(),
                    workload.overloaded_agents.join(", ")
                )?;
            }
        }
        if !workload.unassigned_tasks.is_empty() {
            writeln!(
                self.writer,
                "  {} Unassigned Tasks: {}",
                "⚠".yellow(),
                workload.unassigned_tasks.len()
            )?;
        }
        Ok(())
    }

    fn write_warnings(&mut self, results: &AnalysisResult) -> anyhow::Result<()> {
        if results.warnings.is_empty() {
            return Ok(());
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", "Analysis Warnings:".bold())?;
        for warning in &results.warnings {
            writeln!(self.writer, "  - {}", warning)?;
        }
        Ok(())
    }

    fn write_id_list(&mut self, ids: &[String], heading: &str, clean: &str) -> anyhow::Result<()> {
        if ids.is_empty() {
            writeln!(self.writer, "  {} {}", "✓".green(), clean)?;
        } else {
            writeln!(self.writer, "  {} {}", "⚠".yellow(), heading)?;
            for id in ids {
                writeln!(self.writer, "    - {}", id)?;
            }
        }
        Ok(())
    }
}
