//! Text Output
//!
//! Human-readable rendering of the report tree, one indented line per fact.

use crate::node::{ReportNode, ReportNodes};
use crate::report::{BenchmarkReport, BenchmarksCollectionReport, BenchmarksContainerReport, Failure, IterationReport};
use chrono::{DateTime, Utc};
use tinybench_stats::BaselineStats;

/// Format nanoseconds with an adaptive unit
pub fn format_duration(ns: u64) -> String {
    match ns {
        0..1_000 => format!("{} ns", ns),
        1_000..1_000_000 => format!("{:.3} µs", ns as f64 / 1e3),
        1_000_000..1_000_000_000 => format!("{:.3} ms", ns as f64 / 1e6),
        _ => format!("{:.3} s", ns as f64 / 1e9),
    }
}

/// Format a signed nanosecond difference, always with a sign
pub fn format_signed_duration(ns: i64) -> String {
    let sign = if ns < 0 { '-' } else { '+' };
    format!("{}{}", sign, format_duration(ns.unsigned_abs()))
}

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string()
}

fn format_stats(stats: &BaselineStats) -> String {
    format!(
        "ratio: {:.3}, efficiency: {:.3}, avg. time diff: {}",
        stats.ratio,
        stats.efficiency,
        format_signed_duration(stats.time_difference_ns)
    )
}

fn format_failure(failure: &Failure) -> String {
    format!("[{}] {:?}: {}", failure.stage, failure.kind, failure.message)
}

/// Text exporter
#[derive(Debug, Clone, Copy)]
pub struct TextExporter {
    /// Render one block per measured iteration
    pub include_iterations: bool,
}

impl Default for TextExporter {
    fn default() -> Self {
        Self {
            include_iterations: true,
        }
    }
}

impl TextExporter {
    /// Exporter with iteration blocks switched on or off
    pub fn new(include_iterations: bool) -> Self {
        Self { include_iterations }
    }

    /// Render a sequence run
    pub fn export(&self, report: &BenchmarksCollectionReport) -> String {
        self.render(report.walk())
    }

    /// Render a single container run
    pub fn export_container(&self, report: &BenchmarksContainerReport) -> String {
        self.render(report.walk())
    }

    fn render(&self, nodes: ReportNodes<'_>) -> String {
        let mut output = String::new();
        for node in nodes {
            // Containers are the outermost printed level
            let indent = "  ".repeat(node.depth().saturating_sub(1));
            match node {
                ReportNode::Collection(c) => self.collection(&mut output, c),
                ReportNode::Container(c) => self.container(&mut output, &indent, c),
                ReportNode::Benchmark(b) => self.benchmark(&mut output, &indent, b),
                ReportNode::Iteration(i) if self.include_iterations => {
                    self.iteration(&mut output, &indent, i)
                }
                ReportNode::Iteration(_) => {}
            }
        }
        output
    }

    fn collection(&self, output: &mut String, c: &BenchmarksCollectionReport) {
        output.push_str(&format!(
            "Benchmarks collection: {} container(s)\n",
            c.containers.len()
        ));
        output.push_str(&format!("started: {}\n", format_timestamp(&c.started_at)));
        output.push_str(&format!("duration: {}\n\n", format_duration(c.duration_ns)));
    }

    fn container(&self, output: &mut String, indent: &str, c: &BenchmarksContainerReport) {
        output.push_str(&format!("{}Container \"{}\"\n", indent, c.name));
        output.push_str(&format!("{}  started: {}\n", indent, format_timestamp(&c.started_at)));
        output.push_str(&format!("{}  duration: {}\n", indent, format_duration(c.duration_ns)));
        if let Some(error) = &c.configuration_error {
            output.push_str(&format!("{}  configuration error: {}\n", indent, error));
        }
        if c.cancelled {
            output.push_str(&format!("{}  cancelled\n", indent));
        }
    }

    fn benchmark(&self, output: &mut String, indent: &str, b: &BenchmarkReport) {
        output.push_str(&format!("{}Benchmark \"{}\"\n", indent, b.name));
        match &b.parameters {
            Some(parameters) => {
                output.push_str(&format!("{}  parameters:\n", indent));
                for p in parameters {
                    output.push_str(&format!("{}    - {} = {}\n", indent, p.name, p.value));
                }
            }
            None => output.push_str(&format!("{}  without parameters\n", indent)),
        }
        if let Some(arguments) = &b.arguments {
            let rendered: Vec<String> = arguments
                .iter()
                .map(|a| format!("{}={}", a.name, a.value.literal()))
                .collect();
            output.push_str(&format!("{}  arguments: {}\n", indent, rendered.join(", ")));
        }
        output.push_str(&format!("{}  started: {}\n", indent, format_timestamp(&b.started_at)));
        output.push_str(&format!("{}  duration: {}\n", indent, format_duration(b.duration_ns)));
        output.push_str(&format!("{}  init: {}\n", indent, format_duration(b.init_duration_ns)));
        output.push_str(&format!("{}  warmup: {}\n", indent, format_duration(b.warmup_duration_ns)));
        output.push_str(&format!(
            "{}  iterations: {} ({} successful)\n",
            indent, b.iterations, b.successful_iterations
        ));
        output.push_str(&format!(
            "{}  avg. duration: {}\n",
            indent,
            format_duration(b.average_duration_ns)
        ));
        if b.baseline {
            output.push_str(&format!("{}  BASELINE\n", indent));
        } else if let Some(stats) = &b.baseline_stats {
            output.push_str(&format!("{}  {}\n", indent, format_stats(stats)));
        }
        if b.failed() {
            output.push_str(&format!("{}  failures: {}\n", indent, b.failures.len()));
            for failure in &b.failures {
                output.push_str(&format!("{}    - {}\n", indent, format_failure(failure)));
            }
        }
    }

    fn iteration(&self, output: &mut String, indent: &str, i: &IterationReport) {
        output.push_str(&format!("{}Iteration {}\n", indent, i.index));
        output.push_str(&format!("{}  started: {}\n", indent, format_timestamp(&i.started_at)));
        output.push_str(&format!("{}  duration: {}\n", indent, format_duration(i.duration_ns)));
        if let Some(stats) = &i.baseline_stats {
            output.push_str(&format!("{}  {}\n", indent, format_stats(stats)));
        }
        if let Some(failure) = &i.failure {
            output.push_str(&format!("{}  [Failed] {}\n", indent, failure.message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0 ns");
        assert_eq!(format_duration(999), "999 ns");
        assert_eq!(format_duration(1_500), "1.500 µs");
        assert_eq!(format_duration(2_000_000), "2.000 ms");
        assert_eq!(format_duration(3_250_000_000), "3.250 s");
    }

    #[test]
    fn test_format_signed_duration() {
        assert_eq!(format_signed_duration(50), "+50 ns");
        assert_eq!(format_signed_duration(-300), "-300 ns");
        assert_eq!(format_signed_duration(0), "+0 ns");
        assert_eq!(format_signed_duration(i64::MIN), format!("-{}", format_duration(1 << 63)));
    }
}
