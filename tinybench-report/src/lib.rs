#![warn(missing_docs)]
//! TinyBench Report - Report Model and Export
//!
//! The executor produces plain serializable data:
//! - `BenchmarksCollectionReport` for sequence runs
//! - `BenchmarksContainerReport` → `BenchmarkReport` → `IterationReport`
//!
//! Exporters walk the tree as [`ReportNode`]s:
//! - Text (human-readable)
//! - JSON (machine-readable, compact or formatted)

mod json;
mod node;
mod report;
mod text;

pub use json::generate_json_report;
pub use node::{ReportNode, ReportNodes, walk};
pub use report::{
    BenchmarkReport, BenchmarksCollectionReport, BenchmarksContainerReport, Failure, FailureKind,
    IterationReport, NamedValue, Stage,
};
pub use text::{TextExporter, format_duration, format_signed_duration};

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON document
    Json,
    /// Human-readable text
    Text,
}

impl OutputFormat {
    /// File extension for exported files
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" | "human" => Ok(OutputFormat::Text),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
