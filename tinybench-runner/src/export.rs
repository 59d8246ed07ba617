//! Report Export
//!
//! Renders reports in the configured format and writes them under the
//! export directory.

use crate::config::ExportConfig;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tinybench_report::{
    BenchmarksCollectionReport, BenchmarksContainerReport, OutputFormat, TextExporter,
    generate_json_report,
};

/// Renders and writes reports
#[derive(Debug, Clone)]
pub struct ReportExporter {
    format: OutputFormat,
    text: TextExporter,
    formatted: bool,
    directory: PathBuf,
}

impl ReportExporter {
    /// Exporter for `format` writing into `directory`
    pub fn new(format: OutputFormat, directory: impl Into<PathBuf>) -> Self {
        Self {
            format,
            text: TextExporter::default(),
            formatted: true,
            directory: directory.into(),
        }
    }

    /// Exporter described by the `[export]` table
    pub fn from_config(config: &ExportConfig) -> anyhow::Result<Self> {
        let format: OutputFormat = config
            .format
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
        Ok(Self {
            format,
            text: TextExporter::new(config.include_iterations),
            formatted: config.formatted,
            directory: PathBuf::from(&config.directory),
        })
    }

    /// Selected format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Target directory
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Render a single container report
    pub fn render_container(&self, report: &BenchmarksContainerReport) -> anyhow::Result<String> {
        match self.format {
            OutputFormat::Text => Ok(self.text.export_container(report)),
            OutputFormat::Json => self.json(report),
        }
    }

    /// Render a sequence report
    pub fn render_collection(&self, report: &BenchmarksCollectionReport) -> anyhow::Result<String> {
        match self.format {
            OutputFormat::Text => Ok(self.text.export(report)),
            OutputFormat::Json => self.json(report),
        }
    }

    /// Write a container report to `<directory>/<container>.<ext>`
    pub fn write_container(&self, report: &BenchmarksContainerReport) -> anyhow::Result<PathBuf> {
        let content = self.render_container(report)?;
        self.write(&file_stem(&report.name), &content)
    }

    /// Write a sequence report to `<directory>/tinybench-<timestamp>.<ext>`
    pub fn write_collection(&self, report: &BenchmarksCollectionReport) -> anyhow::Result<PathBuf> {
        let content = self.render_collection(report)?;
        let stem = format!("tinybench-{}", report.started_at.format("%Y%m%d-%H%M%S"));
        self.write(&stem, &content)
    }

    fn json<T: Serialize + ?Sized>(&self, report: &T) -> anyhow::Result<String> {
        Ok(generate_json_report(report, self.formatted)?)
    }

    fn write(&self, stem: &str, content: &str) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(&self.directory)?;
        let path = self
            .directory
            .join(format!("{}.{}", stem, self.format.extension()));
        std::fs::write(&path, content)?;
        tracing::info!(path = %path.display(), "Report written");
        Ok(path)
    }
}

/// Container name made safe for a file name
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
