//! Configuration loading from tinybench.toml
//!
//! TinyBench configuration can be specified in a `tinybench.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tinybench_core::OutputLevel;

/// TinyBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TinyBenchConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,
}

/// Runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Console verbosity: "silent", "errors-only", "minimal", "normal" or "verbose"
    #[serde(default)]
    pub output_level: OutputLevel,
    /// Resolve init and warmup methods by naming convention
    #[serde(default = "default_use_conventions")]
    pub use_conventions: bool,
    /// Show a progress bar
    #[serde(default)]
    pub progress: bool,
    /// Only run benchmarks whose name matches this regex
    #[serde(default)]
    pub filter: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            output_level: OutputLevel::default(),
            use_conventions: default_use_conventions(),
            progress: false,
            filter: None,
        }
    }
}

fn default_use_conventions() -> bool {
    true
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Export format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
    /// Include one block per iteration in text exports
    #[serde(default = "default_include_iterations")]
    pub include_iterations: bool,
    /// Indent JSON exports
    #[serde(default = "default_formatted")]
    pub formatted: bool,
    /// Output directory for exported reports
    #[serde(default = "default_directory")]
    pub directory: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            include_iterations: default_include_iterations(),
            formatted: default_formatted(),
            directory: default_directory(),
        }
    }
}

fn default_format() -> String {
    "text".to_string()
}
fn default_include_iterations() -> bool {
    true
}
fn default_formatted() -> bool {
    true
}
fn default_directory() -> String {
    "target/tinybench".to_string()
}

impl TinyBenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("tinybench.toml");
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# TinyBench Configuration

[runner]
# Console verbosity: silent, errors-only, minimal, normal, verbose
output_level = "normal"
# Resolve init/warmup methods by naming convention when no marker is present
use_conventions = true
# Show a progress bar while plans run
progress = false
# Only run benchmarks whose name matches (uncomment to enable)
# filter = "^Sort"

[export]
# Export format: text or json
format = "text"
# Include per-iteration blocks in text exports
include_iterations = true
# Indent JSON exports
formatted = true
# Output directory for exported reports
directory = "target/tinybench"
"#
        .to_string()
    }
}
