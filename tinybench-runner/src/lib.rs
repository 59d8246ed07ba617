#![warn(missing_docs)]
//! TinyBench Runner Library
//!
//! Plans, executes and exports benchmark containers. A [`BenchmarkRunner`]
//! holds one session: its configuration, console output, progress display,
//! cancellation token and the cache of resolved container references.
//!
//! # Example
//!
//! ```ignore
//! use tinybench::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut runner = BenchmarkRunner::discover()?;
//!     let report = runner.in_sequence().append::<Sorting>().append::<Hashing>().run();
//!     runner.export_collection(&report)?;
//!     Ok(())
//! }
//! ```

mod cancel;
mod config;
mod executor;
mod export;
mod planner;
mod progress;

pub use cancel::CancelToken;
pub use config::*;
pub use executor::{
    BenchmarkPlan, ContainerExecutionPlan, PlanGroup, evaluate_baseline, run_plan,
};
pub use export::ReportExporter;
pub use planner::build_plans;
pub use progress::{BarProgress, NoProgress, Progress};

use chrono::Utc;
use clap::Parser;
use regex::Regex;
use std::path::PathBuf;
use std::rc::Rc;
use tinybench_analysis::{ConfigurationError, ReferenceRegistry, ScanOptions};
use tinybench_core::{BenchmarkOutput, BenchmarksContainer, OutputLevel, Timer};
use tinybench_report::{BenchmarksCollectionReport, BenchmarksContainerReport};

/// Command-line overrides for a benchmark binary
#[derive(Parser, Debug)]
#[command(name = "tinybench")]
#[command(author, version, about = "TinyBench - micro-benchmark harness")]
pub struct Cli {
    /// Only run benchmarks whose name matches this regex
    pub filter: Option<String>,

    /// Console verbosity (silent, errors-only, minimal, normal, verbose)
    #[arg(long)]
    pub output_level: Option<OutputLevel>,

    /// Export format (text, json)
    #[arg(long)]
    pub format: Option<String>,

    /// Directory for exported reports
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Disable naming-convention resolution of init and warmup methods
    #[arg(long)]
    pub no_conventions: bool,

    /// Show a progress bar
    #[arg(long)]
    pub progress: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Layer the command-line flags over `config`
    pub fn apply(&self, mut config: TinyBenchConfig) -> TinyBenchConfig {
        if let Some(ref filter) = self.filter {
            config.runner.filter = Some(filter.clone());
        }
        if let Some(level) = self.output_level {
            config.runner.output_level = level;
        }
        if let Some(ref format) = self.format {
            config.export.format = format.clone();
        }
        if let Some(ref dir) = self.output {
            config.export.directory = dir.display().to_string();
        }
        if self.no_conventions {
            config.runner.use_conventions = false;
        }
        if self.progress {
            config.runner.progress = true;
        }
        config
    }
}

/// Install the tracing subscriber, once per process
pub fn init_logging(verbose: bool) {
    let filter = if verbose { "tinybench=debug" } else { "tinybench=info" };
    // A second call (tests, embedding binaries) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// One benchmarking session
pub struct BenchmarkRunner {
    config: TinyBenchConfig,
    filter: Option<Regex>,
    output: Rc<BenchmarkOutput>,
    progress: Box<dyn Progress>,
    cancel: CancelToken,
    registry: ReferenceRegistry,
}

impl Default for BenchmarkRunner {
    fn default() -> Self {
        let config = TinyBenchConfig::default();
        Self {
            output: Rc::new(BenchmarkOutput::new(config.runner.output_level)),
            filter: None,
            progress: Box::new(NoProgress),
            cancel: CancelToken::new(),
            registry: ReferenceRegistry::new(ScanOptions {
                use_conventions: config.runner.use_conventions,
            }),
            config,
        }
    }
}

impl BenchmarkRunner {
    /// Session configured by `config`; fails on an invalid filter regex
    pub fn new(config: TinyBenchConfig) -> anyhow::Result<Self> {
        let filter = config
            .runner
            .filter
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|e| anyhow::anyhow!("Invalid filter: {}", e))?;
        let progress: Box<dyn Progress> = if config.runner.progress {
            Box::new(BarProgress::new())
        } else {
            Box::new(NoProgress)
        };
        Ok(Self {
            output: Rc::new(BenchmarkOutput::new(config.runner.output_level)),
            filter,
            progress,
            cancel: CancelToken::new(),
            registry: ReferenceRegistry::new(ScanOptions {
                use_conventions: config.runner.use_conventions,
            }),
            config,
        })
    }

    /// Session configured by the nearest `tinybench.toml`, or defaults
    pub fn discover() -> anyhow::Result<Self> {
        Self::new(TinyBenchConfig::discover().unwrap_or_default())
    }

    /// Write console output through `output`
    pub fn with_output(mut self, output: Rc<BenchmarkOutput>) -> Self {
        self.output = output;
        self
    }

    /// Report plan progress to `progress`
    pub fn with_progress(mut self, progress: impl Progress + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Stop between plans once `token` is cancelled
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Session configuration
    pub fn config(&self) -> &TinyBenchConfig {
        &self.config
    }

    /// Console output
    pub fn output(&self) -> &Rc<BenchmarkOutput> {
        &self.output
    }

    /// The session's cancellation token
    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Resolve, plan and execute container `C`.
    ///
    /// A [`ConfigurationError`] means nothing of `C` ran.
    pub fn run<C: BenchmarksContainer>(&mut self) -> Result<BenchmarksContainerReport, ConfigurationError> {
        let container = match self.registry.get_or_scan::<C>() {
            Ok(container) => container,
            Err(e) => {
                tracing::error!("Configuration error: {}", e);
                self.output.error(&e.to_string());
                return Err(e);
            }
        };

        let plans = build_plans(&container, self.filter.as_ref());
        if plans.is_empty() {
            self.output.write_line(
                OutputLevel::Minimal,
                &format!("No benchmarks found in container {}", container.name),
            );
            return Ok(BenchmarksContainerReport {
                name: container.name.clone(),
                type_name: container.type_name.clone(),
                started_at: Utc::now(),
                duration_ns: 0,
                configuration_error: None,
                cancelled: false,
                benchmarks: Vec::new(),
            });
        }

        let execution = ContainerExecutionPlan::new(container, plans);
        Ok(execution.execute(&self.output, self.progress.as_ref(), &self.cancel))
    }

    /// Run `C`, recording a configuration error in the report instead of
    /// returning it
    pub fn run_or_record<C: BenchmarksContainer>(&mut self) -> BenchmarksContainerReport {
        self.run::<C>().unwrap_or_else(|e| {
            let descriptor = C::describe();
            BenchmarksContainerReport::rejected(descriptor.name(), descriptor.type_name(), e)
        })
    }

    /// Start a sequence of containers sharing this session
    pub fn in_sequence(&mut self) -> BenchmarkSequence<'_> {
        BenchmarkSequence {
            runner: self,
            steps: Vec::new(),
        }
    }

    /// Write a container report per the `[export]` configuration
    pub fn export_container(&self, report: &BenchmarksContainerReport) -> anyhow::Result<PathBuf> {
        ReportExporter::from_config(&self.config.export)?.write_container(report)
    }

    /// Write a sequence report per the `[export]` configuration
    pub fn export_collection(&self, report: &BenchmarksCollectionReport) -> anyhow::Result<PathBuf> {
        ReportExporter::from_config(&self.config.export)?.write_collection(report)
    }
}

impl std::fmt::Debug for BenchmarkRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkRunner")
            .field("config", &self.config)
            .field("filter", &self.filter)
            .field("cancel", &self.cancel)
            .field("cached_containers", &self.registry.len())
            .finish_non_exhaustive()
    }
}

type SequenceStep = fn(&mut BenchmarkRunner) -> BenchmarksContainerReport;

/// Containers queued for one sequence run
pub struct BenchmarkSequence<'r> {
    runner: &'r mut BenchmarkRunner,
    steps: Vec<SequenceStep>,
}

impl BenchmarkSequence<'_> {
    /// Queue container `C`
    pub fn append<C: BenchmarksContainer>(mut self) -> Self {
        self.steps.push(BenchmarkRunner::run_or_record::<C>);
        self
    }

    /// Number of queued containers
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every queued container in order.
    ///
    /// A misconfigured container is recorded and the sequence continues;
    /// cancellation stops it after the container in flight.
    pub fn run(self) -> BenchmarksCollectionReport {
        let started_at = Utc::now();
        let timer = Timer::start();
        let mut containers = Vec::with_capacity(self.steps.len());

        for step in self.steps {
            if self.runner.cancel.is_cancelled() {
                break;
            }
            containers.push(step(self.runner));
        }

        BenchmarksCollectionReport {
            started_at,
            duration_ns: timer.stop(),
            containers,
        }
    }
}

impl std::fmt::Debug for BenchmarkSequence<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkSequence")
            .field("steps", &self.steps.len())
            .finish_non_exhaustive()
    }
}
