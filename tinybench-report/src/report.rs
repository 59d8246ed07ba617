//! Report Data Structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tinybench_core::Value;
use tinybench_stats::BaselineStats;

/// Reports of containers run in sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarksCollectionReport {
    /// Wall-clock start
    pub started_at: DateTime<Utc>,
    /// Elapsed time
    pub duration_ns: u64,
    /// Container reports in run order
    pub containers: Vec<BenchmarksContainerReport>,
}

/// Report of one container run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarksContainerReport {
    /// Display name
    pub name: String,
    /// Container type name
    pub type_name: String,
    /// Wall-clock start
    pub started_at: DateTime<Utc>,
    /// Elapsed time
    pub duration_ns: u64,
    /// Set when the container was rejected before running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_error: Option<String>,
    /// Set when the run stopped at a cancellation checkpoint
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cancelled: bool,
    /// Benchmark reports grouped by parameter set, in execution order
    pub benchmarks: Vec<BenchmarkReport>,
}

impl BenchmarksContainerReport {
    /// Report of a container that never ran
    pub fn rejected(name: impl Into<String>, type_name: impl Into<String>, error: impl ToString) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            started_at: Utc::now(),
            duration_ns: 0,
            configuration_error: Some(error.to_string()),
            cancelled: false,
            benchmarks: Vec::new(),
        }
    }

    /// Whether any benchmark reported a failure or the container was rejected
    pub fn has_failures(&self) -> bool {
        self.configuration_error.is_some() || self.benchmarks.iter().any(BenchmarkReport::failed)
    }
}

/// A named parameter or argument value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValue {
    /// Parameter or argument name
    pub name: String,
    /// Assigned value
    pub value: Value,
}

/// Stage of a plan in which a failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Creating the container instance
    Create,
    /// Applying the parameter set
    Parameterize,
    /// Container-level init
    ContainerInit,
    /// Per-container init
    Init,
    /// Benchmark init
    InitWith,
    /// Warmup
    Warmup,
    /// Measured iteration
    Iteration,
}

impl Stage {
    /// Whether a failure in this stage aborts the whole plan
    pub fn aborts_plan(self) -> bool {
        self != Stage::Iteration
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Create => "create",
            Stage::Parameterize => "parameterize",
            Stage::ContainerInit => "container init",
            Stage::Init => "init",
            Stage::InitWith => "benchmark init",
            Stage::Warmup => "warmup",
            Stage::Iteration => "iteration",
        };
        f.write_str(name)
    }
}

/// How user code failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    /// Returned an error
    Error,
    /// Panicked
    Panic,
}

/// A failure raised by container code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Where it failed
    pub stage: Stage,
    /// Returned error or panic
    pub kind: FailureKind,
    /// Error chain or panic message
    pub message: String,
}

/// Report of one plan: a benchmark under one parameter set and argument tuple
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkReport {
    /// Benchmark display name
    pub name: String,
    /// Wall-clock start
    pub started_at: DateTime<Utc>,
    /// Whole plan, from creation to the last iteration
    pub duration_ns: u64,
    /// Creation, parameters and init methods
    pub init_duration_ns: u64,
    /// All warmups together
    pub warmup_duration_ns: u64,
    /// Integer average over successful iterations
    pub average_duration_ns: u64,
    /// Planned iterations
    pub iterations: u32,
    /// Iterations that completed
    pub successful_iterations: u32,
    /// Whether this plan is its group's baseline
    pub baseline: bool,
    /// Property values of the plan's parameter set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<NamedValue>>,
    /// Argument tuple passed to the benchmark method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<NamedValue>>,
    /// Average compared with the group's baseline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_stats: Option<BaselineStats>,
    /// Plan-level failure first, then iteration failures
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<Failure>,
    /// One report per executed iteration
    pub iteration_reports: Vec<IterationReport>,
}

impl BenchmarkReport {
    /// Whether anything failed
    pub fn failed(&self) -> bool {
        !self.failures.is_empty()
    }

    /// The failure that prevented iterations from running, if any
    pub fn abort(&self) -> Option<&Failure> {
        self.failures.iter().find(|f| f.stage.aborts_plan())
    }
}

/// Report of one measured iteration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationReport {
    /// 1-based iteration number
    pub index: u32,
    /// Wall-clock start
    pub started_at: DateTime<Utc>,
    /// Elapsed time, up to the failure if the iteration failed
    pub duration_ns: u64,
    /// Why the iteration failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
    /// Duration compared with the group's baseline average
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_stats: Option<BaselineStats>,
}

impl IterationReport {
    /// Whether the iteration completed
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }
}
