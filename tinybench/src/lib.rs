#![warn(missing_docs)]
//! # TinyBench
//!
//! Micro-benchmark harness for Rust. Benchmarks live as methods of a
//! *container* type that describes itself once; the harness resolves the
//! description, expands parameter and argument grids, times every iteration
//! and reports each run relative to a baseline.
//!
//! - **Containers**: `describe()` registers methods, properties and markers
//! - **Conventions**: `Init`, `<Bench>Init`, `<Bench>Warmup` are found by name when no marker says otherwise
//! - **Grids**: property value lists multiply, argument tuples fan out per benchmark
//! - **Coercion**: declared values widen to the slot type (`i32 → i64`, text → `Decimal`, ...)
//! - **Baselines**: ratio, efficiency and time difference per parameter group
//! - **Isolation**: a failing iteration never stops the rest of the plan
//! - **Reports**: a serializable tree, exported as text or JSON
//!
//! ## Quick Start
//!
//! ```ignore
//! use tinybench::prelude::*;
//!
//! #[derive(Default)]
//! struct Sorting {
//!     data: Vec<u64>,
//!     size: i32,
//! }
//!
//! impl BenchmarksContainer for Sorting {
//!     fn describe() -> ContainerDescriptor<Self> {
//!         ContainerDescriptor::new(Sorting::default)
//!             .property(Property::new("Size", |s: &mut Sorting, v: i32| s.size = v).param(values![100, 10_000]))
//!             .method(Method::new("Init", |s: &mut Sorting| s.data = (0..s.size as u64).rev().collect()))
//!             .method(Method::new("Std", |s: &mut Sorting| s.data.clone().sort()).benchmark(Benchmark::new().iterations(10).baseline()))
//!             .method(Method::new("Unstable", |s: &mut Sorting| s.data.clone().sort_unstable()).benchmark(Benchmark::new().iterations(10)))
//!     }
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     tinybench::init_logging(false);
//!     let mut runner = BenchmarkRunner::discover()?;
//!     let report = runner.run::<Sorting>()?;
//!     runner.export_container(&report)?;
//!     Ok(())
//! }
//! ```

// Re-export the description API
pub use tinybench_core::{
    Benchmark, BenchmarkOutput, BenchmarksContainer, ContainerDescriptor, Marker, Method,
    MethodDef, OutputLevel, OutputSink, ParamDecl, Property, PropertyDef, SlotValue, TypeSpec,
    Value, ValueKind, values,
};

// Re-export resolution
pub use tinybench_analysis::{
    ArgumentsReference, BenchmarkReference, ConfigurationError, ContainerReference,
    ParametersSet, ParametersSetCollection, ReferenceRegistry, ScanOptions, scan,
};

// Re-export the runner
pub use tinybench_runner::{
    BarProgress, BenchmarkPlan, BenchmarkRunner, BenchmarkSequence, CancelToken, Cli, NoProgress,
    Progress, ReportExporter, TinyBenchConfig, build_plans, init_logging,
};

// Re-export reports and stats
pub use tinybench_report::{
    BenchmarkReport, BenchmarksCollectionReport, BenchmarksContainerReport, Failure, FailureKind,
    IterationReport, NamedValue, OutputFormat, ReportNode, Stage, TextExporter,
    generate_json_report,
};
pub use tinybench_stats::BaselineStats;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Benchmark, BenchmarkRunner, BenchmarksContainer, ContainerDescriptor, Method, OutputSink,
        ParamDecl, Property, Value, values,
    };
}
