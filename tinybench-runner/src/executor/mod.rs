//! Benchmark Executor
//!
//! Runs planned benchmarks and builds their reports.
//!
//! ## Pipeline Overview
//!
//! ```text
//! BenchmarkPlan (from the planner)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  container  │  Group plans by parameter set
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  execution  │  Create, init, warm up, iterate
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │  baseline   │  Ratio, efficiency, difference per group
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`plan`] - The runnable unit
//! - [`execution`] - Per-plan stage machine
//! - [`container`] - Grouping, cancellation checkpoints
//! - [`baseline`] - Baseline statistics

mod baseline;
mod container;
mod execution;
mod plan;

// Re-export public API
pub use baseline::evaluate_baseline;
pub use container::{ContainerExecutionPlan, PlanGroup};
pub use execution::run_plan;
pub use plan::BenchmarkPlan;
