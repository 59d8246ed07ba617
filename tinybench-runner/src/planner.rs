//! Benchmark Planner
//!
//! Expands every benchmark of a container into one plan per
//! (parameter set × argument tuple).
//!
//! Ordering: benchmarks keep their resolved order; within a benchmark the
//! parameter set varies slowest and the argument tuple fastest.

use crate::executor::BenchmarkPlan;
use std::rc::Rc;
use tinybench_analysis::ContainerReference;

/// Build the plans of `container`, optionally keeping only benchmarks whose
/// display name matches `filter`.
pub fn build_plans<C>(
    container: &Rc<ContainerReference<C>>,
    filter: Option<&regex::Regex>,
) -> Vec<BenchmarkPlan<C>> {
    let mut plans = Vec::new();

    for benchmark in &container.benchmarks {
        // Apply regex filter on benchmark name
        if let Some(re) = filter {
            if !re.is_match(&benchmark.name) {
                continue;
            }
        }

        for parameters in &container.parameters {
            if benchmark.arguments.is_empty() {
                plans.push(BenchmarkPlan {
                    container: Rc::clone(container),
                    benchmark: Rc::clone(benchmark),
                    parameters,
                    arguments: None,
                });
                continue;
            }
            for arguments in &benchmark.arguments {
                plans.push(BenchmarkPlan {
                    container: Rc::clone(container),
                    benchmark: Rc::clone(benchmark),
                    parameters: parameters.clone(),
                    arguments: Some(arguments.clone()),
                });
            }
        }
    }

    tracing::debug!(
        container = %container.name,
        plans = plans.len(),
        "Planned container"
    );
    plans
}
