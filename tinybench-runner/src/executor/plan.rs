//! Benchmark Plans

use std::fmt;
use std::rc::Rc;
use tinybench_analysis::{ArgumentsReference, BenchmarkReference, ContainerReference, ParametersSet};

/// One runnable unit: a benchmark under one parameter set and argument tuple
pub struct BenchmarkPlan<C> {
    /// Container the benchmark belongs to (factory, setters, inits)
    pub container: Rc<ContainerReference<C>>,
    /// The benchmark (init-with, warmups, body)
    pub benchmark: Rc<BenchmarkReference<C>>,
    /// Parameter set to apply, empty when the container has no parameters
    pub parameters: ParametersSet,
    /// Argument tuple, `None` for parameterless benchmarks
    pub arguments: Option<ArgumentsReference>,
}

impl<C> BenchmarkPlan<C> {
    /// Benchmark display name
    pub fn name(&self) -> &str {
        &self.benchmark.name
    }

    /// Measured iterations
    pub fn iterations(&self) -> u32 {
        self.benchmark.iterations
    }

    /// Whether this plan is its group's baseline
    pub fn is_baseline(&self) -> bool {
        self.benchmark.baseline
    }
}

impl<C> fmt::Debug for BenchmarkPlan<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkPlan")
            .field("container", &self.container.name)
            .field("benchmark", &self.benchmark.name)
            .field("parameters", &self.parameters)
            .field("arguments", &self.arguments)
            .finish()
    }
}
