//! Container Execution
//!
//! Groups a container's plans by parameter set, runs the groups in first-seen
//! order and evaluates each group's baseline once its last plan finished.

use super::baseline::evaluate_baseline;
use super::execution::run_plan;
use super::plan::BenchmarkPlan;
use crate::cancel::CancelToken;
use crate::progress::Progress;
use chrono::Utc;
use fxhash::FxHashMap;
use std::rc::Rc;
use tinybench_analysis::{ContainerReference, ParametersSet};
use tinybench_core::{BenchmarkOutput, OutputLevel, Timer};
use tinybench_report::{BenchmarkReport, BenchmarksContainerReport};

/// Plans of one parameter set, in planned order
#[derive(Debug)]
pub struct PlanGroup<C> {
    /// Shared parameter set
    pub parameters: ParametersSet,
    /// Plans of the group
    pub plans: Vec<BenchmarkPlan<C>>,
}

/// Every plan of a container, grouped for execution
#[derive(Debug)]
pub struct ContainerExecutionPlan<C> {
    container: Rc<ContainerReference<C>>,
    groups: Vec<PlanGroup<C>>,
}

impl<C> ContainerExecutionPlan<C> {
    /// Group `plans` by value-equality of their parameter set
    pub fn new(container: Rc<ContainerReference<C>>, plans: Vec<BenchmarkPlan<C>>) -> Self {
        let mut index: FxHashMap<ParametersSet, usize> = FxHashMap::default();
        let mut groups: Vec<PlanGroup<C>> = Vec::new();

        for plan in plans {
            let slot = *index.entry(plan.parameters.clone()).or_insert_with(|| {
                groups.push(PlanGroup {
                    parameters: plan.parameters.clone(),
                    plans: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].plans.push(plan);
        }

        Self { container, groups }
    }

    /// Groups in first-seen order
    pub fn groups(&self) -> &[PlanGroup<C>] {
        &self.groups
    }

    /// Total planned benchmarks
    pub fn plan_count(&self) -> usize {
        self.groups.iter().map(|g| g.plans.len()).sum()
    }

    /// Run every group, stopping between plans once `cancel` is set
    pub fn execute(
        &self,
        output: &Rc<BenchmarkOutput>,
        progress: &dyn Progress,
        cancel: &CancelToken,
    ) -> BenchmarksContainerReport {
        let started_at = Utc::now();
        let timer = Timer::start();
        let total = self.plan_count();

        output.write_line(
            OutputLevel::Minimal,
            &format!(
                "Running container \"{}\", total planned benchmarks: {}",
                self.container.name, total
            ),
        );
        progress.start(&self.container.name, total);

        let mut benchmarks = Vec::with_capacity(total);
        let mut cancelled = false;

        'groups: for group in &self.groups {
            if group.parameters.is_empty() {
                output.write_line(OutputLevel::Verbose, "Without parameters");
            } else {
                output.write_line(
                    OutputLevel::Verbose,
                    &format!("With parameters {}", group.parameters),
                );
            }
            let _indent = output.indent();

            let mut reports: Vec<BenchmarkReport> = Vec::with_capacity(group.plans.len());
            for plan in &group.plans {
                if cancel.is_cancelled() {
                    cancelled = true;
                    // Baselines still apply to the part of the group that ran
                    evaluate_baseline(&mut reports);
                    benchmarks.extend(reports);
                    break 'groups;
                }
                reports.push(run_plan(plan, output));
                progress.plan_finished(plan.name());
            }
            evaluate_baseline(&mut reports);
            benchmarks.extend(reports);
        }

        if cancelled {
            tracing::warn!(
                container = %self.container.name,
                completed = benchmarks.len(),
                planned = total,
                "Run cancelled"
            );
            output.write_line(OutputLevel::Minimal, "Run cancelled");
        }
        progress.finish(!cancelled);

        BenchmarksContainerReport {
            name: self.container.name.clone(),
            type_name: self.container.type_name.clone(),
            started_at,
            duration_ns: timer.stop(),
            configuration_error: None,
            cancelled,
            benchmarks,
        }
    }
}
