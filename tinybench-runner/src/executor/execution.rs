//! Plan Execution
//!
//! Runs one plan through its stages, strictly in sequence:
//!
//! ```text
//! CREATE → PARAMETERIZE → CONTAINER_INIT → BENCHMARK_INIT → WARMUP → ITERATE×N → AGGREGATE
//! ```
//!
//! A failure before ITERATE aborts the plan: no iteration runs and the
//! failure is recorded on the report. A failure inside an iteration is
//! recorded on that iteration only; the remaining iterations still run on
//! the same container instance.
//!
//! Panics are caught and reported with their message, the same way returned
//! errors are.

use super::plan::BenchmarkPlan;
use chrono::Utc;
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;
use tinybench_core::{BenchmarkOutput, LeveledSink, OutputLevel, OutputSink, Timer, reclaim_hint};
use tinybench_report::{BenchmarkReport, Failure, FailureKind, IterationReport, NamedValue, Stage};
use tinybench_stats::summarize;

/// Longest failure message echoed to the console
const MAX_ECHOED_MESSAGE: usize = 200;

/// Extract the message of a panic payload
pub(crate) fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Run `f`, turning returned errors and panics into a [`Failure`] of `stage`
fn guarded<T>(stage: Stage, f: impl FnOnce() -> anyhow::Result<T>) -> Result<T, Failure> {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(Failure {
            stage,
            kind: FailureKind::Error,
            message: format!("{:#}", error),
        }),
        Err(panic) => Err(Failure {
            stage,
            kind: FailureKind::Panic,
            message: panic_message(&*panic),
        }),
    }
}

fn truncate(message: &str) -> String {
    if message.chars().count() <= MAX_ECHOED_MESSAGE {
        return message.to_string();
    }
    let head: String = message.chars().take(MAX_ECHOED_MESSAGE).collect();
    format!("{}...", head)
}

/// CREATE through BENCHMARK_INIT
fn prepare<C>(plan: &BenchmarkPlan<C>, sink: &Rc<dyn OutputSink>) -> Result<C, Failure> {
    let container = &plan.container;
    let mut instance = guarded(Stage::Create, || Ok(container.create(sink)))?;

    guarded(Stage::Parameterize, || {
        container.apply(&plan.parameters, &mut instance)
    })?;
    if let Some(init) = &container.init_container {
        guarded(Stage::ContainerInit, || init.invoke(&mut instance))?;
    }
    if let Some(init) = &container.init {
        guarded(Stage::Init, || init.invoke(&mut instance))?;
    }
    if let Some(init) = &plan.benchmark.init_with {
        guarded(Stage::InitWith, || init.invoke(&mut instance))?;
    }
    Ok(instance)
}

fn warm_up<C>(plan: &BenchmarkPlan<C>, instance: &mut C) -> Result<(), Failure> {
    for warmup in &plan.benchmark.warmups {
        guarded(Stage::Warmup, || warmup.invoke(instance))?;
    }
    Ok(())
}

fn named_values<'a>(pairs: impl Iterator<Item = (&'a str, &'a tinybench_core::Value)>) -> Vec<NamedValue> {
    pairs
        .map(|(name, value)| NamedValue {
            name: name.to_string(),
            value: value.clone(),
        })
        .collect()
}

/// Execute one plan and report it
pub fn run_plan<C>(plan: &BenchmarkPlan<C>, output: &Rc<BenchmarkOutput>) -> BenchmarkReport {
    let started_at = Utc::now();
    let total = Timer::start();
    let iterations = plan.iterations();

    output.write_line(
        OutputLevel::Normal,
        &format!("Benchmark: {}, iterations: {}", plan.name(), iterations),
    );
    let _indent = output.indent();

    let sink: Rc<dyn OutputSink> = Rc::new(LeveledSink::new(Rc::clone(output), OutputLevel::Verbose));
    let mut failures = Vec::new();
    let mut iteration_reports = Vec::with_capacity(iterations as usize);

    let init_timer = Timer::start();
    let prepared = prepare(plan, &sink);
    let init_duration_ns = init_timer.stop();

    let warmup_timer = Timer::start();
    let ready = prepared.and_then(|mut instance| warm_up(plan, &mut instance).map(|()| instance));
    let warmup_duration_ns = warmup_timer.stop();

    match ready {
        Err(failure) => {
            tracing::warn!(
                benchmark = plan.name(),
                stage = %failure.stage,
                "Plan aborted: {}",
                failure.message
            );
            output.write_line(
                OutputLevel::ErrorsOnly,
                &format!("[FAILED] {} => {}", failure.stage, truncate(&failure.message)),
            );
            failures.push(failure);
        }
        Ok(mut instance) => {
            output.write_line(
                OutputLevel::Verbose,
                &format!(
                    "init: {}, warmup: {}",
                    tinybench_report::format_duration(init_duration_ns),
                    tinybench_report::format_duration(warmup_duration_ns)
                ),
            );
            for index in 1..=iterations {
                reclaim_hint();
                let started_at = Utc::now();
                let timer = Timer::start();
                let outcome = guarded(Stage::Iteration, || {
                    plan.benchmark.invoke(&mut instance, plan.arguments.as_ref())
                });
                let duration_ns = timer.stop();

                let failure = outcome.err();
                if let Some(failure) = &failure {
                    output.write_line(
                        OutputLevel::ErrorsOnly,
                        &format!("[FAILED] iteration {} => {}", index, truncate(&failure.message)),
                    );
                    failures.push(failure.clone());
                }
                iteration_reports.push(IterationReport {
                    index,
                    started_at,
                    duration_ns,
                    failure,
                    baseline_stats: None,
                });
            }
        }
    }

    let summary = summarize(
        iteration_reports
            .iter()
            .map(|i| (i.duration_ns, i.succeeded())),
    );

    BenchmarkReport {
        name: plan.name().to_string(),
        started_at,
        duration_ns: total.stop(),
        init_duration_ns,
        warmup_duration_ns,
        average_duration_ns: summary.average_ns,
        iterations,
        successful_iterations: summary.successful,
        baseline: plan.is_baseline(),
        parameters: (!plan.parameters.is_empty()).then(|| named_values(plan.parameters.iter())),
        arguments: plan.arguments.as_ref().map(|a| named_values(a.iter())),
        baseline_stats: None,
        failures,
        iteration_reports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tinybench_analysis::{ScanOptions, scan};
    use tinybench_core::{Benchmark, BenchmarksContainer, ContainerDescriptor, Method, Property, values};

    thread_local! {
        static EVENTS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    fn record(event: impl Into<String>) {
        EVENTS.with(|e| e.borrow_mut().push(event.into()));
    }

    fn take_events() -> Vec<String> {
        EVENTS.with(|e| std::mem::take(&mut *e.borrow_mut()))
    }

    #[derive(Default)]
    struct Staged {
        calls: u32,
        fail_init: bool,
    }

    impl BenchmarksContainer for Staged {
        fn describe() -> ContainerDescriptor<Self> {
            ContainerDescriptor::new(|| {
                record("create");
                Staged::default()
            })
            .property(
                Property::new("FailInit", |s: &mut Staged, v: bool| {
                    record(format!("set {}", v));
                    s.fail_init = v;
                })
                .param(values![false, true]),
            )
            .method(Method::new("InitContainer", |_: &mut Staged| record("container init")))
            .method(Method::new("Init", |s: &mut Staged| -> anyhow::Result<()> {
                record("init");
                if s.fail_init {
                    anyhow::bail!("init refused");
                }
                Ok(())
            }))
            .method(Method::new("CountInit", |_: &mut Staged| record("count init")))
            .method(Method::new("CountWarmup", |_: &mut Staged| record("warmup")))
            .method(
                Method::new("Count", |s: &mut Staged| {
                    s.calls += 1;
                    record(format!("iteration {}", s.calls));
                    if s.calls % 2 == 1 {
                        panic!("odd call {}", s.calls);
                    }
                })
                .benchmark(Benchmark::new().iterations(5)),
            )
        }
    }

    fn plans() -> Vec<BenchmarkPlan<Staged>> {
        let container = Rc::new(scan::<Staged>(&ScanOptions::default()).unwrap());
        crate::planner::build_plans(&container, None)
    }

    fn quiet() -> Rc<BenchmarkOutput> {
        Rc::new(BenchmarkOutput::captured(OutputLevel::Verbose))
    }

    #[test]
    fn test_stage_order_and_iteration_isolation() {
        let plans = plans();
        take_events();
        let report = run_plan(&plans[0], &quiet());

        assert_eq!(
            take_events(),
            vec![
                "create",
                "set false",
                "container init",
                "init",
                "count init",
                "warmup",
                "iteration 1",
                "iteration 2",
                "iteration 3",
                "iteration 4",
                "iteration 5",
            ]
        );
        assert_eq!(report.iterations, 5);
        assert_eq!(report.successful_iterations, 2);
        assert_eq!(report.iteration_reports.len(), 5);
        assert!(report.abort().is_none());
        assert_eq!(report.failures.len(), 3);
        assert!(report.failures.iter().all(|f| f.kind == FailureKind::Panic));
        assert_eq!(report.failures[0].message, "odd call 1");

        let successes: Vec<u64> = report
            .iteration_reports
            .iter()
            .filter(|i| i.succeeded())
            .map(|i| i.duration_ns)
            .collect();
        assert_eq!(report.average_duration_ns, (successes[0] + successes[1]) / 2);
        assert_eq!(
            report.parameters,
            Some(vec![NamedValue {
                name: "FailInit".to_string(),
                value: values![false].remove(0),
            }])
        );
    }

    #[test]
    fn test_init_failure_aborts_plan() {
        let plans = plans();
        take_events();
        let output = quiet();
        let report = run_plan(&plans[1], &output);

        assert_eq!(
            take_events(),
            vec!["create", "set true", "container init", "init"]
        );
        assert_eq!(report.successful_iterations, 0);
        assert_eq!(report.average_duration_ns, 0);
        assert!(report.iteration_reports.is_empty());
        let abort = report.abort().unwrap();
        assert_eq!(abort.stage, Stage::Init);
        assert_eq!(abort.kind, FailureKind::Error);
        assert_eq!(abort.message, "init refused");
        assert!(
            output
                .lines()
                .iter()
                .any(|l| l.contains("[FAILED] init => init refused"))
        );
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(&*payload), "static");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(&*payload), "owned");
        let payload: Box<dyn Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(&*payload), "Unknown panic");
    }

    #[test]
    fn test_truncate() {
        let long = "x".repeat(250);
        assert_eq!(truncate(&long).len(), MAX_ECHOED_MESSAGE + 3);
        assert_eq!(truncate("short"), "short");
    }
}
