//! Integration tests for TinyBench
//!
//! These tests drive containers through the public runner and check the
//! resulting report trees.

use rust_decimal::Decimal;
use std::cell::RefCell;
use std::rc::Rc;
use tinybench::prelude::*;
use tinybench::{
    BenchmarkOutput, BenchmarksContainerReport, CancelToken, ConfigurationError, FailureKind,
    OutputFormat, OutputLevel, ReportExporter, ReportNode, Stage, TinyBenchConfig,
};

thread_local! {
    static EVENTS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    static TOKEN: RefCell<Option<CancelToken>> = const { RefCell::new(None) };
}

fn record(event: impl Into<String>) {
    EVENTS.with(|e| e.borrow_mut().push(event.into()));
}

fn take_events() -> Vec<String> {
    EVENTS.with(|e| std::mem::take(&mut *e.borrow_mut()))
}

fn runner() -> BenchmarkRunner {
    BenchmarkRunner::default().with_output(Rc::new(BenchmarkOutput::captured(OutputLevel::Verbose)))
}

fn run<C: BenchmarksContainer>() -> BenchmarksContainerReport {
    runner().run::<C>().unwrap()
}

// ─── Parameter grid ──────────────────────────────────────────────────────────

#[derive(Default)]
struct Grid {
    a: i32,
    b: String,
}

impl BenchmarksContainer for Grid {
    fn describe() -> ContainerDescriptor<Self> {
        ContainerDescriptor::new(Grid::default)
            .property(Property::new("A", |g: &mut Grid, v: i32| g.a = v).param(values![1, 2]))
            .property(Property::new("B", |g: &mut Grid, v: String| g.b = v).param(values!["x", "y"]))
            .method(
                Method::unary("Repeat", "times", |g: &mut Grid, times: i64| {
                    std::hint::black_box(g.b.repeat((g.a as i64 * times) as usize));
                })
                .benchmark(Benchmark::new().iterations(3))
                .arguments(values![1])
                .arguments(values![4]),
            )
            .method(
                Method::new("Empty", |g: &mut Grid| {
                    std::hint::black_box(&g.b);
                })
                .benchmark(Benchmark::new().baseline()),
            )
    }
}

/// 2×2 parameter sets, a benchmark with 2 tuples and a baseline ⇒ 12 plans in 4 groups
#[test]
fn test_grid_end_to_end() {
    let report = run::<Grid>();
    assert_eq!(report.benchmarks.len(), 12);
    assert!(!report.cancelled);

    for (group, chunk) in report.benchmarks.chunks(3).enumerate() {
        let names: Vec<&str> = chunk.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Repeat", "Repeat", "Empty"], "group {}", group);

        // Every plan of a group shares its parameter set
        let params = chunk[0].parameters.clone().unwrap();
        assert!(chunk.iter().all(|b| b.parameters.as_ref() == Some(&params)));

        let baseline = &chunk[2];
        assert!(baseline.baseline);
        assert_eq!(baseline.iterations, 1);
        assert_eq!(baseline.baseline_stats, Some(tinybench::BaselineStats::IDENTITY));
        for plan in &chunk[..2] {
            assert_eq!(plan.iterations, 3);
            assert_eq!(plan.successful_iterations, 3);
            let stats = plan.baseline_stats.unwrap();
            let expected = tinybench::BaselineStats::compare(
                baseline.average_duration_ns,
                plan.average_duration_ns,
            );
            assert_eq!(stats, expected);
            assert!(plan.iteration_reports.iter().all(|i| i.baseline_stats.is_some()));
        }
    }

    let groups: Vec<String> = report
        .benchmarks
        .iter()
        .step_by(3)
        .map(|b| {
            b.parameters
                .as_ref()
                .unwrap()
                .iter()
                .map(|p| format!("{}={}", p.name, p.value))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    assert_eq!(groups, vec!["A=1,B=x", "A=1,B=y", "A=2,B=x", "A=2,B=y"]);

    let arguments: Vec<Value> = report.benchmarks[..2]
        .iter()
        .map(|b| b.arguments.as_ref().unwrap()[0].value.clone())
        .collect();
    assert_eq!(arguments, vec![Value::I64(1), Value::I64(4)]);
    assert!(report.benchmarks[2].arguments.is_none());
}

// ─── Iteration isolation ─────────────────────────────────────────────────────

#[derive(Default)]
struct Flaky {
    calls: u32,
}

impl BenchmarksContainer for Flaky {
    fn describe() -> ContainerDescriptor<Self> {
        ContainerDescriptor::new(Flaky::default).method(
            Method::new("Odd", |f: &mut Flaky| -> anyhow::Result<()> {
                f.calls += 1;
                if f.calls % 2 == 1 {
                    anyhow::bail!("call {} failed", f.calls);
                }
                Ok(())
            })
            .benchmark(Benchmark::new().iterations(5)),
        )
    }
}

/// Odd invocations fail: 2 of 5 succeed and the plan is not aborted
#[test]
fn test_failing_iterations_are_isolated() {
    let report = run::<Flaky>();
    let bench = &report.benchmarks[0];

    assert_eq!(bench.iterations, 5);
    assert_eq!(bench.successful_iterations, 2);
    assert!(bench.abort().is_none());
    assert_eq!(bench.iteration_reports.len(), 5);

    let failed: Vec<u32> = bench
        .iteration_reports
        .iter()
        .filter(|i| !i.succeeded())
        .map(|i| i.index)
        .collect();
    assert_eq!(failed, vec![1, 3, 5]);
    assert_eq!(bench.failures[1].message, "call 3 failed");
    assert!(bench.failures.iter().all(|f| f.stage == Stage::Iteration && f.kind == FailureKind::Error));

    let successful: u64 = bench
        .iteration_reports
        .iter()
        .filter(|i| i.succeeded())
        .map(|i| i.duration_ns)
        .sum();
    assert_eq!(bench.average_duration_ns, successful / 2);
}

// ─── Resolution precedence ───────────────────────────────────────────────────

#[derive(Default)]
struct Precedence;

impl BenchmarksContainer for Precedence {
    fn describe() -> ContainerDescriptor<Self> {
        ContainerDescriptor::new(Precedence::default)
            .method(Method::new("InitContainer", |_: &mut Precedence| record("convention container init")))
            .method(Method::new("Prepare", |_: &mut Precedence| record("explicit container init")).init_container())
            .method(Method::new("WorkInit", |_: &mut Precedence| record("convention init-with")))
            .method(Method::new("SetUpWork", |_: &mut Precedence| record("explicit init-with")))
            .method(Method::new("WorkWarmup", |_: &mut Precedence| record("convention warmup")))
            .method(Method::new("Late", |_: &mut Precedence| record("warmup order 5")))
            .method(Method::new("Early", |_: &mut Precedence| record("warmup order -1")))
            .method(Method::new("Tied", |_: &mut Precedence| record("warmup order 0")))
            .method(
                Method::new("Work", |_: &mut Precedence| record("work"))
                    .benchmark(Benchmark::new())
                    .init_with("SetUpWork")
                    .warmup_with("Late", 5)
                    .warmup_with("Early", -1)
                    .warmup_with("Tied", 0),
            )
    }
}

/// Markers win over naming conventions; warmups run by order, ties in discovery order
#[test]
fn test_explicit_beats_convention() {
    take_events();
    let report = run::<Precedence>();
    assert_eq!(report.benchmarks[0].successful_iterations, 1);
    assert_eq!(
        take_events(),
        vec![
            "explicit container init",
            "explicit init-with",
            "warmup order -1",
            "warmup order 0",
            "convention warmup",
            "warmup order 5",
            "work",
        ]
    );
}

/// Conventions are ignored when switched off
#[test]
fn test_conventions_disabled() {
    let mut config = TinyBenchConfig::default();
    config.runner.use_conventions = false;
    let mut runner = BenchmarkRunner::new(config)
        .unwrap()
        .with_output(Rc::new(BenchmarkOutput::captured(OutputLevel::Silent)));

    take_events();
    runner.run::<Precedence>().unwrap();
    let events = take_events();
    assert!(!events.iter().any(|e| e.starts_with("convention")));
    assert!(events.contains(&"explicit container init".to_string()));
}

// ─── Coercion ────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Widening;

impl BenchmarksContainer for Widening {
    fn describe() -> ContainerDescriptor<Self> {
        ContainerDescriptor::new(Widening::default)
            .method(
                Method::binary("Scale", ["count", "factor"], |_: &mut Widening, count: i64, factor: Decimal| {
                    record(format!("{} x {}", count, factor));
                })
                .benchmark(Benchmark::new())
                .arguments(values![3, 2])
                .arguments(values![7, "0.25"]),
            )
            .method(
                Method::unary("Maybe", "limit", |_: &mut Widening, limit: Option<i64>| {
                    record(format!("limit {:?}", limit));
                })
                .benchmark(Benchmark::new())
                .arguments(values![None::<i32>])
                .arguments(values![5]),
            )
    }
}

/// i32 values widen into i64 and Decimal slots; null binds to an `Option` slot
#[test]
fn test_values_are_widened() {
    take_events();
    let report = run::<Widening>();
    assert!(report.benchmarks.iter().all(|b| b.successful_iterations == 1));
    assert_eq!(
        take_events(),
        vec!["3 x 2", "7 x 0.25", "limit None", "limit Some(5)"]
    );
    let args = report.benchmarks[1].arguments.as_ref().unwrap();
    assert_eq!(args[1].value, Value::Decimal(Decimal::new(25, 2)));
}

#[derive(Default)]
struct BadDecimal;

impl BenchmarksContainer for BadDecimal {
    fn describe() -> ContainerDescriptor<Self> {
        ContainerDescriptor::new(BadDecimal::default).method(
            Method::unary("Price", "amount", |_: &mut BadDecimal, _: Decimal| {})
                .benchmark(Benchmark::new())
                .arguments(values!["twelve"]),
        )
    }
}

/// Non-numeric text into a Decimal slot fails before anything runs
#[test]
fn test_incompatible_value_is_rejected() {
    let err = runner().run::<BadDecimal>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Price: value \"twelve\" in (\"twelve\") is not compatible with Decimal"
    );
}

#[derive(Default)]
struct NullCount;

impl BenchmarksContainer for NullCount {
    fn describe() -> ContainerDescriptor<Self> {
        ContainerDescriptor::new(NullCount::default).property(
            Property::new("Count", |_: &mut NullCount, _: i32| {}).param(values![1, None::<i32>]),
        )
    }
}

#[test]
fn test_null_requires_option_slot() {
    let err = runner().run::<NullCount>().unwrap_err();
    assert!(matches!(err, ConfigurationError::NullNotAllowed { .. }));
}

#[derive(Default)]
struct WrongArity;

impl BenchmarksContainer for WrongArity {
    fn describe() -> ContainerDescriptor<Self> {
        ContainerDescriptor::new(WrongArity::default).method(
            Method::binary("Pair", ["a", "b"], |_: &mut WrongArity, _: i32, _: i32| {})
                .benchmark(Benchmark::new())
                .arguments(values![1, 2, 3]),
        )
    }
}

/// A 2-parameter method with a 3-value tuple fails at construction
#[test]
fn test_arity_mismatch() {
    let err = runner().run::<WrongArity>().unwrap_err();
    assert!(matches!(
        err,
        ConfigurationError::ArityMismatch { expected: 2, got: 3, .. }
    ));
}

#[derive(Default)]
struct TwoBaselines;

impl BenchmarksContainer for TwoBaselines {
    fn describe() -> ContainerDescriptor<Self> {
        ContainerDescriptor::new(TwoBaselines::default)
            .method(Method::new("A", |_: &mut TwoBaselines| {}).benchmark(Benchmark::new().baseline()))
            .method(Method::new("B", |_: &mut TwoBaselines| {}).benchmark(Benchmark::new().baseline()))
    }
}

#[test]
fn test_multiple_baselines_rejected() {
    let err = runner().run::<TwoBaselines>().unwrap_err();
    assert!(matches!(err, ConfigurationError::MultipleBaselines { .. }));
}

// ─── Plan aborts and output ──────────────────────────────────────────────────

struct Chatty {
    out: Rc<dyn OutputSink>,
}

impl BenchmarksContainer for Chatty {
    fn describe() -> ContainerDescriptor<Self> {
        ContainerDescriptor::with_output(|out| Chatty { out })
            .named("Chatty container")
            .method(Method::new("Init", |c: &mut Chatty| c.out.write_line("hello from init")))
            .method(
                Method::new("Speak", |c: &mut Chatty| c.out.write_line("speaking"))
                    .benchmark(Benchmark::new().iterations(2)),
            )
            .method(
                Method::new("BrokenWarmup", |_: &mut Chatty| -> anyhow::Result<()> {
                    panic!("warmup exploded")
                }),
            )
            .method(Method::new("Broken", |_: &mut Chatty| {}).benchmark(Benchmark::new().iterations(3)))
    }
}

/// The output sink writes at Verbose; a warmup panic aborts only its own plan
#[test]
fn test_output_sink_and_warmup_abort() {
    let output = Rc::new(BenchmarkOutput::captured(OutputLevel::Verbose));
    let mut runner = BenchmarkRunner::default().with_output(Rc::clone(&output));
    let report = runner.run::<Chatty>().unwrap();

    assert_eq!(report.name, "Chatty container");
    let speak = &report.benchmarks[0];
    assert_eq!(speak.successful_iterations, 2);

    let broken = &report.benchmarks[1];
    let abort = broken.abort().unwrap();
    assert_eq!(abort.stage, Stage::Warmup);
    assert_eq!(abort.kind, FailureKind::Panic);
    assert_eq!(abort.message, "warmup exploded");
    assert!(broken.iteration_reports.is_empty());
    assert_eq!(broken.average_duration_ns, 0);

    let lines = output.lines();
    assert!(lines.iter().any(|l| l.trim() == "hello from init"));
    assert_eq!(lines.iter().filter(|l| l.trim() == "speaking").count(), 2);

    let quiet = Rc::new(BenchmarkOutput::captured(OutputLevel::Normal));
    BenchmarkRunner::default()
        .with_output(Rc::clone(&quiet))
        .run::<Chatty>()
        .unwrap();
    assert!(!quiet.lines().iter().any(|l| l.contains("speaking")));
}

// ─── Sequences and cancellation ──────────────────────────────────────────────

#[derive(Default)]
struct Stopper;

impl BenchmarksContainer for Stopper {
    fn describe() -> ContainerDescriptor<Self> {
        ContainerDescriptor::new(Stopper::default)
            .property(Property::new("Round", |_: &mut Stopper, _: i32| {}).param(values![1, 2, 3]))
            .method(
                Method::new("Stop", |_: &mut Stopper| {
                    TOKEN.with(|t| {
                        if let Some(token) = t.borrow().as_ref() {
                            token.cancel();
                        }
                    });
                })
                .benchmark(Benchmark::new()),
            )
    }
}

/// Cancellation is honoured between plans; skipped plans are not reported
#[test]
fn test_cancellation_skips_remaining_plans() {
    let token = CancelToken::new();
    TOKEN.with(|t| *t.borrow_mut() = Some(token.clone()));

    let mut runner = runner().with_cancel_token(token);
    let report = runner.in_sequence().append::<Stopper>().append::<Grid>().run();

    assert_eq!(report.containers.len(), 1);
    let stopper = &report.containers[0];
    assert!(stopper.cancelled);
    assert_eq!(stopper.benchmarks.len(), 1);
}

/// A misconfigured container is recorded and the next one still runs
#[test]
fn test_sequence_continues_past_configuration_error() {
    let mut runner = runner();
    let report = runner
        .in_sequence()
        .append::<WrongArity>()
        .append::<Flaky>()
        .run();

    assert_eq!(report.containers.len(), 2);
    let rejected = &report.containers[0];
    assert!(rejected.benchmarks.is_empty());
    assert!(
        rejected
            .configuration_error
            .as_deref()
            .unwrap()
            .starts_with("Pair: arguments (1, 2, 3)")
    );
    assert_eq!(report.containers[1].benchmarks.len(), 1);
}

/// References are resolved once per container type and session
#[test]
fn test_rerun_reuses_session() {
    let mut runner = runner();
    let first = runner.run::<Flaky>().unwrap();
    let second = runner.run::<Flaky>().unwrap();
    assert_eq!(first.benchmarks.len(), second.benchmarks.len());
    assert!(format!("{:?}", runner).contains("cached_containers: 1"));
}

// ─── Exports ─────────────────────────────────────────────────────────────────

/// Text and JSON exports cover every node of the tree
#[test]
fn test_exports_contain_every_node() {
    let mut runner = runner();
    let report = runner.in_sequence().append::<Flaky>().append::<Grid>().run();

    let nodes = report.walk().count();
    let iterations = report
        .walk()
        .filter(|n| matches!(n, ReportNode::Iteration(_)))
        .count();
    assert_eq!(iterations, 5 + 4 * (3 + 3 + 1));
    assert_eq!(nodes, 1 + 2 + 1 + 12 + iterations);

    let text = ReportExporter::new(OutputFormat::Text, "unused")
        .render_collection(&report)
        .unwrap();
    assert_eq!(text.matches("Container \"").count(), 2);
    assert_eq!(text.matches("Benchmark \"").count(), 13);
    assert_eq!(text.matches("Iteration ").count(), iterations);
    assert!(text.contains("BASELINE"));

    let json = ReportExporter::new(OutputFormat::Json, "unused")
        .render_collection(&report)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["containers"].as_array().unwrap().len(), 2);
    assert_eq!(value["containers"][1]["benchmarks"].as_array().unwrap().len(), 12);
    assert_eq!(
        value["containers"][0]["benchmarks"][0]["iteration_reports"]
            .as_array()
            .unwrap()
            .len(),
        5
    );
}
