//! Parameter Grids: properties × argument tuples
//!
//! `Maps` declares two sizes and two strides per benchmark: each size forms a
//! group of four plans with `Hash` as the group's baseline. `Pricing` feeds
//! integers and text into `Decimal` slots; both widen at construction.
//!
//! Run with: cargo run --example parameters -p tinybench-demos --release

use tinybench::prelude::*;
use tinybench::{OutputLevel, ReportNode, TinyBenchConfig};
use tinybench_demos::{Maps, Pricing};

fn main() -> anyhow::Result<()> {
    tinybench::init_logging(false);

    let mut config = TinyBenchConfig::default();
    config.runner.output_level = OutputLevel::Verbose;
    let mut runner = BenchmarkRunner::new(config)?;

    let report = runner.in_sequence().append::<Maps>().append::<Pricing>().run();

    println!("\n{:<14} {:<22} {:<26} {:>12} {:>8}", "benchmark", "parameters", "arguments", "avg (ns)", "ratio");
    for node in report.walk() {
        let ReportNode::Benchmark(b) = node else {
            continue;
        };
        let join = |values: &Option<Vec<tinybench::NamedValue>>| {
            values
                .as_ref()
                .map(|v| {
                    v.iter()
                        .map(|p| format!("{}={}", p.name, p.value.literal()))
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_else(|| "-".to_string())
        };
        let ratio = b
            .baseline_stats
            .map(|s| format!("{:.3}", s.ratio))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<14} {:<22} {:<26} {:>12} {:>8}",
            b.name,
            join(&b.parameters),
            join(&b.arguments),
            b.average_duration_ns,
            ratio
        );
    }
    Ok(())
}
