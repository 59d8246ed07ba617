//! Basic Container: conventions and a baseline
//!
//! `Sorting` registers an `Init` and a `StableWarmup` method without any
//! marker; both are found by name. `Stable` is the baseline, so the other two
//! benchmarks are reported as ratio, efficiency and time difference against it.
//!
//! Run with: cargo run --example basic -p tinybench-demos --release

use tinybench::prelude::*;
use tinybench::{OutputLevel, TextExporter, TinyBenchConfig};
use tinybench_demos::Sorting;

fn main() -> anyhow::Result<()> {
    tinybench::init_logging(false);

    let mut config = TinyBenchConfig::default();
    config.runner.output_level = OutputLevel::Verbose;
    let mut runner = BenchmarkRunner::new(config)?;

    let report = runner.run::<Sorting>()?;
    println!();
    print!("{}", TextExporter::new(false).export_container(&report));
    Ok(())
}
