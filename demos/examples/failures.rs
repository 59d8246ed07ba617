//! Failure Handling: iterations, aborted plans, rejected containers
//!
//! - `EveryOther` fails on even calls: three of six iterations succeed
//! - `Panicky` has an init that panics: the plan is aborted, siblings still run
//! - `Misdeclared` passes one value to a two-parameter method and is rejected
//!   before anything runs; the sequence continues with the next container
//!
//! Run with: cargo run --example failures -p tinybench-demos --release

use tinybench::prelude::*;
use tinybench::{OutputLevel, TextExporter, TinyBenchConfig};
use tinybench_demos::{Misdeclared, Unreliable};

fn main() -> anyhow::Result<()> {
    tinybench::init_logging(false);

    let mut config = TinyBenchConfig::default();
    config.runner.output_level = OutputLevel::ErrorsOnly;
    let mut runner = BenchmarkRunner::new(config)?;

    let report = runner
        .in_sequence()
        .append::<Misdeclared>()
        .append::<Unreliable>()
        .run();

    println!();
    print!("{}", TextExporter::new(true).export(&report));

    let failed = report
        .containers
        .iter()
        .filter(|c| c.configuration_error.is_some() || c.has_failures())
        .count();
    println!("\n{} of {} container(s) reported failures", failed, report.containers.len());
    Ok(())
}
