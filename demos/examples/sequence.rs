//! Sequence Runs: one session, several containers, CLI overrides
//!
//! Configuration comes from the nearest `tinybench.toml`, then from the
//! command line. Ctrl-C is not wired up here; a watchdog thread cancels the
//! run after `--budget-secs`, and the remaining plans are skipped.
//!
//! Run with:
//!   cargo run --example sequence -p tinybench-demos --release
//!   cargo run --example sequence -p tinybench-demos --release -- "^Hash" --format json --progress

use clap::Parser;
use std::time::Duration;
use tinybench::prelude::*;
use tinybench::{CancelToken, Cli, TinyBenchConfig};
use tinybench_demos::{Maps, Pricing, Sorting, Unreliable};

#[derive(Parser, Debug)]
#[command(name = "sequence", about = "Run every sample container")]
struct Args {
    #[command(flatten)]
    cli: Cli,

    /// Cancel the run after this many seconds
    #[arg(long, default_value_t = 60)]
    budget_secs: u64,

    /// Print the default tinybench.toml and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.print_config {
        print!("{}", TinyBenchConfig::default_toml());
        return Ok(());
    }
    tinybench::init_logging(args.cli.verbose);

    let config = args.cli.apply(TinyBenchConfig::discover().unwrap_or_default());
    let token = CancelToken::new();
    let watchdog = token.clone();
    let budget = Duration::from_secs(args.budget_secs);
    std::thread::spawn(move || {
        std::thread::sleep(budget);
        watchdog.cancel();
    });

    let mut runner = BenchmarkRunner::new(config)?.with_cancel_token(token);
    let report = runner
        .in_sequence()
        .append::<Sorting>()
        .append::<Maps>()
        .append::<Pricing>()
        .append::<Unreliable>()
        .run();

    let path = runner.export_collection(&report)?;
    println!("Report written to: {}", path.display());
    Ok(())
}
