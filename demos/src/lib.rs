//! TinyBench Demos
//!
//! Sample containers and runnable demonstrations of TinyBench. This crate is
//! not published; it exists to host examples that depend on `tinybench`.
//!
//! Run any example with:
//! ```sh
//! cargo run --example <name> -p tinybench-demos --release
//! ```
//!
//! | Example | Feature |
//! |---------|---------|
//! | `basic` | One container, conventions, a baseline |
//! | `parameters` | Property grids, argument tuples, value widening |
//! | `failures` | Failing iterations, aborted plans, configuration errors |
//! | `sequence` | Several containers in one session, CLI overrides, export |

use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use std::hint::black_box;
use std::rc::Rc;
use tinybench::prelude::*;

// ---------------------------------------------------------------------------
// Sorting: conventions and a baseline
// ---------------------------------------------------------------------------

/// Sorts a reversed vector three ways against `slice::sort`
#[derive(Default)]
pub struct Sorting {
    source: Vec<u64>,
    scratch: Vec<u64>,
}

impl Sorting {
    const LEN: u64 = 10_000;

    fn reset(&mut self) {
        self.scratch.clear();
        self.scratch.extend_from_slice(&self.source);
    }
}

impl BenchmarksContainer for Sorting {
    fn describe() -> ContainerDescriptor<Self> {
        ContainerDescriptor::new(Sorting::default)
            // Found by name: runs once per plan before any warmup
            .method(Method::new("Init", |s: &mut Sorting| {
                s.source = (0..Self::LEN).rev().collect();
            }))
            .method(Method::new("StableWarmup", |s: &mut Sorting| s.reset()))
            .method(
                Method::new("Stable", |s: &mut Sorting| {
                    s.reset();
                    s.scratch.sort();
                    black_box(&s.scratch);
                })
                .benchmark(Benchmark::new().iterations(20).baseline()),
            )
            .method(
                Method::new("Unstable", |s: &mut Sorting| {
                    s.reset();
                    s.scratch.sort_unstable();
                    black_box(&s.scratch);
                })
                .benchmark(Benchmark::new().iterations(20)),
            )
            .method(
                Method::new("ByKey", |s: &mut Sorting| {
                    s.reset();
                    s.scratch.sort_by_key(|v| std::cmp::Reverse(*v));
                    black_box(&s.scratch);
                })
                .benchmark(Benchmark::new().named("Reverse by key").iterations(20)),
            )
    }
}

// ---------------------------------------------------------------------------
// Maps: parameter grid and argument tuples
// ---------------------------------------------------------------------------

/// Inserts then looks up keys in `HashMap` and `BTreeMap`
#[derive(Default)]
pub struct Maps {
    size: i64,
    hash: HashMap<i64, i64>,
    tree: BTreeMap<i64, i64>,
}

impl BenchmarksContainer for Maps {
    fn describe() -> ContainerDescriptor<Self> {
        ContainerDescriptor::new(Maps::default)
            .named("Map lookups")
            // i32 literals widen into the i64 slot
            .property(Property::new("Size", |m: &mut Maps, v: i64| m.size = v).param(values![100, 10_000]))
            .method(
                Method::new("Fill", |m: &mut Maps| {
                    m.hash = (0..m.size).map(|k| (k, k * 2)).collect();
                    m.tree = m.hash.iter().map(|(k, v)| (*k, *v)).collect();
                })
                .init(),
            )
            .method(
                Method::unary("Hash", "stride", |m: &mut Maps, stride: i64| {
                    let mut hits = 0;
                    for k in (0..m.size).step_by(stride as usize) {
                        hits += m.hash.get(&k).is_some() as u32;
                    }
                    black_box(hits);
                })
                .benchmark(Benchmark::new().iterations(10).baseline())
                .arguments(values![1])
                .arguments(values![7]),
            )
            .method(
                Method::unary("Tree", "stride", |m: &mut Maps, stride: i64| {
                    let mut hits = 0;
                    for k in (0..m.size).step_by(stride as usize) {
                        hits += m.tree.get(&k).is_some() as u32;
                    }
                    black_box(hits);
                })
                .benchmark(Benchmark::new().iterations(10).order(1))
                .arguments(values![1])
                .arguments(values![7]),
            )
    }
}

// ---------------------------------------------------------------------------
// Pricing: decimal arguments and container output
// ---------------------------------------------------------------------------

/// Compounds a price with `Decimal` arithmetic, logging through the output sink
pub struct Pricing {
    out: Rc<dyn OutputSink>,
    periods: i32,
}

impl BenchmarksContainer for Pricing {
    fn describe() -> ContainerDescriptor<Self> {
        ContainerDescriptor::with_output(|out| Pricing { out, periods: 0 })
            .property(Property::new("Periods", |p: &mut Pricing, v: i32| p.periods = v).param(values![12, 120]))
            .method(
                Method::new("Announce", |p: &mut Pricing| {
                    p.out.write_line(&format!("compounding over {} periods", p.periods));
                })
                .init_container(),
            )
            .method(
                Method::binary(
                    "Compound",
                    ["principal", "rate"],
                    |p: &mut Pricing, principal: Decimal, rate: Decimal| {
                        let mut value = principal;
                        for _ in 0..p.periods {
                            value = (value + value * rate).round_dp(10);
                        }
                        black_box(value.round_dp(2));
                    },
                )
                .benchmark(Benchmark::new().iterations(5))
                // Text and integers both widen to Decimal
                .arguments(values![1000, "0.01"])
                .arguments(values!["2500.50", "0.005"]),
            )
    }
}

// ---------------------------------------------------------------------------
// Unreliable: failures at every stage
// ---------------------------------------------------------------------------

/// Benchmarks that fail on purpose
#[derive(Default)]
pub struct Unreliable {
    calls: u32,
}

impl BenchmarksContainer for Unreliable {
    fn describe() -> ContainerDescriptor<Self> {
        ContainerDescriptor::new(Unreliable::default)
            .method(
                Method::new("EveryOther", |u: &mut Unreliable| -> anyhow::Result<()> {
                    u.calls += 1;
                    if u.calls % 2 == 0 {
                        anyhow::bail!("call {} rejected", u.calls);
                    }
                    Ok(())
                })
                .benchmark(Benchmark::new().iterations(6)),
            )
            .method(
                Method::new("Panicky", |_: &mut Unreliable| {
                    black_box(1u64);
                })
                .benchmark(Benchmark::new()),
            )
            .method(Method::new("PanickyInit", |_: &mut Unreliable| -> anyhow::Result<()> {
                panic!("setup could not reach the service")
            }))
            .method(
                Method::new("Steady", |_: &mut Unreliable| {
                    black_box(42u64.wrapping_mul(17));
                })
                .benchmark(Benchmark::new().iterations(3)),
            )
    }
}

/// A container whose description is rejected: the tuple has the wrong arity
#[derive(Default)]
pub struct Misdeclared;

impl BenchmarksContainer for Misdeclared {
    fn describe() -> ContainerDescriptor<Self> {
        ContainerDescriptor::new(Misdeclared::default).method(
            Method::binary("Add", ["a", "b"], |_: &mut Misdeclared, a: i32, b: i32| {
                black_box(a + b);
            })
            .benchmark(Benchmark::new())
            .arguments(values![1]),
        )
    }
}
