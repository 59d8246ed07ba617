#![warn(missing_docs)]
//! TinyBench Core - Container Description
//!
//! This crate provides the input side of a benchmark run:
//! - `BenchmarksContainer` and the `ContainerDescriptor` registration table
//! - Method/property definitions with their markers
//! - The closed set of parameter/argument `Value`s and slot types
//! - Integer-nanosecond timing
//! - Leveled console output and the output-sink capability

mod container;
mod measure;
mod output;
mod value;

pub use container::{
    Benchmark, BenchmarksContainer, ContainerDescriptor, Factory, IntoOutcome, Invoker, Marker,
    MethodDef, ParamDecl, PropertyDef, Setter, short_type_name,
};
pub use measure::{Timer, reclaim_hint};
pub use output::{BenchmarkOutput, IndentGuard, LeveledSink, OutputLevel, OutputSink};
pub use value::{SlotValue, TypeSpec, Value, ValueKind};

/// Shorter name for [`MethodDef`] in container descriptions
pub type Method<C> = MethodDef<C>;

/// Shorter name for [`PropertyDef`] in container descriptions
pub type Property<C> = PropertyDef<C>;
