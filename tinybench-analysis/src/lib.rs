#![warn(missing_docs)]
//! TinyBench Analysis - Reference Resolution
//!
//! Turns a container description into immutable references:
//! - Benchmark, init, init-with and warmup resolution (marker first, naming convention second)
//! - Argument tuples checked for arity and coerced to the declared parameter types
//! - Parameter value lists expanded into a deterministic cross product
//! - A session registry caching references per container type
//!
//! Every rejected description surfaces as a [`ConfigurationError`] before
//! anything executes.

mod builders;
mod coercion;
mod error;
mod introspector;
mod parameters;
mod references;
mod registry;
mod scanner;

pub use coercion::{TypeTransformer, format_tuple, widen};
pub use error::ConfigurationError;
pub use introspector::MemberTable;
pub use parameters::{ParametersSet, ParametersSetCollection, ParametersSetIter};
pub use references::{
    ArgumentsReference, BenchmarkReference, ContainerReference, InitReference, WarmupReference,
};
pub use registry::ReferenceRegistry;
pub use scanner::{ScanOptions, scan};
