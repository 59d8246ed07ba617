#![warn(missing_docs)]
//! TinyBench Statistics
//!
//! Provides:
//! - Integer-tick aggregation of iteration durations
//! - Ratio, efficiency and time difference against a baseline

mod comparison;
mod summary;

pub use comparison::BaselineStats;
pub use summary::{DurationSummary, summarize};
