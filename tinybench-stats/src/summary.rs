//! Duration Aggregation
//!
//! Sums are accumulated in integer nanoseconds so averages do not drift.

/// Aggregate of a plan's measured iterations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationSummary {
    /// Iterations that completed without failure
    pub successful: u32,
    /// Sum of successful durations
    pub total_ns: u128,
    /// `total_ns / successful`, 0 when nothing succeeded
    pub average_ns: u64,
}

/// Summarize `(duration_ns, succeeded)` pairs
pub fn summarize(iterations: impl IntoIterator<Item = (u64, bool)>) -> DurationSummary {
    let mut successful = 0u32;
    let mut total_ns = 0u128;
    for (duration_ns, succeeded) in iterations {
        if succeeded {
            successful += 1;
            total_ns += u128::from(duration_ns);
        }
    }
    let average_ns = if successful == 0 {
        0
    } else {
        u64::try_from(total_ns / u128::from(successful)).unwrap_or(u64::MAX)
    };
    DurationSummary {
        successful,
        total_ns,
        average_ns,
    }
}
