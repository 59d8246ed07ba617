//! Timing
//!
//! Monotonic wall-clock measurement in integer nanoseconds (ticks).

use std::sync::atomic::{Ordering, compiler_fence};
use std::time::Instant;

/// Timer for measuring a single stage or iteration
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed nanoseconds since the timer was started
    #[inline(always)]
    pub fn stop(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Settle memory before a measured iteration.
///
/// There is no collector to trigger, so this only keeps the compiler from
/// moving work across the timer boundary.
#[inline(always)]
pub fn reclaim_hint() {
    compiler_fence(Ordering::SeqCst);
}
