//! Baseline Comparison
//!
//! Relates a benchmark's average duration to its group's baseline:
//! - `ratio = avg / baseline` (below 1.0 means faster)
//! - `efficiency = baseline / avg` (how many times as efficient)
//! - `time_difference = baseline - avg` (positive means faster)

use serde::{Deserialize, Serialize};

/// Statistics of one report or iteration relative to the baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineStats {
    /// `avg / baseline`
    pub ratio: f64,
    /// `baseline / avg`
    pub efficiency: f64,
    /// `baseline - avg` in nanoseconds
    pub time_difference_ns: i64,
}

impl BaselineStats {
    /// Statistics of the baseline against itself
    pub const IDENTITY: BaselineStats = BaselineStats {
        ratio: 1.0,
        efficiency: 1.0,
        time_difference_ns: 0,
    };

    /// Compare `duration_ns` against `baseline_ns`
    pub fn compare(baseline_ns: u64, duration_ns: u64) -> Self {
        Self {
            ratio: guarded_ratio(duration_ns, baseline_ns),
            efficiency: guarded_ratio(baseline_ns, duration_ns),
            time_difference_ns: signed_difference(baseline_ns, duration_ns),
        }
    }

    /// Whether the compared duration beat the baseline
    pub fn is_faster(&self) -> bool {
        self.time_difference_ns > 0
    }
}

/// `numerator / denominator`, or 0.0 when the denominator is zero
fn guarded_ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64
}

fn signed_difference(a: u64, b: u64) -> i64 {
    let diff = i128::from(a) - i128::from(b);
    i64::try_from(diff).unwrap_or(if diff < 0 { i64::MIN } else { i64::MAX })
}
