//! Baseline Evaluation
//!
//! Attaches [`BaselineStats`] to the reports of one parameter-set group once
//! every plan of the group has run.

use tinybench_report::BenchmarkReport;
use tinybench_stats::BaselineStats;

/// Compare every report of `group` against its baseline, if it has one.
///
/// The baseline itself gets identity stats. Other reports are compared by
/// their average, and each of their successful iterations by its duration,
/// against the baseline's average. A report without a successful iteration
/// has no average to compare and keeps `baseline_stats` empty.
pub fn evaluate_baseline(group: &mut [BenchmarkReport]) {
    // With several argument tuples the first baseline plan is the reference
    let Some(reference) = group.iter().position(|r| r.baseline) else {
        return;
    };
    let baseline_ns = group[reference].average_duration_ns;

    for (index, report) in group.iter_mut().enumerate() {
        if index == reference {
            report.baseline_stats = Some(BaselineStats::IDENTITY);
            continue;
        }
        if report.successful_iterations == 0 {
            continue;
        }
        report.baseline_stats = Some(BaselineStats::compare(baseline_ns, report.average_duration_ns));
        for iteration in report.iteration_reports.iter_mut().filter(|i| i.succeeded()) {
            iteration.baseline_stats = Some(BaselineStats::compare(baseline_ns, iteration.duration_ns));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tinybench_report::{Failure, FailureKind, IterationReport, Stage};

    fn iteration(index: u32, duration_ns: u64, failed: bool) -> IterationReport {
        IterationReport {
            index,
            started_at: Utc::now(),
            duration_ns,
            failure: failed.then(|| Failure {
                stage: Stage::Iteration,
                kind: FailureKind::Error,
                message: "boom".to_string(),
            }),
            baseline_stats: None,
        }
    }

    fn report(name: &str, average_duration_ns: u64, baseline: bool, iterations: Vec<IterationReport>) -> BenchmarkReport {
        BenchmarkReport {
            name: name.to_string(),
            started_at: Utc::now(),
            duration_ns: 0,
            init_duration_ns: 0,
            warmup_duration_ns: 0,
            average_duration_ns,
            iterations: iterations.len() as u32,
            successful_iterations: iterations.iter().filter(|i| i.succeeded()).count() as u32,
            baseline,
            parameters: None,
            arguments: None,
            baseline_stats: None,
            failures: Vec::new(),
            iteration_reports: iterations,
        }
    }

    #[test]
    fn test_group_without_baseline() {
        let mut group = vec![report("A", 10, false, vec![iteration(1, 10, false)])];
        evaluate_baseline(&mut group);
        assert!(group[0].baseline_stats.is_none());
        assert!(group[0].iteration_reports[0].baseline_stats.is_none());
    }

    #[test]
    fn test_stats_against_baseline_average() {
        let mut group = vec![
            report("Fast", 50, false, vec![iteration(1, 50, false), iteration(2, 7, true)]),
            report("Base", 100, true, vec![iteration(1, 100, false)]),
        ];
        evaluate_baseline(&mut group);

        let fast = group[0].baseline_stats.unwrap();
        assert_eq!(fast.ratio, 0.5);
        assert_eq!(fast.efficiency, 2.0);
        assert_eq!(fast.time_difference_ns, 50);
        assert!(fast.is_faster());

        assert_eq!(group[0].iteration_reports[0].baseline_stats, Some(fast));
        assert!(group[0].iteration_reports[1].baseline_stats.is_none());

        assert_eq!(group[1].baseline_stats, Some(BaselineStats::IDENTITY));
        assert!(group[1].iteration_reports[0].baseline_stats.is_none());
    }

    #[test]
    fn test_zero_baseline_average() {
        let mut group = vec![
            report("Base", 0, true, Vec::new()),
            report("Other", 40, false, vec![iteration(1, 40, false)]),
        ];
        evaluate_baseline(&mut group);
        let stats = group[1].baseline_stats.unwrap();
        assert_eq!(stats.ratio, 0.0);
        assert_eq!(stats.efficiency, 0.0);
        assert_eq!(stats.time_difference_ns, -40);
    }

    #[test]
    fn test_first_baseline_plan_is_reference() {
        let mut group = vec![
            report("Base", 100, true, vec![iteration(1, 100, false)]),
            report("Base", 300, true, vec![iteration(1, 300, false)]),
        ];
        evaluate_baseline(&mut group);
        assert_eq!(group[0].baseline_stats, Some(BaselineStats::IDENTITY));
        let second = group[1].baseline_stats.unwrap();
        assert_eq!(second.ratio, 3.0);
        assert_eq!(second.time_difference_ns, -200);
    }

    #[test]
    fn test_plan_without_successes_is_not_compared() {
        let mut group = vec![
            report("Base", 100, true, vec![iteration(1, 100, false)]),
            report("Broken", 0, false, vec![iteration(1, 3, true), iteration(2, 4, true)]),
            report("Aborted", 0, false, Vec::new()),
        ];
        evaluate_baseline(&mut group);
        assert_eq!(group[0].baseline_stats, Some(BaselineStats::IDENTITY));
        assert!(group[1].baseline_stats.is_none());
        assert!(group[1].iteration_reports.iter().all(|i| i.baseline_stats.is_none()));
        assert!(group[2].baseline_stats.is_none());
    }
}
