//! Progress Reporting
//!
//! The runner notifies a [`Progress`] as plans complete. [`BarProgress`]
//! draws an indicatif bar; [`NoProgress`] ignores every call.

use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;

/// Receives plan progress of a container run
pub trait Progress {
    /// A container with `plans` planned benchmarks is about to run
    fn start(&self, container: &str, plans: usize);
    /// One plan finished
    fn plan_finished(&self, benchmark: &str);
    /// The container run ended, `completed` tells whether it was cancelled
    fn finish(&self, completed: bool);
}

/// Silent progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&self, _container: &str, _plans: usize) {}
    fn plan_finished(&self, _benchmark: &str) {}
    fn finish(&self, _completed: bool) {}
}

/// Progress bar on stderr, one bar per container
#[derive(Debug, Default)]
pub struct BarProgress {
    bar: RefCell<Option<ProgressBar>>,
}

impl BarProgress {
    /// New bar, drawn once a container starts
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for BarProgress {
    fn start(&self, container: &str, plans: usize) {
        let pb = ProgressBar::new(plans as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message(container.to_string());
        *self.bar.borrow_mut() = Some(pb);
    }

    fn plan_finished(&self, benchmark: &str) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.set_message(benchmark.to_string());
            pb.inc(1);
        }
    }

    fn finish(&self, completed: bool) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            if completed {
                pb.finish_with_message("Complete");
            } else {
                pb.abandon_with_message("Cancelled");
            }
        }
    }
}
