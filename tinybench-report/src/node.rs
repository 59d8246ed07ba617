//! Report Tree Walking
//!
//! Exporters see the report as a tree of [`ReportNode`]s visited depth-first:
//!
//! ```text
//! Collection
//!   └── Container
//!         └── Benchmark
//!               └── Iteration
//! ```

use crate::report::{
    BenchmarkReport, BenchmarksCollectionReport, BenchmarksContainerReport, IterationReport,
};

/// One node of the report tree
#[derive(Debug, Clone, Copy)]
pub enum ReportNode<'a> {
    /// Root of a sequence run
    Collection(&'a BenchmarksCollectionReport),
    /// One container run
    Container(&'a BenchmarksContainerReport),
    /// One plan
    Benchmark(&'a BenchmarkReport),
    /// One measured iteration
    Iteration(&'a IterationReport),
}

impl<'a> ReportNode<'a> {
    /// Nesting depth, 0 for the collection
    pub fn depth(&self) -> usize {
        match self {
            ReportNode::Collection(_) => 0,
            ReportNode::Container(_) => 1,
            ReportNode::Benchmark(_) => 2,
            ReportNode::Iteration(_) => 3,
        }
    }

    fn push_children(&self, stack: &mut Vec<ReportNode<'a>>) {
        match *self {
            ReportNode::Collection(c) => {
                stack.extend(c.containers.iter().rev().map(ReportNode::Container));
            }
            ReportNode::Container(c) => {
                stack.extend(c.benchmarks.iter().rev().map(ReportNode::Benchmark));
            }
            ReportNode::Benchmark(b) => {
                stack.extend(b.iteration_reports.iter().rev().map(ReportNode::Iteration));
            }
            ReportNode::Iteration(_) => {}
        }
    }
}

/// Depth-first, pre-order iterator over a report tree
pub struct ReportNodes<'a> {
    stack: Vec<ReportNode<'a>>,
}

impl<'a> Iterator for ReportNodes<'a> {
    type Item = ReportNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        node.push_children(&mut self.stack);
        Some(node)
    }
}

/// Walk every node below and including `root`
pub fn walk(root: ReportNode<'_>) -> ReportNodes<'_> {
    ReportNodes { stack: vec![root] }
}

impl BenchmarksCollectionReport {
    /// Depth-first walk of the whole report
    pub fn walk(&self) -> ReportNodes<'_> {
        walk(ReportNode::Collection(self))
    }
}

impl BenchmarksContainerReport {
    /// Depth-first walk starting at this container
    pub fn walk(&self) -> ReportNodes<'_> {
        walk(ReportNode::Container(self))
    }
}
