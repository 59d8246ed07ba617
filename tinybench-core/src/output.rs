//! Run Output
//!
//! Line-oriented console output filtered by verbosity. Nested stages indent
//! their lines by two spaces through [`IndentGuard`].

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Verbosity of run output
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum OutputLevel {
    /// Nothing is written
    Silent = 0,
    /// Only errors
    ErrorsOnly = 5,
    /// Container headers and errors
    Minimal = 10,
    /// Benchmark progress
    #[default]
    Normal = 20,
    /// Parameters, stage timings and container messages
    Verbose = 30,
}

impl std::str::FromStr for OutputLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" => Ok(OutputLevel::Silent),
            "errors-only" | "errors" => Ok(OutputLevel::ErrorsOnly),
            "minimal" => Ok(OutputLevel::Minimal),
            "normal" => Ok(OutputLevel::Normal),
            "verbose" => Ok(OutputLevel::Verbose),
            other => Err(format!("Unknown output level: {}", other)),
        }
    }
}

impl fmt::Display for OutputLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputLevel::Silent => "silent",
            OutputLevel::ErrorsOnly => "errors-only",
            OutputLevel::Minimal => "minimal",
            OutputLevel::Normal => "normal",
            OutputLevel::Verbose => "verbose",
        };
        f.write_str(name)
    }
}

/// Line-writing capability handed to containers that ask for it
pub trait OutputSink {
    /// Write one line
    fn write_line(&self, message: &str);
}

enum Target {
    Stdout,
    Capture(RefCell<Vec<String>>),
}

/// Console output of a benchmark run
pub struct BenchmarkOutput {
    level: OutputLevel,
    indent: Cell<usize>,
    target: Target,
}

impl BenchmarkOutput {
    /// Output written to stdout
    pub fn new(level: OutputLevel) -> Self {
        Self {
            level,
            indent: Cell::new(0),
            target: Target::Stdout,
        }
    }

    /// Output collected in memory, see [`BenchmarkOutput::lines`]
    pub fn captured(level: OutputLevel) -> Self {
        Self {
            level,
            indent: Cell::new(0),
            target: Target::Capture(RefCell::new(Vec::new())),
        }
    }

    /// Configured verbosity
    pub fn level(&self) -> OutputLevel {
        self.level
    }

    /// Whether a message at `level` would be written
    pub fn is_shown(&self, level: OutputLevel) -> bool {
        level != OutputLevel::Silent && level <= self.level
    }

    /// Write `message` at the current indentation if `level` is shown
    pub fn write_line(&self, level: OutputLevel, message: &str) {
        if !self.is_shown(level) {
            return;
        }
        let line = format!("{}{}", "  ".repeat(self.indent.get()), message);
        match &self.target {
            Target::Stdout => println!("{}", line),
            Target::Capture(lines) => lines.borrow_mut().push(line),
        }
    }

    /// Write an error line
    pub fn error(&self, message: &str) {
        self.write_line(OutputLevel::ErrorsOnly, &format!("[Error] {}", message));
    }

    /// Indent subsequent lines until the guard is dropped
    pub fn indent(&self) -> IndentGuard<'_> {
        self.indent.set(self.indent.get() + 1);
        IndentGuard { output: self }
    }

    /// Captured lines (always empty for stdout output)
    pub fn lines(&self) -> Vec<String> {
        match &self.target {
            Target::Stdout => Vec::new(),
            Target::Capture(lines) => lines.borrow().clone(),
        }
    }
}

impl fmt::Debug for BenchmarkOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkOutput")
            .field("level", &self.level)
            .field("indent", &self.indent.get())
            .finish_non_exhaustive()
    }
}

/// Restores the previous indentation on drop
pub struct IndentGuard<'a> {
    output: &'a BenchmarkOutput,
}

impl Drop for IndentGuard<'_> {
    fn drop(&mut self) {
        let current = self.output.indent.get();
        self.output.indent.set(current.saturating_sub(1));
    }
}

/// [`OutputSink`] writing through a shared [`BenchmarkOutput`] at a fixed level
pub struct LeveledSink {
    output: Rc<BenchmarkOutput>,
    level: OutputLevel,
}

impl LeveledSink {
    /// Sink writing at `level`
    pub fn new(output: Rc<BenchmarkOutput>, level: OutputLevel) -> Self {
        Self { output, level }
    }
}

impl OutputSink for LeveledSink {
    fn write_line(&self, message: &str) {
        self.output.write_line(self.level, message);
    }
}
