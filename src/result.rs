//! Test case records and the suite aggregate
//!
//! `TestCase` is the immutable record emitted by the parser for each
//! block of doctest output; `TestSuite` collects the emitted cases and
//! tracks overall duration.

use std::fmt;
use std::time::{Duration, Instant};

/// Outcome of a single test case, ordered by severity.
///
/// The ordering matters: a case's status only ever escalates
/// (`Passed` → `Warned` → `Failed`), never de-escalates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TestStatus {
    Passed,
    Warned,
    Failed,
}

impl TestStatus {
    /// Return the more severe of the two statuses.
    pub fn escalate(self, other: TestStatus) -> TestStatus {
        self.max(other)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Passed => write!(f, "PASSED"),
            TestStatus::Warned => write!(f, "WARNED"),
            TestStatus::Failed => write!(f, "FAILED"),
        }
    }
}

/// The origin location of a test case in the binary's source tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCaseSource {
    /// Source file path as printed by the framework
    pub file: String,
    /// 1-based line number
    pub line: u32,
}

impl TestCaseSource {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for TestCaseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A reconstructed test case.
///
/// Immutable once emitted by the parser; `stdout` holds the raw,
/// unmodified console output of the case's block for diagnostic replay.
#[derive(Debug, Clone)]
pub struct TestCase {
    /// Hierarchical name: nested test/subcase labels joined by ` -> `
    pub name: String,
    /// Final outcome
    pub status: TestStatus,
    /// Origin location, if the block carried one
    pub source: Option<TestCaseSource>,
    /// Message from the first failure/warning marker line, if any
    pub message: Option<String>,
    /// Raw captured output of the whole block
    pub stdout: String,
}

impl TestCase {
    /// Render a one-line human-readable form for console display.
    pub fn humanize(&self) -> String {
        let mut out = format!("{} {}", self.status, self.name);
        if let Some(ref source) = self.source {
            out.push_str(&format!(" ({})", source));
        }
        if let Some(ref message) = self.message {
            out.push_str(&format!(": {}", message));
        }
        out
    }
}

/// Append-only aggregate of emitted test cases.
///
/// Duration runs from construction until `on_finish` is first called.
#[derive(Debug)]
pub struct TestSuite {
    /// Emitted cases, in stream order
    pub cases: Vec<TestCase>,
    started: Instant,
    duration: Option<Duration>,
}

impl TestSuite {
    pub fn new() -> Self {
        Self {
            cases: Vec::new(),
            started: Instant::now(),
            duration: None,
        }
    }

    /// Append an emitted case.
    pub fn add_case(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    /// Record the total duration. Only the first call takes effect.
    pub fn on_finish(&mut self) {
        if self.duration.is_none() {
            self.duration = Some(self.started.elapsed());
        }
    }

    /// Total duration, or elapsed-so-far if `on_finish` was never seen.
    pub fn duration(&self) -> Duration {
        self.duration.unwrap_or_else(|| self.started.elapsed())
    }

    /// Check if no case failed
    pub fn all_passed(&self) -> bool {
        self.cases.iter().all(|c| c.status != TestStatus::Failed)
    }

    /// Count passed cases
    pub fn passed_count(&self) -> usize {
        self.cases.iter().filter(|c| c.status == TestStatus::Passed).count()
    }

    /// Count warned cases
    pub fn warned_count(&self) -> usize {
        self.cases.iter().filter(|c| c.status == TestStatus::Warned).count()
    }

    /// Count failed cases
    pub fn failed_count(&self) -> usize {
        self.cases.iter().filter(|c| c.status == TestStatus::Failed).count()
    }

    /// Format a summary line
    pub fn summary(&self) -> String {
        format!(
            "{} passed, {} warned, {} failed ({}ms)",
            self.passed_count(),
            self.warned_count(),
            self.failed_count(),
            self.duration().as_millis(),
        )
    }
}

impl Default for TestSuite {
    fn default() -> Self {
        Self::new()
    }
}
