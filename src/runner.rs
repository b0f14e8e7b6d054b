//! Test runner
//!
//! Drives the line parser over a doctest binary's output — spawns the
//! binary with piped stdout (or replays a saved log), feeds lines to the
//! parser one at a time, echoes progress, and collects emitted cases
//! into a [`TestSuite`].

use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::ParseError;
use crate::parser::DoctestCaseParser;
use crate::result::TestSuite;

/// The framework summary line that signals the end of the case stream.
const STATUS_MARKER: &str = "[doctest] Status:";

/// Configuration for the runner
pub struct RunConfig {
    /// Path to the doctest test binary
    pub program: PathBuf,
    /// Arguments passed through to the binary
    pub args: Vec<String>,
    /// Echo every raw output line while parsing
    pub verbose: bool,
    /// Only collect cases whose name matches this pattern
    pub filter: Option<regex::Regex>,
}

impl RunConfig {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            verbose: false,
            filter: None,
        }
    }
}

/// An error while running or replaying a test stream
#[derive(Debug)]
pub enum RunError {
    /// Spawning or reading the binary failed
    Io(std::io::Error),
    /// The output stream violated the doctest format contract
    Parse(ParseError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Io(e) => write!(f, "{}", e),
            RunError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Io(e) => Some(e),
            RunError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for RunError {
    fn from(e: std::io::Error) -> Self {
        RunError::Io(e)
    }
}

impl From<ParseError> for RunError {
    fn from(e: ParseError) -> Self {
        RunError::Parse(e)
    }
}

/// The test runner
pub struct DoctestRunner {
    config: RunConfig,
    parser: DoctestCaseParser,
}

impl DoctestRunner {
    /// Create a new runner with the given config
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            parser: DoctestCaseParser::new(),
        }
    }

    /// Spawn the configured binary and parse its stdout to completion.
    pub fn run(&mut self) -> Result<TestSuite, RunError> {
        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        // stdout is piped above, so take() always succeeds
        let stdout = child.stdout.take().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "failed to capture child stdout")
        })?;

        let suite = self.consume(BufReader::new(stdout));

        // Reap the child regardless of parse outcome. The binary's exit
        // code duplicates what the suite's failed count already says.
        let _ = child.wait();
        suite
    }

    /// Parse a previously captured output log.
    pub fn replay(&mut self, reader: impl BufRead) -> Result<TestSuite, RunError> {
        self.consume(reader)
    }

    /// The shared consumer loop: read lines with their trailing newline
    /// intact and feed each one through the parser.
    fn consume(&mut self, mut reader: impl BufRead) -> Result<TestSuite, RunError> {
        let mut suite = TestSuite::new();
        let mut line = String::new();

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            self.feed_line(&line, &mut suite)?;
        }

        Ok(suite)
    }

    /// Process one raw output line.
    fn feed_line(&mut self, line: &str, suite: &mut TestSuite) -> Result<(), RunError> {
        if self.config.verbose {
            print!("{}", line);
        }

        if let Some(case) = self.parser.parse(line)? {
            // the parser is single-shot: replace it after each emission
            self.parser = DoctestCaseParser::new();
            if self.matches_filter(&case.name) {
                println!("{}", case.humanize());
                suite.add_case(case);
            }
        }

        if line.contains(STATUS_MARKER) {
            suite.on_finish();
        }

        Ok(())
    }

    fn matches_filter(&self, name: &str) -> bool {
        match self.config.filter {
            Some(ref filter) => filter.is_match(name),
            None => true,
        }
    }
}

/// Builder API for convenient runner construction
pub struct DoctestRunnerBuilder {
    config: RunConfig,
}

impl DoctestRunnerBuilder {
    /// Start building a runner for the given test binary
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            config: RunConfig::new(program),
        }
    }

    /// Append an argument passed through to the binary
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.config.args.push(arg.into());
        self
    }

    /// Enable raw line echoing
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Only collect cases whose name matches the pattern
    pub fn filter(mut self, filter: regex::Regex) -> Self {
        self.config.filter = Some(filter);
        self
    }

    /// Build and return the runner
    pub fn build(self) -> DoctestRunner {
        DoctestRunner::new(self.config)
    }

    /// Build the runner, spawn the binary, and parse to completion
    pub fn run(self) -> Result<TestSuite, RunError> {
        self.build().run()
    }
}
