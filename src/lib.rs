//! doctest-report: structured results from doctest console output
//!
//! Incrementally parses the textual output of a [doctest] (C++ test
//! framework) unit-test binary and reconstructs structured test-case
//! records — name, source location, pass/fail/warn status, optional
//! message, raw captured output — one line at a time, without buffering
//! the full stream.
//!
//! [doctest]: https://github.com/doctest/doctest
//!
//! # Overview
//!
//! Doctest prints one block per test case, delimited by `===` divider
//! lines:
//!
//! ```text
//! ===============================================================================
//! test/test_main.cpp:42:
//! TEST CASE:  my test case
//!
//! test/test_main.cpp:45: ERROR: CHECK( x == 1 ) is NOT correct!
//! ===============================================================================
//! [doctest] test cases: 1 | 0 passed | 1 failed
//! [doctest] Status: FAILURE!
//! ```
//!
//! [`DoctestCaseParser`] consumes one line per call and emits a
//! [`TestCase`] whenever a divider closes a block. [`DoctestRunner`]
//! wraps the full loop: it spawns the binary (or replays a saved log),
//! feeds every line through a parser, and aggregates the emitted cases
//! into a [`TestSuite`], finishing when the `[doctest] Status:` summary
//! line is seen.
//!
//! ```no_run
//! use doctest_report::DoctestRunnerBuilder;
//!
//! let suite = DoctestRunnerBuilder::new("./build/test_main")
//!     .verbose(false)
//!     .run()
//!     .unwrap();
//! println!("{}", suite.summary());
//! ```

mod build_config;
mod error;
mod parser;
mod result;
mod runner;

pub use build_config::{BuildConfig, FRAMEWORK_LIB_DEP};
pub use error::{ParseError, ParseErrorKind};
pub use parser::DoctestCaseParser;
pub use result::{TestCase, TestCaseSource, TestStatus, TestSuite};
pub use runner::{DoctestRunner, DoctestRunnerBuilder, RunConfig, RunError};
