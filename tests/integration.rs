//! Integration test: replay a captured doctest output log end to end
//!
//! Exercises the full runner loop — parser replacement after each
//! emission, suite aggregation, and the `[doctest] Status:` finish
//! signal — over a realistic multi-case log.

use std::io::{BufReader, Cursor, Write};

use doctest_report::{DoctestRunner, RunConfig, TestStatus};

/// Output of a doctest 2.4.x binary with one passing case (with nested
/// subcases), one warning, and one failing case.
const CAPTURED_LOG: &str = r#"[doctest] doctest version is "2.4.8"
[doctest] run with "--help" for options
===============================================================================
test/test_vector.cpp:10:
TEST CASE:  vectors can be sized and resized
  resizing bigger changes size and capacity

===============================================================================
test/test_math.cpp:24:
TEST CASE:  floating point comparisons

test/test_math.cpp:27: WARNING: WARN( x == Approx(1.0) ) is NOT correct!
  values: WARN( 1.0001 == Approx( 1.0 ) )

===============================================================================
test/test_math.cpp:40:
TEST CASE:  factorials are computed

test/test_math.cpp:43: ERROR: CHECK( factorial(2) == 3 ) is NOT correct!
  values: CHECK( 2 == 3 )

===============================================================================
[doctest] test cases: 3 | 1 passed | 2 failed | 0 skipped
[doctest] assertions: 6 | 4 passed | 2 failed |
[doctest] Status: FAILURE!
"#;

fn replay_str(log: &str) -> doctest_report::TestSuite {
    DoctestRunner::new(RunConfig::new("unused"))
        .replay(Cursor::new(log))
        .expect("log parses cleanly")
}

#[test]
fn replay_reconstructs_all_cases() {
    let suite = replay_str(CAPTURED_LOG);

    assert_eq!(suite.cases.len(), 3);
    assert_eq!(suite.passed_count(), 1);
    assert_eq!(suite.warned_count(), 1);
    assert_eq!(suite.failed_count(), 1);
    assert!(!suite.all_passed());

    let passed = &suite.cases[0];
    assert_eq!(
        passed.name,
        "vectors can be sized and resized -> resizing bigger changes size and capacity"
    );
    assert_eq!(passed.status, TestStatus::Passed);
    assert!(passed.message.is_none());
    let source = passed.source.as_ref().unwrap();
    assert_eq!(source.file, "test/test_vector.cpp");
    assert_eq!(source.line, 10);

    let warned = &suite.cases[1];
    assert_eq!(warned.name, "floating point comparisons");
    assert_eq!(warned.status, TestStatus::Warned);
    assert_eq!(
        warned.message.as_deref(),
        Some("WARN( x == Approx(1.0) ) is NOT correct!")
    );

    let failed = &suite.cases[2];
    assert_eq!(failed.status, TestStatus::Failed);
    assert_eq!(
        failed.message.as_deref(),
        Some("CHECK( factorial(2) == 3 ) is NOT correct!")
    );
}

#[test]
fn replay_preserves_raw_block_output() {
    let suite = replay_str(CAPTURED_LOG);

    // the failing block's stdout is the verbatim span between dividers
    let failed = &suite.cases[2];
    assert!(failed.stdout.starts_with("test/test_math.cpp:40:\n"));
    assert!(failed.stdout.contains("  values: CHECK( 2 == 3 )\n"));
    assert!(!failed.stdout.contains("==="));
    assert!(!failed.stdout.contains("[doctest]"));
}

#[test]
fn replay_from_log_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CAPTURED_LOG.as_bytes()).unwrap();

    let reader = BufReader::new(file.reopen().unwrap());
    let suite = DoctestRunner::new(RunConfig::new(file.path()))
        .replay(reader)
        .unwrap();
    assert_eq!(suite.cases.len(), 3);
}

#[test]
fn replay_applies_name_filter() {
    let mut config = RunConfig::new("unused");
    config.filter = Some(regex::Regex::new("factorials").unwrap());
    let suite = DoctestRunner::new(config)
        .replay(Cursor::new(CAPTURED_LOG))
        .unwrap();
    assert_eq!(suite.cases.len(), 1);
    assert_eq!(suite.cases[0].name, "factorials are computed");
}

#[test]
fn replay_rejects_malformed_source_line() {
    let log = "===\nthis is not a source location\n";
    let err = DoctestRunner::new(RunConfig::new("unused"))
        .replay(Cursor::new(log))
        .unwrap_err();
    // the diagnostic names the offending raw line
    assert!(err.to_string().contains("this is not a source location"));
}
