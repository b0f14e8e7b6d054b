//! Doctest output parser
//!
//! Reconstructs structured test cases from doctest console output, one
//! line at a time. The format is block-oriented:
//!
//! ```text
//! ===============================================================================
//! test/test_main.cpp:42:
//! TEST CASE:  my test case
//!   nested subcase
//!
//! test/test_main.cpp:45: ERROR: CHECK( x == 1 ) is NOT correct!
//! ===============================================================================
//! ```
//!
//! Within a block: the first non-blank line is the source location
//! (`<file>:<line>:`), the following non-blank lines are the hierarchical
//! name (terminated by a blank line), and any later line may carry a
//! `": ERROR:"` / `": FATAL ERROR:"` / `": WARNING:"` marker. `===`
//! divider lines separate blocks; `[doctest]` framework lines are
//! suppressed entirely.
//!
//! The parser holds at most one in-progress case, so the caller never
//! needs to buffer the full stream. It is designed to be discarded and
//! replaced by a fresh instance after each emitted case.

use crate::error::ParseError;
use crate::result::{TestCase, TestCaseSource, TestStatus};

/// Marker tokens in priority order. Checked first to last; the first
/// token whose `": <TOKEN>:"` form appears in the line wins.
const STATUS_TOKENS: [(TestStatus, &str); 3] = [
    (TestStatus::Failed, "ERROR"),
    (TestStatus::Failed, "FATAL ERROR"),
    (TestStatus::Warned, "WARNING"),
];

/// An in-progress test case being accumulated line by line.
///
/// Sub-fields only progress forward: `source` and `name` are each set at
/// most once, `status` only escalates.
struct PendingCase {
    status: TestStatus,
    source: Option<TestCaseSource>,
    /// Finalized name. `Some("")` (zero name lines before the blank
    /// terminator) is a finalized empty name, distinct from unset.
    name: Option<String>,
    message: Option<String>,
    stdout: String,
    name_tokens: Vec<String>,
}

impl PendingCase {
    fn new() -> Self {
        Self {
            status: TestStatus::Passed,
            source: None,
            name: None,
            message: None,
            stdout: String::new(),
            name_tokens: Vec::new(),
        }
    }

    /// Snapshot into an immutable record. A name never finalized by a
    /// blank line (divider arrived first) becomes the empty string.
    fn finalize(self) -> TestCase {
        TestCase {
            name: self.name.unwrap_or_default(),
            status: self.status,
            source: self.source,
            message: self.message,
            stdout: self.stdout,
        }
    }

    /// Scan a body line for a status marker. The first matching token
    /// escalates the status and replaces the message.
    fn scan_markers(&mut self, line: &str) {
        for (status, token) in STATUS_TOKENS {
            let needle = format!(": {}:", token);
            let Some(index) = line.find(&needle) else {
                continue;
            };
            self.status = status;
            let message = line[index + needle.len()..].trim();
            self.message = if message.is_empty() {
                None
            } else {
                Some(message.to_string())
            };
            return;
        }
    }
}

/// Stateful parser for one doctest output stream.
///
/// Feed lines (with their trailing newline intact) to [`parse`]; a
/// completed [`TestCase`] is returned when a divider closes a block.
/// After an emission, replace the instance with a fresh parser.
///
/// [`parse`]: DoctestCaseParser::parse
pub struct DoctestCaseParser {
    pending: Option<PendingCase>,
}

impl DoctestCaseParser {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Consume one raw line of output.
    ///
    /// Returns `Ok(Some(case))` exactly when a divider line finalizes an
    /// in-progress block; `Ok(None)` otherwise. Errors are fatal
    /// input-contract violations (see [`ParseError`]).
    pub fn parse(&mut self, line: &str) -> Result<Option<TestCase>, ParseError> {
        let trimmed = line.trim();

        // Framework status/summary lines never contribute to a case,
        // even when they also match the divider shape.
        if trimmed.starts_with("[doctest]") {
            return Ok(None);
        }
        if is_divider(trimmed) {
            return Ok(self.on_divider());
        }

        let pending = self.pending.get_or_insert_with(PendingCase::new);
        pending.stdout.push_str(line);

        // First non-blank line of the block is the source location.
        if pending.source.is_none() && !trimmed.is_empty() {
            pending.source = Some(parse_source(trimmed)?);
            return Ok(None);
        }

        // Name lines accumulate until a blank line finalizes them.
        if pending.name.is_none() {
            if !trimmed.is_empty() {
                pending.name_tokens.push(trimmed.to_string());
            } else {
                pending.name = Some(assemble_name(&pending.name_tokens));
            }
            return Ok(None);
        }

        // Body line: look for failure/warning markers. Once failed,
        // later markers must not overwrite the message.
        if pending.status != TestStatus::Failed {
            pending.scan_markers(trimmed);
        }

        Ok(None)
    }

    /// Whether a case is currently being accumulated.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// A divider closes the current block. The divider line itself
    /// belongs to neither the finalized record nor the next one.
    fn on_divider(&mut self) -> Option<TestCase> {
        let pending = self.pending.take()?;
        Some(pending.finalize())
    }
}

impl Default for DoctestCaseParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Check whether a trimmed line is a block divider (`===...===`).
fn is_divider(trimmed: &str) -> bool {
    trimmed.starts_with("===") && trimmed.ends_with("===")
}

/// Parse a source location line of the form `<file>:<line>:`.
///
/// The file path may itself contain colons, so the line number is taken
/// from the last colon-delimited segment before the trailing colon.
fn parse_source(trimmed: &str) -> Result<TestCaseSource, ParseError> {
    let stripped = trimmed
        .strip_suffix(':')
        .ok_or_else(|| ParseError::malformed_source(trimmed))?;
    let (file, number) = stripped
        .rsplit_once(':')
        .ok_or_else(|| ParseError::malformed_source(trimmed))?;
    let line = number
        .parse::<u32>()
        .map_err(|_| ParseError::unparsable_line_number(trimmed))?;
    Ok(TestCaseSource::new(file, line))
}

/// Join accumulated name tokens into the hierarchical name.
///
/// A token of the form `TEST <label>:<rest>` contributes only `<rest>`;
/// tokens are trimmed and joined with ` -> `.
fn assemble_name(tokens: &[String]) -> String {
    tokens
        .iter()
        .map(|token| {
            let token = match token.find(':') {
                Some(index) if token.starts_with("TEST ") => &token[index + 1..],
                _ => token.as_str(),
            };
            token.trim()
        })
        .collect::<Vec<_>>()
        .join(" -> ")
}
