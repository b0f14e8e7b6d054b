//! Parse errors

use std::fmt;

/// The kind of parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The first non-blank line of a block does not end with a colon
    MalformedSourceLine,
    /// The segment expected to be a line number is not numeric
    UnparsableLineNumber,
}

/// A parse error carrying the offending raw line.
///
/// Both kinds are fatal input-contract violations: they mean the stream
/// does not look like output from a supported doctest version, so the
/// caller decides whether to abort the run or skip the block.
#[derive(Debug)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// The raw line that failed to parse, for diagnostics
    pub line: String,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: impl Into<String>) -> Self {
        Self {
            kind,
            line: line.into(),
        }
    }

    pub fn malformed_source(line: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::MalformedSourceLine, line)
    }

    pub fn unparsable_line_number(line: impl Into<String>) -> Self {
        Self::new(ParseErrorKind::UnparsableLineNumber, line)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseErrorKind::MalformedSourceLine => {
                write!(f, "malformed source line (missing trailing ':'): {:?}", self.line)
            }
            ParseErrorKind::UnparsableLineNumber => {
                write!(f, "unparsable line number in source line: {:?}", self.line)
            }
        }
    }
}

impl std::error::Error for ParseError {}
