//! Diagnostics collected during a parse.

use crate::error::ParseError;
use crate::types::Span;

/// How serious a diagnostic is.
///
/// There are only two levels: a skipped token, and the non-progress guard
/// that stops the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// The token was skipped and parsing continued
    Recoverable,
    /// Parsing stopped early
    Fatal,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Recoverable => write!(f, "recoverable"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// An error message plus the source range it refers to.
///
/// Diagnostics are append-only and never drive control flow inside the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What went wrong
    pub error: ParseError,
    /// Source range of the offending token
    pub span: Span,
}

impl Diagnostic {
    /// Create a diagnostic for `error` at `span`.
    pub fn new(error: ParseError, span: Span) -> Self {
        Self { error, span }
    }

    /// Human readable message.
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn severity(&self) -> Severity {
        self.error.severity()
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.span.start, self.error)
    }
}
