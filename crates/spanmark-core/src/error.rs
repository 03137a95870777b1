//! Error types for spanmark

use crate::diagnostic::Severity;
use thiserror::Error;

/// Main error type for spanmark operations
#[derive(Error, Debug)]
pub enum SpanmarkError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parse aborted by the non-progress guard
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias for spanmark operations
pub type Result<T> = std::result::Result<T, SpanmarkError>;

/// A problem recorded by the parse driver.
///
/// These never abort a parse on their own; they are collected into the
/// diagnostics list alongside the partial tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No registered consumer claimed the token; it was skipped.
    #[error("unrecognized token {text:?}")]
    UnrecognizedToken { text: String },

    /// An iteration finished without shrinking the token queue.
    #[error("stuck at token {text:?}")]
    Stuck { text: String },
}

impl ParseError {
    /// How the driver reacted to this error.
    pub fn severity(&self) -> Severity {
        match self {
            ParseError::UnrecognizedToken { .. } => Severity::Recoverable,
            ParseError::Stuck { .. } => Severity::Fatal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_messages() {
        let err = ParseError::UnrecognizedToken { text: "%".into() };
        assert_eq!(err.to_string(), "unrecognized token \"%\"");

        let err = ParseError::Stuck { text: "abc".into() };
        assert_eq!(err.to_string(), "stuck at token \"abc\"");
    }

    #[test]
    fn test_parse_error_severity() {
        let err = ParseError::UnrecognizedToken { text: "x".into() };
        assert_eq!(err.severity(), Severity::Recoverable);

        let err = ParseError::Stuck { text: "x".into() };
        assert_eq!(err.severity(), Severity::Fatal);
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.md");
        let err: SpanmarkError = io.into();
        assert!(err.to_string().starts_with("IO error:"));
    }
}
