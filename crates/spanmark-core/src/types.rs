//! Core types for spanmark

use serde::{Deserialize, Serialize};

/// Represents a position in the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number in characters (0-indexed)
    pub column: usize,
    /// Byte offset from start
    pub offset: usize,
}

impl Position {
    /// Create a new position
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Move past `text`, tracking line breaks.
    pub fn advanced_by(mut self, text: &str) -> Self {
        for ch in text.chars() {
            self.offset += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
        self
    }
}

/// Displays as 1-based `line:column`, the way editors report locations.
impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Represents a span in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start position
    pub start: Position,
    /// End position (exclusive)
    pub end: Position,
}

impl Span {
    /// Create a new span from start and end positions
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// An empty span at a single position
    pub fn point(at: Position) -> Self {
        Self { start: at, end: at }
    }

    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Whether the span covers no input
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
