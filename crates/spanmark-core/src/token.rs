//! Tokens produced by a language's tokenizer.
//!
//! A token is an immutable value: once the tokenizer has run, the driver only
//! ever removes tokens from the front of the queue.

use crate::types::Span;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// The closed set of token kinds for one source language.
pub trait TokenKind: Copy + Eq + Debug {
    /// Whether this kind is the designated end-of-input marker.
    fn is_eof(self) -> bool;
}

/// A lexical unit: kind, raw source text and source range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token<K> {
    /// Kind discriminator
    pub kind: K,
    /// Raw source text
    pub text: String,
    /// Where the text came from
    pub span: Span,
}

impl<K: TokenKind> Token<K> {
    /// Create a new token.
    pub fn new(kind: K, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Whether this is the end-of-input marker.
    pub fn is_eof(&self) -> bool {
        self.kind.is_eof()
    }
}
