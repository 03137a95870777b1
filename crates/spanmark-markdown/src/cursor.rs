//! Index-based cursor over a token slice.
//!
//! Nested inline parses share one cursor. Speculative sub-parsers save
//! [`Cursor::position`] on entry and [`Cursor::reset`] to it on failure.
//!
//! The cursor also carries what bracketed sub-parsers learn while it lives:
//! the positions where an attempt is known to fail, and how deeply attempts
//! are currently nested.

use std::collections::HashSet;

use spanmark_core::{Span, Token};

use crate::tokenizer::MdTokenKind;

#[derive(Debug, Clone)]
pub struct Cursor<'t> {
    tokens: &'t [Token<MdTokenKind>],
    position: usize,
    /// Start positions of bracketed attempts that failed
    failed: HashSet<usize>,
    /// Bracketed attempts currently in progress
    depth: usize,
    /// Set when an attempt went too deep; every enclosing attempt fails
    abandoned: bool,
}

impl<'t> Cursor<'t> {
    pub fn new(tokens: &'t [Token<MdTokenKind>]) -> Self {
        Self {
            tokens,
            position: 0,
            failed: HashSet::new(),
            depth: 0,
            abandoned: false,
        }
    }

    /// Index of the current token.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Move back (or forward) to a previously saved position.
    pub fn reset(&mut self, position: usize) {
        self.position = position.min(self.tokens.len());
    }

    pub fn peek(&self) -> Option<&'t Token<MdTokenKind>> {
        self.tokens.get(self.position)
    }

    pub fn peek_kind(&self) -> Option<MdTokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Whether the current token has kind `kind`.
    pub fn at(&self, kind: MdTokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Past the last token, or on the end-of-input marker.
    pub fn is_at_end(&self) -> bool {
        self.peek().map_or(true, |t| t.is_eof())
    }

    /// Return the current token and move past it.
    pub fn bump(&mut self) -> Option<&'t Token<MdTokenKind>> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Move past the current token if it has kind `kind`.
    pub fn eat(&mut self, kind: MdTokenKind) -> bool {
        if self.at(kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Move past a maximal run of `kind`, returning the tokens in it.
    pub fn bump_run(&mut self, kind: MdTokenKind) -> &'t [Token<MdTokenKind>] {
        let start = self.position;
        while self.at(kind) {
            self.position += 1;
        }
        &self.tokens[start..self.position]
    }

    /// Whether a bracketed attempt starting at `start` already failed.
    pub(crate) fn known_failure(&self, start: usize) -> bool {
        self.failed.contains(&start)
    }

    pub(crate) fn record_failure(&mut self, start: usize) {
        self.failed.insert(start);
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn descend(&mut self) {
        self.depth += 1;
    }

    /// Leave a bracketed attempt, returning whether the chain it belongs to
    /// was abandoned. The mark clears once no attempt is in progress.
    pub(crate) fn ascend(&mut self) -> bool {
        self.depth = self.depth.saturating_sub(1);
        let abandoned = self.abandoned;
        if self.depth == 0 {
            self.abandoned = false;
        }
        abandoned
    }

    /// Give up on every bracketed attempt in progress.
    pub(crate) fn abandon(&mut self) {
        self.abandoned = true;
    }

    pub(crate) fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    /// Source range from the token at `start` to the last consumed token.
    pub fn span_since(&self, start: usize) -> Span {
        match (self.tokens.get(start), self.tokens.get(self.position.wrapping_sub(1))) {
            (Some(first), Some(last)) if self.position > start => {
                Span::new(first.span.start, last.span.end)
            }
            (Some(first), _) => Span::point(first.span.start),
            _ => Span::default(),
        }
    }
}
