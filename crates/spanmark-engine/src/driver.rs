//! The parse driver.
//!
//! Tokenize once, then loop: stop at end of input, otherwise offer the front
//! token to each consumer in order. A token nobody claims becomes a
//! recoverable diagnostic and is skipped. An iteration that starts with as
//! many tokens as the previous one aborts the parse with a fatal diagnostic.

use std::collections::VecDeque;

use log::{debug, warn};
use spanmark_core::{Diagnostic, ParseError, TreeNode};

use crate::{ConsumerRegistry, Language, ParseContext};

/// Result of one parse: the populated root and everything that went wrong.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<N> {
    pub root: N,
    pub diagnostics: Vec<Diagnostic>,
}

impl<N> Parsed<N> {
    /// Whether the parse produced no diagnostics at all.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Whether the parse was aborted by the non-progress guard.
    pub fn is_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    pub fn into_parts(self) -> (N, Vec<Diagnostic>) {
        (self.root, self.diagnostics)
    }
}

/// Parse `input` with `language`, appending everything to `root`.
///
/// Never fails: malformed input is reported through
/// [`Parsed::diagnostics`], and the tree holds whatever was recognized.
pub fn parse<L: Language>(input: &str, root: L::Node, language: &L) -> Parsed<L::Node> {
    let tokens = language.tokenize(input);
    debug!(
        "{}: parsing {} bytes as {} tokens",
        language.name(),
        input.len(),
        tokens.len()
    );

    let mut root = root;
    let diagnostics = {
        let mut ctx = ParseContext::new(VecDeque::from(tokens), &mut root);
        drive(&mut ctx, language.consumers());
        ctx.into_diagnostics()
    };

    debug!(
        "{}: finished with {} children, {} diagnostics",
        language.name(),
        root.child_count(),
        diagnostics.len()
    );

    Parsed { root, diagnostics }
}

fn drive<K, N>(ctx: &mut ParseContext<'_, K, N>, consumers: &ConsumerRegistry<K, N>)
where
    K: spanmark_core::TokenKind,
    N: TreeNode,
{
    let mut previous_len = None;

    loop {
        let token = match ctx.front() {
            Some(token) if !token.is_eof() => token.clone(),
            _ => break,
        };

        let len = ctx.remaining();
        if previous_len == Some(len) {
            warn!("no progress at {} on {:?}, aborting", token.span.start, token.text);
            ctx.record(ParseError::Stuck { text: token.text }, token.span);
            break;
        }
        previous_len = Some(len);

        if consumers.offer(ctx, &token).is_none() {
            warn!("unrecognized token {:?} at {}", token.text, token.span.start);
            ctx.record(
                ParseError::UnrecognizedToken {
                    text: token.text.clone(),
                },
                token.span,
            );
            ctx.pop_front();
        }
    }
}
