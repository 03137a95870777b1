//! Mutable state threaded through one parse.
//!
//! A [`ParseContext`] lives exactly as long as one call to the driver. It
//! owns the remaining token queue and the diagnostics, and borrows the node
//! currently accumulating children.

use std::collections::VecDeque;

use spanmark_core::{Diagnostic, ParseError, Span, Token, TokenKind, TreeNode};

/// Remaining tokens, the node under construction, and diagnostics so far.
pub struct ParseContext<'a, K, N> {
    tokens: VecDeque<Token<K>>,
    node: &'a mut N,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, K: TokenKind, N: TreeNode> ParseContext<'a, K, N> {
    /// Create a context over a token queue and a node to populate.
    pub fn new(tokens: VecDeque<Token<K>>, node: &'a mut N) -> Self {
        Self {
            tokens,
            node,
            diagnostics: Vec::new(),
        }
    }

    /// The token at the front of the queue.
    pub fn front(&self) -> Option<&Token<K>> {
        self.tokens.front()
    }

    /// Look ahead `n` tokens past the front.
    pub fn nth(&self, n: usize) -> Option<&Token<K>> {
        self.tokens.get(n)
    }

    /// Number of tokens left, including the end-of-input marker.
    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }

    /// The remaining tokens as one slice.
    ///
    /// Consumers that hand a run of tokens to an index-based sub-parser use
    /// this, then [`advance`](Self::advance) by however many it used.
    pub fn remaining_tokens(&mut self) -> &[Token<K>] {
        self.tokens.make_contiguous()
    }

    /// Remove and return the front token.
    pub fn pop_front(&mut self) -> Option<Token<K>> {
        self.tokens.pop_front()
    }

    /// Drop `n` tokens from the front of the queue.
    pub fn advance(&mut self, n: usize) {
        let n = n.min(self.tokens.len());
        self.tokens.drain(..n);
    }

    /// The node currently accumulating children.
    pub fn node(&self) -> &N {
        self.node
    }

    /// Mutable access to the node currently accumulating children.
    pub fn node_mut(&mut self) -> &mut N {
        self.node
    }

    /// Append a child to the current node.
    pub fn append(&mut self, child: N) {
        self.node.append(child);
    }

    /// Record a diagnostic.
    pub fn record(&mut self, error: ParseError, span: Span) {
        self.diagnostics.push(Diagnostic::new(error, span));
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Finish with the context, keeping only its diagnostics.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{tokenize, Kind, Tree};

    #[test]
    fn test_context_queue_operations() {
        let mut root = Tree::default();
        let mut ctx = ParseContext::new(VecDeque::from(tokenize("ab cd")), &mut root);

        // word, space, word, end
        assert_eq!(ctx.remaining(), 4);
        assert_eq!(ctx.front().map(|t| t.kind), Some(Kind::Word));
        assert_eq!(ctx.nth(1).map(|t| t.kind), Some(Kind::Space));

        ctx.advance(2);
        assert_eq!(ctx.front().map(|t| t.text.as_str()), Some("cd"));
        assert_eq!(ctx.remaining_tokens().len(), 2);

        let popped = ctx.pop_front().unwrap();
        assert_eq!(popped.text, "cd");
        assert!(ctx.front().unwrap().is_eof());
    }

    #[test]
    fn test_advance_past_end_is_clamped() {
        let mut root = Tree::default();
        let mut ctx = ParseContext::new(VecDeque::from(tokenize("a")), &mut root);
        ctx.advance(10);
        assert_eq!(ctx.remaining(), 0);
        assert!(ctx.front().is_none());
    }

    #[test]
    fn test_append_and_record() {
        let mut root = Tree::default();
        let mut ctx = ParseContext::new(VecDeque::from(tokenize("a")), &mut root);

        ctx.append(Tree::leaf("child"));
        assert_eq!(ctx.node().child_count(), 1);
        ctx.node_mut().label = "root".into();

        ctx.record(ParseError::UnrecognizedToken { text: "a".into() }, Span::default());
        assert_eq!(ctx.diagnostics().len(), 1);

        let diagnostics = ctx.into_diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(root.label, "root");
        assert_eq!(root.children[0].label, "child");
    }
}
