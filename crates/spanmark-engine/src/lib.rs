//! Spanmark Engine
//!
//! This crate provides the generic parse driver. A language is an opaque
//! bundle of a tokenizer and an ordered list of consumers; the driver
//! tokenizes the input once, then repeatedly offers the front token to the
//! consumers until one claims it.
//!
//! # Consumer Behavior
//!
//! - If a consumer returns `false`, it is not interested in the token and
//!   must leave the context exactly as it found it
//! - If a consumer returns `true`, it has removed at least one token from the
//!   front of the queue and may have appended nodes to the current node
//! - Consumers are tried in priority order, then registration order; the first
//!   one that claims the token wins
//! - A token nobody claims is recorded as a diagnostic and skipped
//!
//! # Example
//!
//! ```
//! use spanmark_core::{Token, TokenKind, TreeNode};
//! use spanmark_engine::{Consumer, ParseContext};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! enum Kind { Word, End }
//!
//! impl TokenKind for Kind {
//!     fn is_eof(self) -> bool { self == Kind::End }
//! }
//!
//! struct Words(Vec<Words>);
//!
//! impl TreeNode for Words {
//!     fn append(&mut self, child: Self) { self.0.push(child) }
//!     fn children(&self) -> &[Self] { &self.0 }
//! }
//!
//! struct WordConsumer;
//!
//! impl Consumer<Kind, Words> for WordConsumer {
//!     fn name(&self) -> &str { "word" }
//!
//!     fn consume(&self, ctx: &mut ParseContext<'_, Kind, Words>, token: &Token<Kind>) -> bool {
//!         if token.kind != Kind::Word {
//!             return false;
//!         }
//!         ctx.advance(1);
//!         ctx.append(Words(vec![]));
//!         true
//!     }
//! }
//! ```

pub mod context;
pub mod driver;
pub mod language;

#[cfg(test)]
mod testing;

pub use context::ParseContext;
pub use driver::{parse, Parsed};
pub use language::{Language, LanguageBundle};

use log::trace;
use spanmark_core::{Token, TokenKind, TreeNode};

/// A pluggable unit of grammar that may claim the next token.
///
/// Implementations must be atomic: returning `false` means the context,
/// both token queue and node tree, is identical to what it was on entry.
pub trait Consumer<K: TokenKind, N: TreeNode>: Send + Sync {
    /// Consumer name for identification and logging.
    fn name(&self) -> &str;

    /// Try to consume `token`, which is the current front of the queue.
    ///
    /// # Returns
    /// - `false`: Not interested, context untouched
    /// - `true`: Token claimed, context advanced
    fn consume(&self, ctx: &mut ParseContext<'_, K, N>, token: &Token<K>) -> bool;

    /// Consumer priority (lower = tried first).
    ///
    /// Default is 0. Consumers with equal priority keep registration order.
    fn priority(&self) -> i32 {
        0
    }
}

/// Ordered registry of consumers for one language.
///
/// The registry handles:
/// - Consumer registration with stable priority sorting
/// - First-match-wins dispatch of a token
pub struct ConsumerRegistry<K, N> {
    /// Registered consumers (sorted by priority, then registration order)
    consumers: Vec<Box<dyn Consumer<K, N>>>,
}

impl<K, N> Default for ConsumerRegistry<K, N> {
    fn default() -> Self {
        Self {
            consumers: Vec::new(),
        }
    }
}

impl<K: TokenKind, N: TreeNode> ConsumerRegistry<K, N> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a consumer.
    ///
    /// Consumers are re-sorted by priority after registration. The sort is
    /// stable, so equal priorities keep the order they were registered in.
    pub fn register(&mut self, consumer: Box<dyn Consumer<K, N>>) {
        self.consumers.push(consumer);
        self.consumers.sort_by_key(|c| c.priority());
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, consumer: Box<dyn Consumer<K, N>>) -> Self {
        self.register(consumer);
        self
    }

    /// Get the number of registered consumers.
    pub fn consumer_count(&self) -> usize {
        self.consumers.len()
    }

    /// Get consumer names in dispatch order.
    pub fn consumer_names(&self) -> Vec<&str> {
        self.consumers.iter().map(|c| c.name()).collect()
    }

    /// Offer a token to the registered consumers.
    ///
    /// # Returns
    /// - `None`: No consumer claimed the token
    /// - `Some(name)`: Name of the consumer that claimed it
    pub fn offer(&self, ctx: &mut ParseContext<'_, K, N>, token: &Token<K>) -> Option<&str> {
        for consumer in &self.consumers {
            if consumer.consume(ctx, token) {
                trace!("{} claimed {:?} {:?}", consumer.name(), token.kind, token.text);
                return Some(consumer.name());
            }
        }
        None
    }
}
