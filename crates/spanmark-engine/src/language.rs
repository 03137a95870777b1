//! Language bundles: a tokenizer plus the consumers that understand its tokens.

use spanmark_core::{Token, TokenKind, TreeNode};

use crate::ConsumerRegistry;

/// Everything the driver needs to parse one source language.
///
/// A language carries no parse state of its own, so one value can drive any
/// number of parses.
pub trait Language {
    /// Token kind produced by the tokenizer.
    type Kind: TokenKind;
    /// Tree node type the consumers build.
    type Node: TreeNode;

    /// Language name, used in logs.
    fn name(&self) -> &str;

    /// Turn source text into tokens, ending with the end-of-input marker.
    fn tokenize(&self, input: &str) -> Vec<Token<Self::Kind>>;

    /// Consumers in dispatch order.
    fn consumers(&self) -> &ConsumerRegistry<Self::Kind, Self::Node>;
}

type Tokenizer<K> = Box<dyn Fn(&str) -> Vec<Token<K>> + Send + Sync>;

/// A [`Language`] assembled at runtime from a tokenizer function and a registry.
pub struct LanguageBundle<K, N> {
    name: String,
    tokenizer: Tokenizer<K>,
    consumers: ConsumerRegistry<K, N>,
}

impl<K: TokenKind, N: TreeNode> LanguageBundle<K, N> {
    pub fn new(
        name: impl Into<String>,
        tokenizer: impl Fn(&str) -> Vec<Token<K>> + Send + Sync + 'static,
        consumers: ConsumerRegistry<K, N>,
    ) -> Self {
        Self {
            name: name.into(),
            tokenizer: Box::new(tokenizer),
            consumers,
        }
    }
}

impl<K: TokenKind, N: TreeNode> Language for LanguageBundle<K, N> {
    type Kind = K;
    type Node = N;

    fn name(&self) -> &str {
        &self.name
    }

    fn tokenize(&self, input: &str) -> Vec<Token<K>> {
        (self.tokenizer)(input)
    }

    fn consumers(&self) -> &ConsumerRegistry<K, N> {
        &self.consumers
    }
}
