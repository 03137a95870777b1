//! Markdown as a language for the parse driver.

use log::trace;
use spanmark_core::Token;
use spanmark_engine::{Consumer, ConsumerRegistry, Language, ParseContext};

use crate::ast::{Node, NodeKind};
use crate::cursor::Cursor;
use crate::inline::{InlineOptions, InlineParser, DEFAULT_STOP};
use crate::tokenizer::{tokenize, MdTokenKind};

/// Hands a line's worth of tokens to the inline parser.
pub struct InlineConsumer {
    parser: InlineParser,
}

impl InlineConsumer {
    pub fn new(options: InlineOptions) -> Self {
        Self {
            parser: InlineParser::new(options),
        }
    }
}

impl Consumer<MdTokenKind, Node> for InlineConsumer {
    fn name(&self) -> &str {
        "inline"
    }

    fn consume(&self, ctx: &mut ParseContext<'_, MdTokenKind, Node>, _token: &Token<MdTokenKind>) -> bool {
        let (nodes, consumed) = {
            let mut cursor = Cursor::new(ctx.remaining_tokens());
            let nodes = self.parser.parse_inline(&mut cursor, DEFAULT_STOP);
            (nodes, cursor.position())
        };
        if consumed == 0 {
            return false;
        }

        trace!("inline run of {} tokens gave {} nodes", consumed, nodes.len());
        ctx.advance(consumed);
        for node in nodes {
            ctx.append(node);
        }
        true
    }
}

/// Turns a newline between inline runs into a [`NodeKind::SoftBreak`].
pub struct LineBreakConsumer;

impl Consumer<MdTokenKind, Node> for LineBreakConsumer {
    fn name(&self) -> &str {
        "line-break"
    }

    fn consume(&self, ctx: &mut ParseContext<'_, MdTokenKind, Node>, token: &Token<MdTokenKind>) -> bool {
        if token.kind != MdTokenKind::Newline {
            return false;
        }
        ctx.advance(1);
        ctx.append(Node::new(NodeKind::SoftBreak, token.span));
        true
    }
}

/// Markdown inline syntax: the markdown tokenizer plus
/// `[InlineConsumer, LineBreakConsumer]`.
pub struct MarkdownLanguage {
    consumers: ConsumerRegistry<MdTokenKind, Node>,
}

impl MarkdownLanguage {
    pub fn new(options: InlineOptions) -> Self {
        let consumers = ConsumerRegistry::new()
            .with(Box::new(InlineConsumer::new(options)))
            .with(Box::new(LineBreakConsumer));
        Self { consumers }
    }
}

impl Default for MarkdownLanguage {
    fn default() -> Self {
        Self::new(InlineOptions::default())
    }
}

impl Language for MarkdownLanguage {
    type Kind = MdTokenKind;
    type Node = Node;

    fn name(&self) -> &str {
        "markdown"
    }

    fn tokenize(&self, input: &str) -> Vec<Token<MdTokenKind>> {
        tokenize(input)
    }

    fn consumers(&self) -> &ConsumerRegistry<MdTokenKind, Node> {
        &self.consumers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spanmark_engine::parse;
    use std::collections::VecDeque;

    #[test]
    fn test_consumer_order() {
        let language = MarkdownLanguage::default();
        assert_eq!(language.consumers().consumer_names(), vec!["inline", "line-break"]);
        assert_eq!(language.name(), "markdown");
    }

    #[test]
    fn test_inline_consumer_refuses_newline() {
        let tokens = tokenize("\na");
        let newline = tokens[0].clone();
        let mut root = Node::document();
        let mut ctx = ParseContext::new(VecDeque::from(tokens), &mut root);

        assert!(!InlineConsumer::new(InlineOptions::default()).consume(&mut ctx, &newline));
        assert_eq!(ctx.remaining(), 3);
        assert!(LineBreakConsumer.consume(&mut ctx, &newline));
        assert_eq!(ctx.remaining(), 2);
        drop(ctx);
        assert_eq!(root.children[0].kind, NodeKind::SoftBreak);
    }

    #[test]
    fn test_parse_lines() {
        let language = MarkdownLanguage::default();
        let parsed = parse("*a*\nb [c](d)", Node::document(), &language);

        assert!(parsed.is_clean());
        assert_eq!(
            parsed.root.dump(),
            "Document\n  Emphasis\n    Text \"a\"\n  SoftBreak\n  Text \"b \"\n  Link url=\"d\" title=\"\"\n    Text \"c\"\n"
        );
    }

    #[test]
    fn test_blank_lines() {
        let language = MarkdownLanguage::default();
        let parsed = parse("\n\n", Node::document(), &language);
        assert!(parsed.is_clean());
        assert_eq!(parsed.root.children.len(), 2);
    }
}
