//! Spanmark Markdown
//!
//! Markdown inline (span-level) syntax on top of the spanmark engine.
//!
//! # Overview
//!
//! The input is tokenized up front. The driver then offers tokens to two
//! consumers: one hands each line of tokens to the recursive
//! [`InlineParser`], the other turns newlines into soft breaks. Malformed
//! constructs never produce errors; they come out as literal text.
//!
//! # Example
//!
//! ```
//! use spanmark_markdown::{parse_markdown, InlineOptions};
//!
//! let parsed = parse_markdown("Some *emphasis* and a [link](https://example.com)", InlineOptions::default());
//! assert!(parsed.is_clean());
//! println!("{}", parsed.root.dump());
//! ```

pub mod ast;
pub mod cursor;
pub mod entities;
pub mod inline;
pub mod language;
pub mod links;
pub mod render;
pub mod tokenizer;

pub use ast::{Node, NodeKind};
pub use cursor::Cursor;
pub use entities::{decode_entity, decode_html_entities};
pub use inline::{InlineOptions, InlineParser, DEFAULT_STOP};
pub use language::{InlineConsumer, LineBreakConsumer, MarkdownLanguage};
pub use render::{dump, plain_text, to_markdown};
pub use tokenizer::{tokenize, MdTokenKind, Tokenizer};

use spanmark_engine::Parsed;

/// Parse a whole Markdown string into a `Document` node.
pub fn parse_markdown(input: &str, options: InlineOptions) -> Parsed<Node> {
    spanmark_engine::parse(input, Node::document(), &MarkdownLanguage::new(options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(input: &str) -> String {
        parse_markdown(input, InlineOptions::default()).root.dump()
    }

    #[test]
    fn test_empty_document() {
        let parsed = parse_markdown("", InlineOptions::default());
        assert!(parsed.is_clean());
        assert_eq!(parsed.root.dump(), "Document\n");
    }

    #[test]
    fn test_emphasis_does_not_cross_lines() {
        insta::assert_snapshot!(document("*a\nb*"), @r#"
        Document
          Text "*a"
          SoftBreak
          Text "b*"
        "#);
    }

    #[test]
    fn test_mixed_line() {
        insta::assert_snapshot!(document("Hi **there**, see [^1] and `code`!"), @r#"
        Document
          Text "Hi "
          Strong
            Text "there"
          Text ", see "
          Footnote identifier="1"
          Text " and "
          InlineCode "code"
          Text "!"
        "#);
    }

    #[test]
    fn test_plain_text_of_document() {
        let parsed = parse_markdown("*a* &amp; b\n~~c~~", InlineOptions::default());
        assert_eq!(parsed.root.plain_text(), "a & b\nc");
    }
}
