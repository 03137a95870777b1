//! Integration tests for spanmark.
//!
//! These tests run whole documents through the driver, the Markdown
//! language and the configuration layer together.

use spanmark_config::Config;
use spanmark_core::{Severity, Token};
use spanmark_engine::{parse, Consumer, ConsumerRegistry, LanguageBundle, ParseContext};
use spanmark_markdown::{
    parse_markdown, tokenize, InlineOptions, LineBreakConsumer, MarkdownLanguage, MdTokenKind,
    Node, NodeKind,
};

/// Helper to parse with every construct enabled and dump the tree.
fn tree(input: &str) -> String {
    let parsed = parse_markdown(input, InlineOptions::default());
    assert!(parsed.is_clean(), "unexpected diagnostics: {:?}", parsed.diagnostics);
    parsed.root.dump()
}

/// Claims every token without moving past it.
struct Greedy;

impl Consumer<MdTokenKind, Node> for Greedy {
    fn name(&self) -> &str {
        "greedy"
    }

    fn consume(&self, _ctx: &mut ParseContext<'_, MdTokenKind, Node>, _token: &Token<MdTokenKind>) -> bool {
        true
    }
}

/// Claims only plain text tokens.
struct TextOnly;

impl Consumer<MdTokenKind, Node> for TextOnly {
    fn name(&self) -> &str {
        "text-only"
    }

    fn consume(&self, ctx: &mut ParseContext<'_, MdTokenKind, Node>, token: &Token<MdTokenKind>) -> bool {
        if token.kind != MdTokenKind::Text {
            return false;
        }
        ctx.advance(1);
        ctx.append(Node::text(token.text.clone(), token.span));
        true
    }
}

// =============================================================================
// Markdown Documents
// =============================================================================

#[test]
fn test_document_of_several_lines() {
    let input = "# not a heading *here*\n\
                 see [docs](https://example.com \"Docs\") or [^2]\n\
                 ~~old~~ `new`";
    assert_eq!(
        tree(input),
        "Document\n\
         \x20 Text \"# not a heading \"\n\
         \x20 Emphasis\n\
         \x20   Text \"here\"\n\
         \x20 SoftBreak\n\
         \x20 Text \"see \"\n\
         \x20 Link url=\"https://example.com\" title=\"Docs\"\n\
         \x20   Text \"docs\"\n\
         \x20 Text \" or \"\n\
         \x20 Footnote identifier=\"2\"\n\
         \x20 SoftBreak\n\
         \x20 Strike\n\
         \x20   Text \"old\"\n\
         \x20 Text \" \"\n\
         \x20 InlineCode \"new\"\n"
    );
}

#[test]
fn test_crlf_line_endings() {
    assert_eq!(
        tree("a\r\nb"),
        "Document\n  Text \"a\"\n  SoftBreak\n  Text \"b\"\n"
    );
}

#[test]
fn test_unclosed_constructs_are_literal() {
    assert_eq!(
        tree("**a [b](c ![d"),
        "Document\n  Text \"**a [b](c ![d\"\n"
    );
}

#[test]
fn test_reference_and_citation() {
    assert_eq!(
        tree("[text][ref] [@doe2020]"),
        "Document\n\
         \x20 Reference identifier=\"ref\" url=\"\" title=\"\"\n\
         \x20   Text \"text\"\n\
         \x20 Text \" \"\n\
         \x20 CitationReference identifier=\"doe2020\"\n"
    );
}

#[test]
fn test_image_alt_text() {
    let parsed = parse_markdown("![a *cat*](cat.png \"Cat\")", InlineOptions::default());
    let image = &parsed.root.children[0];
    assert_eq!(
        image.kind,
        NodeKind::Image {
            url: "cat.png".to_string(),
            alt: "a cat".to_string(),
            title: "Cat".to_string(),
        }
    );
    assert!(image.children.is_empty());
}

#[test]
fn test_many_lines_of_unclosed_brackets() {
    let input = "[a\n".repeat(200);
    let parsed = parse_markdown(&input, InlineOptions::default());

    assert!(parsed.is_clean());
    assert_eq!(parsed.root.text_content(), "[a".repeat(200));
    assert_eq!(parsed.root.children.len(), 400);
    for pair in parsed.root.children.chunks(2) {
        assert_eq!(pair[0].kind, NodeKind::Text("[a".to_string()));
        assert_eq!(pair[1].kind, NodeKind::SoftBreak);
    }
}

#[test]
fn test_deeply_nested_brackets_stay_literal() {
    let input = format!("{}a{}", "[".repeat(5_000), "]".repeat(5_000));
    let parsed = parse_markdown(&input, InlineOptions::default());

    assert!(parsed.is_clean());
    assert_eq!(parsed.root.text_content(), input);
}

#[test]
fn test_markdown_round_trip() {
    let input = "Some *em* and __strong__ with `code` and [a link](u).";
    let first = parse_markdown(input, InlineOptions::default()).root;
    let again = parse_markdown(&first.to_markdown(), InlineOptions::default()).root;
    assert_eq!(first.dump(), again.dump());
}

// =============================================================================
// Driver Recovery
// =============================================================================

#[test]
fn test_unclaimed_tokens_are_recorded_and_skipped() {
    let language = LanguageBundle::new(
        "text-only",
        tokenize,
        ConsumerRegistry::<MdTokenKind, Node>::new().with(Box::new(TextOnly)),
    );
    let parsed = parse("a *b*", Node::document(), &language);

    assert_eq!(parsed.root.text_content(), "a b");
    assert_eq!(parsed.diagnostics.len(), 2);
    assert!(parsed
        .diagnostics
        .iter()
        .all(|d| d.severity() == Severity::Recoverable));
    assert_eq!(parsed.diagnostics[0].to_string(), "1:3: unrecognized token \"*\"");
    assert!(!parsed.is_fatal());
}

#[test]
fn test_stuck_consumer_is_fatal() {
    let language = LanguageBundle::new(
        "greedy",
        tokenize,
        ConsumerRegistry::<MdTokenKind, Node>::new().with(Box::new(Greedy)),
    );
    let parsed = parse("a b", Node::document(), &language);

    assert!(parsed.is_fatal());
    assert_eq!(parsed.diagnostics.len(), 1);
    assert_eq!(parsed.diagnostics[0].message(), "stuck at token \"a b\"");
    assert!(parsed.root.children.is_empty());
}

#[test]
fn test_line_breaks_only() {
    let language = LanguageBundle::new(
        "breaks",
        tokenize,
        ConsumerRegistry::<MdTokenKind, Node>::new().with(Box::new(LineBreakConsumer)),
    );
    let parsed = parse("a\nb", Node::document(), &language);

    assert_eq!(parsed.root.children.len(), 1);
    assert_eq!(parsed.root.children[0].kind, NodeKind::SoftBreak);
    assert_eq!(parsed.diagnostics.len(), 2);
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_disables_constructs() {
    let mut config = Config::default();
    config
        .apply_override("[features]\nLinks = false\nStrikethrough = false")
        .unwrap();

    let language = MarkdownLanguage::new(config.features.inline_options());
    let parsed = parse("[a](b) ~~c~~", Node::document(), &language);
    assert_eq!(parsed.root.dump(), "Document\n  Text \"[a](b) ~~c~~\"\n");
}

#[test]
fn test_default_config_enables_everything() {
    let config = Config::default();
    assert_eq!(config.features.inline_options(), InlineOptions::default());
}
