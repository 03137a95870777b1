//! Bracketed constructs: links, images, references, footnotes and citations.
//!
//! Every sub-parser here is speculative. It records the cursor position on
//! entry and, if any required token is missing, puts the cursor back there and
//! reports no match. The caller then emits only the triggering `[` or `!` as
//! text and carries on from the next token.

use log::trace;
use regex::Regex;
use std::sync::LazyLock;

use crate::ast::{flatten_text, Node, NodeKind};
use crate::cursor::Cursor;
use crate::inline::InlineParser;
use crate::tokenizer::MdTokenKind;

/// `url "title"` or `url 'title'` inside a link destination.
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(\S*)\s+(?:"([^"]*)"|'([^']*)')$"#).unwrap());

const CLOSE_BRACKET: &[MdTokenKind] = &[MdTokenKind::RightBracket];

/// Deepest nesting of bracketed attempts. Going past it abandons the whole
/// chain, leaving the outermost `[` or `!` as text.
const MAX_NESTING: usize = 64;

/// Run `attempt`; if it fails, rewind the cursor to where it started.
fn speculate<'t, T>(
    cursor: &mut Cursor<'t>,
    what: &str,
    attempt: impl FnOnce(&mut Cursor<'t>) -> Option<T>,
) -> Option<T> {
    let start = cursor.position();
    let result = attempt(cursor);
    if result.is_none() {
        trace!("{} did not match at token {}, backtracking", what, start);
        cursor.reset(start);
    }
    result
}

/// Run a bracketed attempt starting at the current `[` or `!`.
///
/// An attempt's outcome depends only on where it starts, so a failure is
/// remembered and later attempts at the same token fail at once. Failures
/// caused by abandoning a too-deep chain are not remembered.
fn bracketed<'t>(
    cursor: &mut Cursor<'t>,
    what: &str,
    attempt: impl FnOnce(&mut Cursor<'t>) -> Option<Node>,
) -> Option<Node> {
    let start = cursor.position();
    if cursor.known_failure(start) {
        return None;
    }
    if cursor.depth() >= MAX_NESTING {
        trace!("{} nested too deeply at token {}, abandoning", what, start);
        cursor.abandon();
        return None;
    }

    cursor.descend();
    let result = speculate(cursor, what, attempt);
    let abandoned = cursor.ascend();

    match result {
        Some(node) if !abandoned => Some(node),
        Some(_) => {
            cursor.reset(start);
            None
        }
        None => {
            if !abandoned {
                cursor.record_failure(start);
            }
            None
        }
    }
}

fn expect(cursor: &mut Cursor<'_>, kind: MdTokenKind) -> Option<()> {
    cursor.eat(kind).then_some(())
}

/// Concatenate raw token text up to, not including, the next `close` token.
///
/// Fails at a line break or the end of input.
fn raw_until(cursor: &mut Cursor<'_>, close: MdTokenKind) -> Option<String> {
    let mut raw = String::new();
    loop {
        let token = cursor.peek()?;
        if token.kind == close {
            return Some(raw);
        }
        if token.is_eof() || token.kind == MdTokenKind::Newline {
            return None;
        }
        raw.push_str(&token.text);
        cursor.bump();
    }
}

/// `(url)` or `(url "title")`.
fn destination(cursor: &mut Cursor<'_>) -> Option<(String, String)> {
    expect(cursor, MdTokenKind::LeftParen)?;
    let raw = raw_until(cursor, MdTokenKind::RightParen)?;
    expect(cursor, MdTokenKind::RightParen)?;
    split_destination(&raw)
}

/// Split the text between parentheses into URL and title.
pub fn split_destination(raw: &str) -> Option<(String, String)> {
    let raw = raw.trim();
    let (url, title) = match TITLE_RE.captures(raw) {
        Some(caps) => (
            caps.get(1).map_or("", |m| m.as_str()),
            caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str()),
        ),
        None => (raw, ""),
    };

    if url.chars().any(char::is_whitespace) {
        return None;
    }
    let url = url
        .strip_prefix('<')
        .and_then(|u| u.strip_suffix('>'))
        .unwrap_or(url);
    Some((url.to_string(), title.to_string()))
}

impl InlineParser {
    /// `![alt](url)`. The alt text is the flattened text of the alt content.
    pub(crate) fn try_image(&self, cursor: &mut Cursor<'_>) -> Option<Node> {
        if !self.options().images {
            return None;
        }
        bracketed(cursor, "image", |cursor| {
            let start = cursor.position();
            expect(cursor, MdTokenKind::Exclamation)?;
            expect(cursor, MdTokenKind::LeftBracket)?;
            let alt = self.parse_inline(cursor, CLOSE_BRACKET);
            expect(cursor, MdTokenKind::RightBracket)?;
            let (url, title) = destination(cursor)?;

            let image = NodeKind::Image {
                url,
                alt: flatten_text(&alt),
                title,
            };
            Some(Node::new(image, cursor.span_since(start)))
        })
    }

    /// Everything that starts with `[`, tried in order: footnote, citation,
    /// then inline or reference link.
    pub(crate) fn try_bracket(&self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let options = *self.options();
        if !(options.footnotes || options.citations || options.links) {
            return None;
        }

        bracketed(cursor, "bracket", |cursor| {
            if options.footnotes {
                if let Some(node) = speculate(cursor, "footnote", |c| self.footnote(c)) {
                    return Some(node);
                }
            }
            if options.citations {
                if let Some(node) = speculate(cursor, "citation", |c| self.citation(c)) {
                    return Some(node);
                }
            }
            if options.links {
                return speculate(cursor, "link", |c| self.link(c));
            }
            None
        })
    }

    /// `[^id]`
    fn footnote(&self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let start = cursor.position();
        expect(cursor, MdTokenKind::LeftBracket)?;
        expect(cursor, MdTokenKind::Caret)?;
        let identifier = self.identifier(cursor)?;
        Some(Node::new(
            NodeKind::Footnote { identifier },
            cursor.span_since(start),
        ))
    }

    /// `[@id]`
    fn citation(&self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let start = cursor.position();
        expect(cursor, MdTokenKind::LeftBracket)?;
        match cursor.peek() {
            Some(token) if token.kind == MdTokenKind::Text && token.text == "@" => {
                cursor.bump();
            }
            _ => return None,
        }
        let identifier = self.identifier(cursor)?;
        Some(Node::new(
            NodeKind::CitationReference { identifier },
            cursor.span_since(start),
        ))
    }

    /// Bracketed identifier text, closing bracket included. Must be a single
    /// non-empty word.
    fn identifier(&self, cursor: &mut Cursor<'_>) -> Option<String> {
        let nodes = self.parse_inline(cursor, CLOSE_BRACKET);
        expect(cursor, MdTokenKind::RightBracket)?;
        let identifier = flatten_text(&nodes);
        if identifier.is_empty() || identifier.chars().any(char::is_whitespace) {
            return None;
        }
        Some(identifier)
    }

    /// `[text](url)`, `[text][id]` or `[text][]`.
    fn link(&self, cursor: &mut Cursor<'_>) -> Option<Node> {
        let start = cursor.position();
        expect(cursor, MdTokenKind::LeftBracket)?;
        let children = self.parse_inline(cursor, CLOSE_BRACKET);
        expect(cursor, MdTokenKind::RightBracket)?;

        let kind = match cursor.peek_kind()? {
            MdTokenKind::LeftParen => {
                let (url, title) = destination(cursor)?;
                NodeKind::Link { url, title }
            }
            MdTokenKind::LeftBracket => {
                cursor.bump();
                let label = raw_until(cursor, MdTokenKind::RightBracket)?;
                expect(cursor, MdTokenKind::RightBracket)?;

                // collapsed form takes its identifier from the link text
                let identifier = match label.trim() {
                    "" => flatten_text(&children),
                    label => label.to_string(),
                };
                if identifier.trim().is_empty() {
                    return None;
                }
                NodeKind::Reference {
                    identifier,
                    url: String::new(),
                    title: String::new(),
                }
            }
            _ => return None,
        };

        Some(Node::with_children(kind, cursor.span_since(start), children))
    }
}
