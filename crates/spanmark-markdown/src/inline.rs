//! Inline markdown parser.
//!
//! This module handles parsing of inline markdown formatting: emphasis,
//! strong, strikethrough, inline code, formulas, raw HTML and autolinks.
//! Bracketed constructs (links, images, references, footnotes, citations)
//! live in [`crate::links`] and call back into [`InlineParser::parse_inline`]
//! for their nested content.
//!
//! Emphasis is resolved with a delimiter stack, one per invocation: every run
//! of `*`, `_` or `~` either closes the most recent compatible opener or is
//! pushed as a literal placeholder that a later run may close.

use spanmark_core::{Position, Span, Token};

use crate::ast::{coalesce_nodes, Node, NodeKind};
use crate::cursor::Cursor;
use crate::tokenizer::MdTokenKind;

/// Tokens that end a top-level inline run.
pub const DEFAULT_STOP: &[MdTokenKind] = &[MdTokenKind::Newline, MdTokenKind::Eof];

/// Which constructs the inline parser recognizes.
///
/// A disabled construct is emitted as literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineOptions {
    pub strikethrough: bool,
    pub footnotes: bool,
    pub citations: bool,
    pub formulas: bool,
    pub autolinks: bool,
    pub html: bool,
    pub images: bool,
    pub links: bool,
}

impl Default for InlineOptions {
    fn default() -> Self {
        Self {
            strikethrough: true,
            footnotes: true,
            citations: true,
            formulas: true,
            autolinks: true,
            html: true,
            images: true,
            links: true,
        }
    }
}

/// Delimiter characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Asterisk,
    Underscore,
    Tilde,
}

impl Marker {
    fn kind(self) -> MdTokenKind {
        match self {
            Marker::Asterisk => MdTokenKind::Asterisk,
            Marker::Underscore => MdTokenKind::Underscore,
            Marker::Tilde => MdTokenKind::Tilde,
        }
    }

    fn repeat(self, count: usize) -> String {
        let c = match self {
            Marker::Asterisk => "*",
            Marker::Underscore => "_",
            Marker::Tilde => "~",
        };
        c.repeat(count)
    }
}

/// An open delimiter run waiting for a closer.
#[derive(Debug, Clone, Copy)]
struct Delimiter {
    marker: Marker,
    /// Markers still available to close with
    count: usize,
    /// Where the literal placeholder for this run sits in `nodes`
    index: usize,
}

/// Nodes produced so far by one invocation, plus its delimiter stack.
#[derive(Debug, Default)]
pub(crate) struct Spans {
    nodes: Vec<Node>,
    stack: Vec<Delimiter>,
}

impl Spans {
    pub(crate) fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Append literal text, merging into the previous text node unless an
    /// open delimiter owns it.
    pub(crate) fn push_text(&mut self, text: &str, span: Span) {
        let last = self.nodes.len().checked_sub(1);
        let owned = last.map_or(false, |i| self.stack.iter().any(|d| d.index == i));
        if !owned {
            if let Some(node) = self.nodes.last_mut() {
                if node.push_str(text, span) {
                    return;
                }
            }
        }
        self.nodes.push(Node::text(text, span));
    }

    /// Resolve a run of `count` markers starting at `at`.
    fn resolve(&mut self, marker: Marker, mut count: usize, mut at: Position) {
        while count > 0 {
            let Some(slot) = self.stack.iter().rposition(|d| d.marker == marker) else {
                break;
            };
            let open = self.stack[slot];
            let used = match marker {
                Marker::Tilde if open.count < 2 || count < 2 => break,
                Marker::Tilde => open.count.min(count),
                _ if open.count >= 2 && count >= 2 => 2,
                _ => 1,
            };
            self.stack.remove(slot);

            let content: Vec<Node> = self.nodes.drain(open.index + 1..).collect();
            let leftover = open.count - used;
            let opener_start = self.nodes[open.index].span.start;

            let wrapper_start = if leftover > 0 {
                let text = marker.repeat(leftover);
                let end = opener_start.advanced_by(&text);
                self.nodes[open.index] = Node::text(text, Span::new(opener_start, end));
                self.stack.insert(
                    slot,
                    Delimiter {
                        count: leftover,
                        ..open
                    },
                );
                end
            } else {
                self.nodes.truncate(open.index);
                opener_start
            };
            // placeholders that were wrapped are plain text now
            self.stack.retain(|d| d.index <= open.index);

            let close_end = at.advanced_by(&marker.repeat(used));
            let kind = match marker {
                Marker::Tilde => NodeKind::Strike,
                _ if used >= 2 => NodeKind::Strong,
                _ => NodeKind::Emphasis,
            };
            self.nodes.push(Node::with_children(
                kind,
                Span::new(wrapper_start, close_end),
                content,
            ));

            count -= used;
            at = close_end;
        }

        if count > 0 {
            let text = marker.repeat(count);
            let end = at.advanced_by(&text);
            self.nodes.push(Node::text(text, Span::new(at, end)));
            self.stack.push(Delimiter {
                marker,
                count,
                index: self.nodes.len() - 1,
            });
        }
    }

    fn finish(mut self) -> Vec<Node> {
        coalesce_nodes(&mut self.nodes);
        self.nodes
    }
}

/// Recursive inline parser over a shared token cursor.
#[derive(Debug, Clone, Default)]
pub struct InlineParser {
    options: InlineOptions,
}

impl InlineParser {
    pub fn new(options: InlineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &InlineOptions {
        &self.options
    }

    /// Parse span nodes until the cursor reaches a token in `stop` or the end
    /// of input. The stopping token is not consumed.
    ///
    /// Inside a bracketed construct that nested too deeply, parsing stops
    /// early; the enclosing attempt is discarded anyway.
    pub fn parse_inline(&self, cursor: &mut Cursor<'_>, stop: &[MdTokenKind]) -> Vec<Node> {
        let mut spans = Spans::default();
        while let Some(token) = cursor.peek() {
            if token.is_eof() || stop.contains(&token.kind) || cursor.is_abandoned() {
                break;
            }
            self.step(cursor, token, &mut spans);
        }
        spans.finish()
    }

    fn step(&self, cursor: &mut Cursor<'_>, token: &Token<MdTokenKind>, spans: &mut Spans) {
        let options = &self.options;
        match token.kind {
            MdTokenKind::Asterisk => self.delimiter_run(cursor, Marker::Asterisk, spans),
            MdTokenKind::Underscore => self.delimiter_run(cursor, Marker::Underscore, spans),
            MdTokenKind::Tilde => self.delimiter_run(cursor, Marker::Tilde, spans),
            MdTokenKind::InlineCode => {
                cursor.bump();
                let code = strip_fences(&token.text, '`');
                spans.push(Node::new(NodeKind::InlineCode(code), token.span));
            }
            MdTokenKind::Formula if options.formulas => {
                cursor.bump();
                let formula = strip_fences(&token.text, '$');
                spans.push(Node::new(NodeKind::Formula(formula), token.span));
            }
            MdTokenKind::HtmlTag
            | MdTokenKind::HtmlBlock
            | MdTokenKind::HtmlUnclosedBlock
            | MdTokenKind::HtmlEntity
                if options.html =>
            {
                cursor.bump();
                spans.push(Node::new(NodeKind::Html(token.text.clone()), token.span));
            }
            MdTokenKind::Exclamation => match self.try_image(cursor) {
                Some(image) => spans.push(image),
                None => {
                    cursor.bump();
                    spans.push_text(&token.text, token.span);
                }
            },
            MdTokenKind::LeftBracket => match self.try_bracket(cursor) {
                Some(node) => spans.push(node),
                None => {
                    cursor.bump();
                    spans.push_text(&token.text, token.span);
                }
            },
            MdTokenKind::Autolink | MdTokenKind::Url if options.autolinks => {
                cursor.bump();
                let url = token
                    .text
                    .strip_prefix('<')
                    .and_then(|s| s.strip_suffix('>'))
                    .unwrap_or(&token.text);
                let link = NodeKind::Link {
                    url: url.to_string(),
                    title: url.to_string(),
                };
                spans.push(Node::with_children(
                    link,
                    token.span,
                    vec![Node::text(url, token.span)],
                ));
            }
            _ => {
                cursor.bump();
                spans.push_text(&token.text, token.span);
            }
        }
    }

    fn delimiter_run(&self, cursor: &mut Cursor<'_>, marker: Marker, spans: &mut Spans) {
        let run = cursor.bump_run(marker.kind());
        let (Some(first), Some(last)) = (run.first(), run.last()) else {
            return;
        };

        if marker == Marker::Tilde && (run.len() < 2 || !self.options.strikethrough) {
            let span = Span::new(first.span.start, last.span.end);
            spans.push_text(&marker.repeat(run.len()), span);
            return;
        }
        spans.resolve(marker, run.len(), first.span.start);
    }
}

/// Strip the fence run from both ends of a code span or formula.
///
/// Code spans padded with one space on each side lose that padding too.
fn strip_fences(raw: &str, fence: char) -> String {
    let width = raw.len() - raw.trim_start_matches(fence).len();
    let inner = raw
        .get(width..raw.len().saturating_sub(width))
        .unwrap_or_default();

    if fence == '`'
        && inner.len() >= 2
        && inner.starts_with(' ')
        && inner.ends_with(' ')
        && !inner.trim().is_empty()
    {
        return inner[1..inner.len() - 1].to_string();
    }
    inner.to_string()
}
