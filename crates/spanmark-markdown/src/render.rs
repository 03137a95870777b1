//! Serializers for the span tree: a debug dump, Markdown, and plain text.

use crate::ast::{Node, NodeKind};
use crate::entities::decode_html_entities;

/// Characters that would otherwise start markup when re-parsed.
const ESCAPED: &[char] = &['\\', '*', '_', '~', '[', ']', '`', '$', '<', '&', '!'];

/// Indented one-line-per-node dump of a node sequence.
pub fn dump(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        dump_node(node, 0, false, &mut out);
    }
    out
}

fn dump_node(node: &Node, depth: usize, spans: bool, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(&describe(&node.kind));
    if spans {
        out.push_str(&format!(" @{}-{}", node.span.start, node.span.end));
    }
    out.push('\n');
    for child in &node.children {
        dump_node(child, depth + 1, spans, out);
    }
}

fn describe(kind: &NodeKind) -> String {
    let name = kind.name();
    match kind {
        NodeKind::Text(s) | NodeKind::InlineCode(s) | NodeKind::Formula(s) | NodeKind::Html(s) => {
            format!("{} {:?}", name, s)
        }
        NodeKind::Link { url, title } => format!("{} url={:?} title={:?}", name, url, title),
        NodeKind::Image { url, alt, title } => {
            format!("{} url={:?} alt={:?} title={:?}", name, url, alt, title)
        }
        NodeKind::Reference {
            identifier,
            url,
            title,
        } => format!(
            "{} identifier={:?} url={:?} title={:?}",
            name, identifier, url, title
        ),
        NodeKind::Footnote { identifier } | NodeKind::CitationReference { identifier } => {
            format!("{} identifier={:?}", name, identifier)
        }
        NodeKind::Document
        | NodeKind::SoftBreak
        | NodeKind::Emphasis
        | NodeKind::Strong
        | NodeKind::Strike => name.to_string(),
    }
}

/// Escape text so it re-parses as the same literal text.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if ESCAPED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Pick a backtick fence longer than any backtick run inside `code`.
fn code_span(code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest + 1);

    let pad = code.starts_with('`')
        || code.ends_with('`')
        || (code.starts_with(' ') && code.ends_with(' ') && !code.trim().is_empty());
    if pad {
        format!("{fence} {code} {fence}")
    } else {
        format!("{fence}{code}{fence}")
    }
}

fn link_destination(url: &str, title: &str) -> String {
    let url = if url.chars().any(char::is_whitespace) {
        format!("<{url}>")
    } else {
        url.to_string()
    };
    match title {
        "" => url,
        t if t.contains('"') => format!("{url} '{t}'"),
        t => format!("{url} \"{t}\""),
    }
}

/// Whether a link is an autolink: its title and only text equal its URL.
fn is_autolink(node: &Node, url: &str, title: &str) -> bool {
    title == url && node.children.len() == 1 && node.children[0].as_text() == Some(url)
}

struct MarkdownWriter {
    out: String,
}

impl MarkdownWriter {
    fn write_all(&mut self, nodes: &[Node], outer: Option<char>) {
        for node in nodes {
            self.write(node, outer);
        }
    }

    /// `outer` is the emphasis marker of the closest enclosing emphasis, so
    /// directly nested emphasis alternates markers and never fuses into a
    /// longer run.
    fn write(&mut self, node: &Node, outer: Option<char>) {
        match &node.kind {
            NodeKind::Document => self.write_all(&node.children, None),
            NodeKind::SoftBreak => self.out.push('\n'),
            NodeKind::Text(text) => self.out.push_str(&escape(text)),
            NodeKind::Emphasis | NodeKind::Strong => {
                let marker = if outer == Some('*') { '_' } else { '*' };
                let width = if node.kind == NodeKind::Strong { 2 } else { 1 };
                let fence = marker.to_string().repeat(width);
                self.out.push_str(&fence);
                self.write_all(&node.children, Some(marker));
                self.out.push_str(&fence);
            }
            NodeKind::Strike => {
                self.out.push_str("~~");
                self.write_all(&node.children, None);
                self.out.push_str("~~");
            }
            NodeKind::InlineCode(code) => self.out.push_str(&code_span(code)),
            NodeKind::Formula(formula) => {
                let padded = formula.starts_with(char::is_whitespace)
                    || formula.ends_with(char::is_whitespace);
                let fence = if padded { "$$" } else { "$" };
                self.out.push_str(&format!("{fence}{formula}{fence}"));
            }
            NodeKind::Html(html) => self.out.push_str(html),
            NodeKind::Link { url, title } if is_autolink(node, url, title) => {
                if url.contains(':') || url.contains('@') {
                    self.out.push_str(&format!("<{url}>"));
                } else {
                    self.out.push_str(url);
                }
            }
            NodeKind::Link { url, title } => {
                self.out.push('[');
                self.write_all(&node.children, None);
                self.out
                    .push_str(&format!("]({})", link_destination(url, title)));
            }
            NodeKind::Image { url, alt, title } => {
                self.out.push_str(&format!(
                    "![{}]({})",
                    escape(alt),
                    link_destination(url, title)
                ));
            }
            NodeKind::Reference { identifier, .. } => {
                self.out.push('[');
                self.write_all(&node.children, None);
                self.out.push_str(&format!("][{identifier}]"));
            }
            NodeKind::Footnote { identifier } => {
                self.out.push_str(&format!("[^{}]", escape(identifier)));
            }
            NodeKind::CitationReference { identifier } => {
                self.out.push_str(&format!("[@{}]", escape(identifier)));
            }
        }
    }
}

/// Serialize nodes back to Markdown that parses to the same tree.
pub fn to_markdown(nodes: &[Node]) -> String {
    let mut writer = MarkdownWriter { out: String::new() };
    writer.write_all(nodes, None);
    writer.out
}

fn plain_node(node: &Node, out: &mut String) {
    match &node.kind {
        NodeKind::Text(text) | NodeKind::InlineCode(text) | NodeKind::Formula(text) => {
            out.push_str(text)
        }
        NodeKind::Html(html) if html.starts_with('&') => out.push_str(&decode_html_entities(html)),
        NodeKind::Html(_) => {}
        NodeKind::SoftBreak => out.push('\n'),
        NodeKind::Image { alt, .. } => out.push_str(alt),
        NodeKind::Footnote { identifier } => out.push_str(&format!("[^{identifier}]")),
        NodeKind::CitationReference { identifier } => out.push_str(&format!("[@{identifier}]")),
        _ => {
            for child in &node.children {
                plain_node(child, out);
            }
        }
    }
}

/// Readable text with markup removed and character references decoded.
pub fn plain_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        plain_node(node, &mut out);
    }
    out
}

impl Node {
    /// Indented tree dump of this node and its descendants.
    pub fn dump(&self) -> String {
        dump(std::slice::from_ref(self))
    }

    /// Like [`Node::dump`], with each node's source range.
    pub fn dump_with_spans(&self) -> String {
        let mut out = String::new();
        dump_node(self, 0, true, &mut out);
        out
    }

    pub fn to_markdown(&self) -> String {
        to_markdown(std::slice::from_ref(self))
    }

    pub fn plain_text(&self) -> String {
        plain_text(std::slice::from_ref(self))
    }
}
