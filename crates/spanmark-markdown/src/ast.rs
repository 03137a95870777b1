//! Span-level node tree.

use spanmark_core::{Span, TreeNode};

/// What a node is, plus any payload that kind carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of a parsed document
    Document,
    /// A line break between two lines of inline content
    SoftBreak,
    /// Literal text
    Text(String),
    Emphasis,
    Strong,
    Strike,
    /// Code span content without its fences
    InlineCode(String),
    /// Formula content without its `$` fences
    Formula(String),
    /// Raw HTML, passed through verbatim
    Html(String),
    /// Inline link or autolink; the link text is in the children
    Link { url: String, title: String },
    /// Image with its alt text flattened to a string
    Image {
        url: String,
        alt: String,
        title: String,
    },
    /// `[text][id]`, left unresolved
    Reference {
        identifier: String,
        url: String,
        title: String,
    },
    /// `[^id]`
    Footnote { identifier: String },
    /// `[@id]`
    CitationReference { identifier: String },
}

impl NodeKind {
    /// Name used by the tree dump.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::SoftBreak => "SoftBreak",
            NodeKind::Text(_) => "Text",
            NodeKind::Emphasis => "Emphasis",
            NodeKind::Strong => "Strong",
            NodeKind::Strike => "Strike",
            NodeKind::InlineCode(_) => "InlineCode",
            NodeKind::Formula(_) => "Formula",
            NodeKind::Html(_) => "Html",
            NodeKind::Link { .. } => "Link",
            NodeKind::Image { .. } => "Image",
            NodeKind::Reference { .. } => "Reference",
            NodeKind::Footnote { .. } => "Footnote",
            NodeKind::CitationReference { .. } => "CitationReference",
        }
    }
}

/// A node in the span tree. Children are owned and ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<Node>,
}

impl Node {
    /// Create a childless node.
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
        }
    }

    /// Create a node that wraps `children`.
    pub fn with_children(kind: NodeKind, span: Span, children: Vec<Node>) -> Self {
        Self {
            kind,
            span,
            children,
        }
    }

    /// An empty document root.
    pub fn document() -> Self {
        Self::new(NodeKind::Document, Span::default())
    }

    pub fn text(text: impl Into<String>, span: Span) -> Self {
        Self::new(NodeKind::Text(text.into()), span)
    }

    /// The text buffer, if this is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    /// Append to a text node's buffer in place, extending its span.
    ///
    /// Returns `false` (and does nothing) for any other kind of node.
    pub fn push_str(&mut self, text: &str, end: Span) -> bool {
        match &mut self.kind {
            NodeKind::Text(buffer) => {
                buffer.push_str(text);
                self.span.end = end.end;
                true
            }
            _ => false,
        }
    }

    /// Concatenation of every text node below this one, in order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Merge runs of adjacent text nodes, at every depth.
    pub fn coalesce(&mut self) {
        coalesce_nodes(&mut self.children);
    }
}

fn collect_text(node: &Node, out: &mut String) {
    if let NodeKind::Text(text) = &node.kind {
        out.push_str(text);
    }
    for child in &node.children {
        collect_text(child, out);
    }
}

/// Text of every text node in `nodes`, including nested ones.
pub fn flatten_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        collect_text(node, &mut out);
    }
    out
}

/// Merge runs of adjacent text nodes in `nodes` and all their descendants.
pub fn coalesce_nodes(nodes: &mut Vec<Node>) {
    let mut merged: Vec<Node> = Vec::with_capacity(nodes.len());
    for mut node in nodes.drain(..) {
        node.coalesce();
        if let (Some(last), NodeKind::Text(text)) = (merged.last_mut(), &node.kind) {
            if last.push_str(text, node.span) {
                continue;
            }
        }
        merged.push(node);
    }
    *nodes = merged;
}

impl TreeNode for Node {
    fn append(&mut self, child: Self) {
        self.children.push(child);
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spanmark_core::Position;

    fn span(start: usize, end: usize) -> Span {
        Span::new(Position::new(0, start, start), Position::new(0, end, end))
    }

    #[test]
    fn test_push_str_extends_text() {
        let mut node = Node::text("ab", span(0, 2));
        assert!(node.push_str("cd", span(2, 4)));
        assert_eq!(node.as_text(), Some("abcd"));
        assert_eq!(node.span, span(0, 4));
    }

    #[test]
    fn test_push_str_rejects_non_text() {
        let mut node = Node::new(NodeKind::Emphasis, span(0, 3));
        assert!(!node.push_str("x", span(3, 4)));
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_text_content_flattens() {
        let node = Node::with_children(
            NodeKind::Document,
            span(0, 9),
            vec![
                Node::text("a ", span(0, 2)),
                Node::with_children(NodeKind::Emphasis, span(2, 5), vec![Node::text("b", span(3, 4))]),
                Node::new(NodeKind::InlineCode("c".into()), span(5, 8)),
            ],
        );
        assert_eq!(node.text_content(), "a b");
        assert_eq!(flatten_text(&node.children[1..]), "b");
    }

    #[test]
    fn test_coalesce_nested() {
        let mut node = Node::with_children(
            NodeKind::Document,
            span(0, 6),
            vec![
                Node::text("*", span(0, 1)),
                Node::text("a", span(1, 2)),
                Node::with_children(
                    NodeKind::Strong,
                    span(2, 6),
                    vec![Node::text("b", span(3, 4)), Node::text("c", span(4, 5))],
                ),
            ],
        );
        node.coalesce();

        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].as_text(), Some("*a"));
        assert_eq!(node.children[0].span, span(0, 2));
        assert_eq!(node.children[1].children.len(), 1);
        assert_eq!(node.children[1].children[0].as_text(), Some("bc"));
    }

    #[test]
    fn test_tree_node_append() {
        let mut root = Node::document();
        root.append(Node::new(NodeKind::SoftBreak, Span::default()));
        assert_eq!(root.child_count(), 1);
        assert_eq!(root.children()[0].kind.name(), "SoftBreak");
    }
}
