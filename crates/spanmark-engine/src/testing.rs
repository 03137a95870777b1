//! A toy word language used by the engine's unit tests.

use spanmark_core::{Position, Span, Token, TokenKind, TreeNode};

use crate::{Consumer, ParseContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Word,
    Space,
    Symbol,
    End,
}

impl TokenKind for Kind {
    fn is_eof(self) -> bool {
        self == Kind::End
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tree {
    pub label: String,
    pub children: Vec<Tree>,
}

impl Tree {
    pub fn leaf(label: &str) -> Self {
        Self {
            label: label.to_string(),
            children: Vec::new(),
        }
    }
}

impl TreeNode for Tree {
    fn append(&mut self, child: Self) {
        self.children.push(child);
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}

/// Letters group into words; spaces and everything else are one token per char.
pub fn tokenize(input: &str) -> Vec<Token<Kind>> {
    let mut tokens = Vec::new();
    let mut pos = Position::default();
    let mut word = String::new();

    let flush = |word: &mut String, pos: &mut Position, tokens: &mut Vec<Token<Kind>>| {
        if !word.is_empty() {
            let end = pos.advanced_by(word);
            tokens.push(Token::new(Kind::Word, word.as_str(), Span::new(*pos, end)));
            *pos = end;
            word.clear();
        }
    };

    for ch in input.chars() {
        if ch.is_alphabetic() {
            word.push(ch);
            continue;
        }
        flush(&mut word, &mut pos, &mut tokens);
        let text = ch.to_string();
        let kind = if ch == ' ' { Kind::Space } else { Kind::Symbol };
        let end = pos.advanced_by(&text);
        tokens.push(Token::new(kind, text, Span::new(pos, end)));
        pos = end;
    }
    flush(&mut word, &mut pos, &mut tokens);
    tokens.push(Token::new(Kind::End, "", Span::point(pos)));
    tokens
}

/// Claims words, appending a leaf per word.
pub struct WordConsumer;

impl Consumer<Kind, Tree> for WordConsumer {
    fn name(&self) -> &str {
        "word"
    }

    fn consume(&self, ctx: &mut ParseContext<'_, Kind, Tree>, token: &Token<Kind>) -> bool {
        if token.kind != Kind::Word {
            return false;
        }
        ctx.advance(1);
        ctx.append(Tree::leaf(&token.text));
        true
    }
}

/// Claims spaces without producing a node.
pub struct SpaceConsumer;

impl Consumer<Kind, Tree> for SpaceConsumer {
    fn name(&self) -> &str {
        "space"
    }

    fn consume(&self, ctx: &mut ParseContext<'_, Kind, Tree>, token: &Token<Kind>) -> bool {
        if token.kind != Kind::Space {
            return false;
        }
        ctx.advance(1);
        true
    }
}

/// Claims words, tagging the leaf with its own label.
pub struct Labeled(pub &'static str);

impl Consumer<Kind, Tree> for Labeled {
    fn name(&self) -> &str {
        self.0
    }

    fn consume(&self, ctx: &mut ParseContext<'_, Kind, Tree>, token: &Token<Kind>) -> bool {
        if token.kind != Kind::Word {
            return false;
        }
        ctx.advance(1);
        ctx.append(Tree::leaf(&format!("{}:{}", self.0, token.text)));
        true
    }
}
