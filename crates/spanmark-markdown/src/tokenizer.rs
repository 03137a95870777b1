//! Tokenizer for inline markdown content.
//!
//! The whole input is scanned up front into a flat token sequence. Structural
//! characters become one token each, so the inline parser can count delimiter
//! runs and match brackets itself. Constructs that are opaque to the inline
//! parser (code spans, formulas, raw HTML, autolinks) are recognized here and
//! arrive as a single token.

use regex::Regex;
use spanmark_core::{Position, Span, Token, TokenKind};
use std::sync::LazyLock;

/// `$$…$$` on one line.
static DISPLAY_FORMULA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\$[^$\n]+\$\$").unwrap());

/// `$…$` whose body neither starts nor ends with whitespace.
static FORMULA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$[^\s$](?:[^$\n]*[^\s$])?\$").unwrap());

/// `<scheme:…>` and `<user@host>`.
static AUTOLINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^<(?:[A-Za-z][A-Za-z0-9+.\-]{1,31}:[^\s<>]*",
        r"|[A-Za-z0-9.!#$%&'*+/=?^_`{|}~\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?",
        r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*)>"
    ))
    .unwrap()
});

/// Comments, CDATA, processing instructions and declarations.
static HTML_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?s:<!--.*?-->|<!\[CDATA\[.*?\]\]>|<\?.*?\?>|<![A-Za-z][^>]*>)").unwrap()
});

/// A comment opener that never closes runs to the end of the line.
static HTML_UNCLOSED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<!--[^\n]*").unwrap());

/// Open and close tags.
static HTML_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"^(?:<[A-Za-z][A-Za-z0-9\-]*"#,
        r#"(?:\s+[A-Za-z_:][A-Za-z0-9_.:\-]*(?:\s*=\s*(?:[^\s"'=<>`]+|'[^']*'|"[^"]*"))?)*"#,
        r#"\s*/?>|</[A-Za-z][A-Za-z0-9\-]*\s*>)"#
    ))
    .unwrap()
});

/// Named and numeric character references.
pub(crate) static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:#[0-9]{1,7}|#[xX][0-9A-Fa-f]{1,6}|[A-Za-z][A-Za-z0-9]{1,31});").unwrap()
});

/// Bare URLs. Trailing punctuation is left for the surrounding text.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:(?:https?|ftp)://|www\.)[^\s<>\[\]()]*[^\s<>\[\]().,:;!?"'*_~]"#).unwrap()
});

/// Token kinds produced by the markdown tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MdTokenKind {
    /// `*`
    Asterisk,
    /// `_`
    Underscore,
    /// `~`
    Tilde,
    /// A complete code span including its backtick fences
    InlineCode,
    /// A complete `$…$` or `$$…$$` formula
    Formula,
    /// An HTML open or close tag
    HtmlTag,
    /// An HTML comment, CDATA section, processing instruction or declaration
    HtmlBlock,
    /// An HTML comment opener with no close on the same line
    HtmlUnclosedBlock,
    /// A character reference such as `&amp;`
    HtmlEntity,
    /// `!`
    Exclamation,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `^`
    Caret,
    /// `<scheme:…>` or `<user@host>`
    Autolink,
    /// A bare `http://`, `https://`, `ftp://` or `www.` URL
    Url,
    /// Anything else
    Text,
    /// `\n` or `\r\n`
    Newline,
    /// End of input
    Eof,
}

impl TokenKind for MdTokenKind {
    fn is_eof(self) -> bool {
        self == MdTokenKind::Eof
    }
}

/// Characters that end a text run.
fn is_special(c: char) -> bool {
    matches!(
        c,
        '\n' | '\\'
            | '*'
            | '_'
            | '~'
            | '!'
            | '['
            | ']'
            | '('
            | ')'
            | '^'
            | '@'
            | '`'
            | '$'
            | '<'
            | '&'
    )
}

fn single_char_kind(c: char) -> Option<MdTokenKind> {
    let kind = match c {
        '*' => MdTokenKind::Asterisk,
        '_' => MdTokenKind::Underscore,
        '~' => MdTokenKind::Tilde,
        '!' => MdTokenKind::Exclamation,
        '[' => MdTokenKind::LeftBracket,
        ']' => MdTokenKind::RightBracket,
        '(' => MdTokenKind::LeftParen,
        ')' => MdTokenKind::RightParen,
        '^' => MdTokenKind::Caret,
        _ => return None,
    };
    Some(kind)
}

/// Tokenizer for inline markdown content.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    /// Byte offset of the next unscanned character
    offset: usize,
    position: Position,
    tokens: Vec<Token<MdTokenKind>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            position: Position::default(),
            tokens: Vec::new(),
        }
    }

    /// Scan the whole input. The last token is always [`MdTokenKind::Eof`].
    pub fn tokenize(mut self) -> Vec<Token<MdTokenKind>> {
        while self.offset < self.input.len() {
            self.scan_one();
        }
        self.tokens
            .push(Token::new(MdTokenKind::Eof, "", Span::point(self.position)));
        self.tokens
    }

    fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    /// Emit a token for the next `len` bytes, with `text` as its content.
    fn emit_as(&mut self, kind: MdTokenKind, len: usize, text: &str) {
        let raw = &self.input[self.offset..self.offset + len];
        let end = self.position.advanced_by(raw);
        self.tokens
            .push(Token::new(kind, text, Span::new(self.position, end)));
        self.position = end;
        self.offset += len;
    }

    fn emit(&mut self, kind: MdTokenKind, len: usize) {
        let input = self.input;
        self.emit_as(kind, len, &input[self.offset..self.offset + len]);
    }

    fn emit_match(&mut self, kind: MdTokenKind, re: &Regex) -> bool {
        match re.find(self.rest()) {
            Some(m) => {
                self.emit(kind, m.end());
                true
            }
            None => false,
        }
    }

    /// Whether a bare URL may start here: at input start or after a non-alphanumeric.
    fn at_word_boundary(&self, offset: usize) -> bool {
        self.input[..offset]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    }

    fn scan_one(&mut self) {
        let rest = self.rest();
        let Some(c) = rest.chars().next() else {
            return;
        };

        if let Some(kind) = single_char_kind(c) {
            self.emit(kind, 1);
            return;
        }

        match c {
            '\n' => self.emit(MdTokenKind::Newline, 1),
            '\r' if rest.starts_with("\r\n") => self.emit(MdTokenKind::Newline, 2),
            '\\' => self.scan_escape(),
            '@' => self.emit(MdTokenKind::Text, 1),
            '`' => self.scan_code_span(),
            '$' => {
                if !self.emit_match(MdTokenKind::Formula, &DISPLAY_FORMULA_RE)
                    && !self.emit_match(MdTokenKind::Formula, &FORMULA_RE)
                {
                    self.emit(MdTokenKind::Text, 1);
                }
            }
            '<' => {
                if !self.emit_match(MdTokenKind::Autolink, &AUTOLINK_RE)
                    && !self.emit_match(MdTokenKind::HtmlBlock, &HTML_BLOCK_RE)
                    && !self.emit_match(MdTokenKind::HtmlUnclosedBlock, &HTML_UNCLOSED_RE)
                    && !self.emit_match(MdTokenKind::HtmlTag, &HTML_TAG_RE)
                {
                    self.emit(MdTokenKind::Text, 1);
                }
            }
            '&' => {
                if !self.emit_match(MdTokenKind::HtmlEntity, &ENTITY_RE) {
                    self.emit(MdTokenKind::Text, 1);
                }
            }
            _ => self.scan_text(),
        }
    }

    /// A backslash before ASCII punctuation yields that character as plain text.
    fn scan_escape(&mut self) {
        match self.rest()[1..].chars().next() {
            Some(escaped) if escaped.is_ascii_punctuation() => {
                self.emit_as(MdTokenKind::Text, 2, &escaped.to_string());
            }
            _ => self.emit(MdTokenKind::Text, 1),
        }
    }

    /// A backtick run closed by a run of the same length on the same line.
    fn scan_code_span(&mut self) {
        let rest = self.rest();
        let open = rest.len() - rest.trim_start_matches('`').len();
        let line_end = rest.find('\n').unwrap_or(rest.len());

        let mut i = open;
        while i < line_end {
            let run = rest[i..line_end].len() - rest[i..line_end].trim_start_matches('`').len();
            if run == 0 {
                i += rest[i..].chars().next().map_or(1, char::len_utf8);
                continue;
            }
            if run == open {
                self.emit(MdTokenKind::InlineCode, i + run);
                return;
            }
            i += run;
        }

        // no closer: the whole run is literal
        self.emit(MdTokenKind::Text, open);
    }

    /// A maximal run of ordinary characters, stopping where a bare URL begins.
    fn scan_text(&mut self) {
        if self.at_word_boundary(self.offset) && self.emit_match(MdTokenKind::Url, &URL_RE) {
            return;
        }

        let rest = self.rest();
        let mut end = rest.len();
        let mut prev: Option<char> = None;
        for (i, c) in rest.char_indices() {
            if i > 0 {
                if is_special(c) || (c == '\r' && rest[i..].starts_with("\r\n")) {
                    end = i;
                    break;
                }
                if prev.map_or(false, |p| !p.is_alphanumeric()) && URL_RE.is_match(&rest[i..]) {
                    end = i;
                    break;
                }
            }
            prev = Some(c);
        }
        self.emit(MdTokenKind::Text, end);
    }
}

/// Tokenize markdown inline content.
pub fn tokenize(input: &str) -> Vec<Token<MdTokenKind>> {
    Tokenizer::new(input).tokenize()
}
