//! HTML entity decoding

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::tokenizer::ENTITY_RE;

/// Named entities, keyed without the surrounding `&` and `;`.
static HTML_ENTITIES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Markup
        ("amp", "&"),
        ("lt", "<"),
        ("gt", ">"),
        ("quot", "\""),
        ("apos", "'"),
        ("nbsp", "\u{a0}"),
        // Copyright, trademark, registered
        ("copy", "©"),
        ("trade", "™"),
        ("reg", "®"),
        // Dashes and punctuation
        ("mdash", "—"),
        ("ndash", "–"),
        ("hellip", "…"),
        ("laquo", "«"),
        ("raquo", "»"),
        ("lsquo", "‘"),
        ("rsquo", "’"),
        ("ldquo", "“"),
        ("rdquo", "”"),
        ("bull", "•"),
        ("middot", "·"),
        ("dagger", "†"),
        ("Dagger", "‡"),
        ("para", "¶"),
        ("sect", "§"),
        ("prime", "′"),
        ("Prime", "″"),
        // Arrows
        ("larr", "←"),
        ("rarr", "→"),
        ("uarr", "↑"),
        ("darr", "↓"),
        // Math
        ("times", "×"),
        ("divide", "÷"),
        ("plusmn", "±"),
        ("ne", "≠"),
        ("le", "≤"),
        ("ge", "≥"),
        ("infin", "∞"),
        ("deg", "°"),
        ("permil", "‰"),
        // Currency
        ("euro", "€"),
        ("pound", "£"),
        ("yen", "¥"),
        ("cent", "¢"),
    ])
});

/// Decode one complete character reference such as `&copy;` or `&#x41;`.
///
/// Returns `None` for unknown names and invalid code points.
pub fn decode_entity(entity: &str) -> Option<String> {
    let body = entity.strip_prefix('&')?.strip_suffix(';')?;

    if let Some(number) = body.strip_prefix('#') {
        let codepoint = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse::<u32>().ok()?,
        };
        // U+0000 is replaced, per HTML
        let c = match codepoint {
            0 => char::REPLACEMENT_CHARACTER,
            cp => char::from_u32(cp)?,
        };
        return Some(c.to_string());
    }

    HTML_ENTITIES.get(body).map(|s| s.to_string())
}

/// Decode every recognizable character reference in `text`.
///
/// Anything that does not decode is kept verbatim.
pub fn decode_html_entities(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = ENTITY_RE
            .find(rest)
            .and_then(|m| decode_entity(m.as_str()).map(|s| (s, m.end())));
        match decoded {
            Some((s, len)) => {
                result.push_str(&s);
                rest = &rest[len..];
            }
            None => {
                result.push('&');
                rest = &rest[1..];
            }
        }
    }

    result.push_str(rest);
    result
}
