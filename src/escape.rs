//! Escaping helpers shared by the variant expander, the regex compiler and the
//! trie matcher.
//!
//! Variant keys are plain strings in which `{:}` stands for a parameter and
//! `{*}` for a wildcard. Literal `{`, `}` and `\` are written with a leading
//! backslash so that a key can always be read back into the same pieces.

use std::borrow::Cow;

/// Placeholder emitted for a `:name` parameter.
pub const PARAM_PLACEHOLDER: &str = "{:}";
/// Placeholder emitted for a `*` or `*name` wildcard.
pub const WILDCARD_PLACEHOLDER: &str = "{*}";

/// One piece of a variant key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPiece<'a> {
    /// Literal text, already unescaped.
    Text(Cow<'a, str>),
    Param,
    Wildcard,
}

/// Append `text` to a variant key, escaping the characters that carry meaning
/// inside keys.
pub fn push_key_text(key: &mut String, text: &str) {
    for ch in text.chars() {
        if matches!(ch, '{' | '}' | '\\') {
            key.push('\\');
        }
        key.push(ch);
    }
}

/// Split a variant key into literal text and placeholders.
///
/// Adjacent literal characters are merged into a single [`KeyPiece::Text`].
#[must_use]
pub fn key_pieces(key: &str) -> Vec<KeyPiece<'_>> {
    let mut pieces = Vec::new();
    let mut text_start = 0;
    let mut owned: Option<String> = None;
    let mut chars = key.char_indices();

    while let Some((i, ch)) = chars.next() {
        let rest = &key[i..];
        if rest.starts_with(PARAM_PLACEHOLDER) || rest.starts_with(WILDCARD_PLACEHOLDER) {
            flush_text(key, &mut pieces, &mut owned, text_start, i);
            pieces.push(if rest.as_bytes()[1] == b':' {
                KeyPiece::Param
            } else {
                KeyPiece::Wildcard
            });
            // Skip the remaining two characters of the placeholder.
            chars.next();
            chars.next();
            text_start = i + PARAM_PLACEHOLDER.len();
        } else if ch == '\\' {
            let Some((j, escaped)) = chars.next() else {
                continue;
            };
            // Switch to an owned buffer the first time an escape shows up.
            let buf = owned.get_or_insert_with(|| key[text_start..i].to_owned());
            buf.push(escaped);
            text_start = j + escaped.len_utf8();
        } else if let Some(buf) = owned.as_mut() {
            buf.push(ch);
            text_start = i + ch.len_utf8();
        }
    }
    flush_text(key, &mut pieces, &mut owned, text_start, key.len());
    pieces
}

fn flush_text<'a>(
    key: &'a str,
    pieces: &mut Vec<KeyPiece<'a>>,
    owned: &mut Option<String>,
    start: usize,
    end: usize,
) {
    match owned.take() {
        Some(text) if !text.is_empty() => pieces.push(KeyPiece::Text(Cow::Owned(text))),
        Some(_) => {}
        None if start < end => pieces.push(KeyPiece::Text(Cow::Borrowed(&key[start..end]))),
        None => {}
    }
}

/// Remove key escapes from a key segment that holds only literal text.
#[must_use]
pub fn unescape_key(key: &str) -> Cow<'_, str> {
    if !key.contains('\\') {
        return Cow::Borrowed(key);
    }
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Count the placeholders in a key, split into (params, wildcards).
#[must_use]
pub fn count_placeholders(key: &str) -> (usize, usize) {
    key_pieces(key)
        .iter()
        .fold((0, 0), |(params, wildcards), piece| match piece {
            KeyPiece::Param => (params + 1, wildcards),
            KeyPiece::Wildcard => (params, wildcards + 1),
            KeyPiece::Text(_) => (params, wildcards),
        })
}

/// Append `text` to a regex source with every metacharacter escaped.
pub fn push_regex_literal(source: &mut String, text: &str) {
    source.push_str(&regex::escape(text));
}
