//! Escaping of source text placed inside markup.
//!
//! The row generator escapes every piece of source text before wrapping it,
//! so a line that itself contains `<annotation …>` cannot be mistaken for a
//! tag. [`extract_escaped`] decodes such a line back to the source text and
//! moves the style ranges onto the decoded offsets.

use std::borrow::Cow;

use diffm_types::{AnnotatedLine, StyleRange};

use crate::extract::extract;

const ENTITIES: [(&str, char); 2] = [("&amp;", '&'), ("&lt;", '<')];

/// Replace `&` and `<` with their entities.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Inverse of [`escape`]. Unknown `&` sequences are kept as they are.
pub fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(decode(text).0)
}

/// [`extract`] a line whose text pieces were [`escape`]d, returning the
/// unescaped text.
pub fn extract_escaped(marked_up: &str) -> AnnotatedLine {
    let line = extract(marked_up);
    if !line.text.contains('&') {
        return line;
    }
    let (text, offsets) = decode(&line.text);
    let ranges = line
        .ranges
        .iter()
        .map(|range| StyleRange::new(range.kind, offsets[range.start], offsets[range.end]))
        .collect();
    AnnotatedLine::new(text, ranges)
}

/// Decoded text plus, for each byte offset of `text` that starts a token
/// (and for `text.len()`), the matching offset in the decoded text.
fn decode(text: &str) -> (String, Vec<usize>) {
    let mut out = String::with_capacity(text.len());
    let mut offsets = vec![0; text.len() + 1];
    let mut i = 0;
    while i < text.len() {
        offsets[i] = out.len();
        let rest = &text[i..];
        if let Some((entity, c)) = ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            out.push(*c);
            i += entity.len();
            continue;
        }
        let Some(c) = rest.chars().next() else {
            break;
        };
        for j in 1..c.len_utf8() {
            offsets[i + j] = out.len() + j;
        }
        out.push(c);
        i += c.len_utf8();
    }
    offsets[text.len()] = out.len();
    (out, offsets)
}
