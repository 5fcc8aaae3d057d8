//! Tag extraction: marked-up line → plain text + style ranges.
//!
//! Extraction is a loop over "find the leftmost tag pair, record its range in
//! the current text, splice the tags out, continue after the content". Each
//! splice only shortens the text at or after the recorded start, so ranges
//! recorded earlier stay valid.

use std::ops::Range;
use std::sync::LazyLock;

use diffm_types::{AnnotatedLine, StyleKind, StyleRange};
use regex::Regex;

use crate::tag::{kind_for_color, CLOSE_TAG};

static OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<annotation color="(\w+)">"#).expect("open tag pattern is valid")
});

/// A well-formed tag pair located in the current text.
struct TagPair {
    kind: StyleKind,
    /// Open tag through close tag.
    span: Range<usize>,
    /// The text between the tags.
    content: Range<usize>,
}

/// Decode a marked-up line.
///
/// A line without tags is returned unchanged with no ranges. An opening tag
/// without a matching close (or followed by another opening tag before its
/// close) ends extraction; the rest of the line is kept verbatim.
pub fn extract(marked_up: &str) -> AnnotatedLine {
    let mut text = marked_up.to_string();
    let mut ranges = Vec::new();
    let mut cursor = 0;

    while let Some(pair) = find_pair(&text, cursor) {
        let start = pair.span.start;
        let content = text[pair.content].to_string();
        let end = start + content.len();
        if end > start {
            ranges.push(StyleRange::new(pair.kind, start, end));
        }
        text.replace_range(pair.span, &content);
        cursor = end;
    }

    AnnotatedLine::new(text, ranges)
}

fn find_pair(text: &str, from: usize) -> Option<TagPair> {
    let open = OPEN_TAG.captures_at(text, from)?;
    let open_match = open.get(0)?;
    let color = open.get(1)?.as_str();

    let body_start = open_match.end();
    let close_start = body_start + text[body_start..].find(CLOSE_TAG)?;

    // Tags never nest: another opening tag before the close means this one
    // is unmatched.
    if OPEN_TAG
        .find_at(text, body_start)
        .is_some_and(|next| next.start() < close_start)
    {
        return None;
    }

    Some(TagPair {
        kind: kind_for_color(color),
        span: open_match.start()..close_start + CLOSE_TAG.len(),
        content: body_start..close_start,
    })
}
