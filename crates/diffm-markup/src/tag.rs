//! The tag convention shared by the row generator and the extractor.

use diffm_types::StyleKind;

pub const CLOSE_TAG: &str = "</annotation>";

const REMOVED_COLOR: &str = "red";
const ADDED_COLOR: &str = "green";

pub fn color_for(kind: StyleKind) -> &'static str {
    match kind {
        StyleKind::Removed => REMOVED_COLOR,
        StyleKind::Added => ADDED_COLOR,
    }
}

/// Map a tag color back to a style. Anything other than red counts as added.
pub fn kind_for_color(color: &str) -> StyleKind {
    if color == REMOVED_COLOR {
        StyleKind::Removed
    } else {
        StyleKind::Added
    }
}

pub fn open_tag(kind: StyleKind) -> String {
    format!(r#"<annotation color="{}">"#, color_for(kind))
}

/// Append `text` to `out` wrapped in a tag pair. Empty text is not wrapped.
pub fn push_wrapped(out: &mut String, kind: StyleKind, text: &str) {
    if text.is_empty() {
        return;
    }
    out.push_str(&open_tag(kind));
    out.push_str(text);
    out.push_str(CLOSE_TAG);
}

pub fn wrap(kind: StyleKind, text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 40);
    push_wrapped(&mut out, kind, text);
    out
}
