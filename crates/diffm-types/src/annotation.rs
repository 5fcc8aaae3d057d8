//! Decorated line text: plain text plus highlighted sub-ranges.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// How a highlighted range changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    /// Present only in the new content.
    Added,
    /// Present only in the old content.
    Removed,
}

/// A half-open highlighted interval of an [`AnnotatedLine`]'s text.
///
/// Offsets are byte offsets into the plain text and always fall on char
/// boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleRange {
    pub kind: StyleKind,
    pub start: usize,
    pub end: usize,
}

impl StyleRange {
    pub fn new(kind: StyleKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    fn shifted(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            ..self
        }
    }
}

/// One line of a changed region with its markup decoded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedLine {
    pub text: String,
    /// Sorted by `start`, pairwise non-overlapping.
    pub ranges: Vec<StyleRange>,
}

impl AnnotatedLine {
    pub fn new(text: impl Into<String>, ranges: Vec<StyleRange>) -> Self {
        Self {
            text: text.into(),
            ranges,
        }
    }

    /// A line with no highlighting.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    /// Iterate the text as `(segment, style)` pieces in order, covering the
    /// whole line.
    pub fn segments(&self) -> impl Iterator<Item = (&str, Option<StyleKind>)> + '_ {
        let mut pieces = Vec::with_capacity(self.ranges.len() * 2 + 1);
        let mut cursor = 0;
        for range in &self.ranges {
            if range.start > cursor {
                pieces.push((&self.text[cursor..range.start], None));
            }
            pieces.push((&self.text[range.range()], Some(range.kind)));
            cursor = range.end;
        }
        if cursor < self.text.len() || pieces.is_empty() {
            pieces.push((&self.text[cursor..], None));
        }
        pieces.into_iter()
    }

    /// Concatenate lines with `\n`, shifting each line's ranges into the
    /// joined coordinate space.
    pub fn join(lines: &[AnnotatedLine]) -> AnnotatedLine {
        let mut joined = AnnotatedLine::default();
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                joined.text.push('\n');
            }
            let offset = joined.text.len();
            joined.text.push_str(&line.text);
            joined
                .ranges
                .extend(line.ranges.iter().map(|r| r.shifted(offset)));
        }
        joined
    }
}
