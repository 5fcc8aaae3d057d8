use std::fmt;

use serde::{Deserialize, Serialize};

use crate::annotation::AnnotatedLine;

/// The kind of edit a [`Delta`] represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaKind {
    Equal,
    Insert,
    Delete,
    Change,
}

impl fmt::Display for DeltaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Equal => "EQUAL",
            Self::Insert => "INSERT",
            Self::Delete => "DELETE",
            Self::Change => "CHANGE",
        };
        f.write_str(label)
    }
}

/// A contiguous run of lines on one side of a delta.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Index of the first line (0-based).
    pub position: usize,
    /// Line text without line terminators.
    pub lines: Vec<String>,
}

impl Chunk {
    pub fn new(position: usize, lines: Vec<String>) -> Self {
        Self { position, lines }
    }

    /// Number of lines covered.
    pub fn size(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// One past the last covered line index.
    pub fn end(&self) -> usize {
        self.position + self.lines.len()
    }

    /// Total text length covered, in bytes, excluding line terminators.
    pub fn text_len(&self) -> usize {
        self.lines.iter().map(String::len).sum()
    }
}

/// One edit operation between the old and new content of a logical file.
///
/// `old_lines`/`new_lines` hold the decorated rows for non-equal deltas and
/// are empty for [`DeltaKind::Equal`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub kind: DeltaKind,
    pub source: Chunk,
    pub target: Chunk,
    pub old_lines: Vec<AnnotatedLine>,
    pub new_lines: Vec<AnnotatedLine>,
}

impl Delta {
    /// A delta without decorated rows.
    pub fn new(kind: DeltaKind, source: Chunk, target: Chunk) -> Self {
        Self {
            kind,
            source,
            target,
            old_lines: Vec::new(),
            new_lines: Vec::new(),
        }
    }

    pub fn is_equal(&self) -> bool {
        self.kind == DeltaKind::Equal
    }

    /// The old pane text of this delta as a single annotated string.
    pub fn old_text(&self) -> AnnotatedLine {
        AnnotatedLine::join(&self.old_lines)
    }

    /// The new pane text of this delta as a single annotated string.
    pub fn new_text(&self) -> AnnotatedLine {
        AnnotatedLine::join(&self.new_lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_bookkeeping() {
        let chunk = Chunk::new(3, vec!["ab".into(), "cde".into()]);
        assert_eq!(chunk.size(), 2);
        assert_eq!(chunk.end(), 5);
        assert_eq!(chunk.text_len(), 5);
        assert!(!chunk.is_empty());
        assert!(Chunk::default().is_empty());
    }

    #[test]
    fn new_delta_has_no_rows() {
        let delta = Delta::new(DeltaKind::Equal, Chunk::default(), Chunk::default());
        assert!(delta.is_equal());
        assert!(delta.old_lines.is_empty());
        assert_eq!(delta.old_text(), AnnotatedLine::default());
    }

    #[test]
    fn kind_display() {
        assert_eq!(DeltaKind::Change.to_string(), "CHANGE");
        assert_eq!(DeltaKind::Insert.to_string(), "INSERT");
    }
}
