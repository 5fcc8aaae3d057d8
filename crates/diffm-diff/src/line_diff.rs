//! Line-level diff: the ordered delta list between two file contents.
//!
//! Uses the `similar` crate (Myers diff algorithm). The deltas partition both
//! line ranges: every old line and every new line belongs to exactly one
//! delta, and equal regions are kept as [`DeltaKind::Equal`] deltas.

use std::ops::Range;

use diffm_types::{Chunk, Delta, DeltaKind};
use similar::{DiffTag, TextDiff};

/// Compute the delta list between two texts split into lines.
///
/// Both sides are split with [`str::lines`], so line terminators (`\n` or
/// `\r\n`) and a missing final newline never count as differences.
pub fn diff_lines(old: &str, new: &str) -> Vec<Delta> {
    let old_lines: Vec<&str> = old.lines().collect();
    let new_lines: Vec<&str> = new.lines().collect();
    let text_diff = TextDiff::from_slices(old_lines.as_slice(), new_lines.as_slice());

    text_diff
        .ops()
        .iter()
        .map(|op| {
            let (tag, old_range, new_range) = op.as_tag_tuple();
            let kind = match tag {
                DiffTag::Equal => DeltaKind::Equal,
                DiffTag::Delete => DeltaKind::Delete,
                DiffTag::Insert => DeltaKind::Insert,
                DiffTag::Replace => DeltaKind::Change,
            };
            Delta::new(
                kind,
                chunk(&old_lines, old_range),
                chunk(&new_lines, new_range),
            )
        })
        .collect()
}

/// Number of lines `text` splits into, matching [`diff_lines`].
pub fn line_count(text: &str) -> usize {
    text.lines().count()
}

fn chunk(lines: &[&str], range: Range<usize>) -> Chunk {
    let position = range.start;
    let lines = lines[range].iter().map(|line| line.to_string()).collect();
    Chunk::new(position, lines)
}
