//! Diff engine for diffm.
//!
//! Turns two content versions of a logical file into an ordered delta list
//! with word- or char-level highlighting, and drives the whole two-tree
//! comparison.
//!
//! # Key Types
//!
//! - [`compare`] / [`ComparisonResult`] / [`FileComparison`] -- Whole-run orchestration
//! - [`FileDiffer`] -- Content resolution and annotation for one logical file
//! - [`diff_lines`] -- Line-level delta list
//! - [`RowGenerator`] / [`DiffRow`] -- Marked-up rows for one non-equal delta

pub mod compare;
pub mod error;
pub mod file_diff;
pub mod line_diff;
pub mod rows;

pub use compare::{compare, compare_files, ComparisonResult, FileComparison, FileFailure};
pub use error::{DiffError, DiffResult};
pub use file_diff::FileDiffer;
pub use line_diff::{diff_lines, line_count};
pub use rows::{DiffRow, RowGenerator};
