//! Comparison orchestrator: reconcile two trees and diff every logical file.
//!
//! [`compare`] is a pure function of its config; it holds no state between
//! calls. Files are diffed in parallel on the rayon pool and the result keeps
//! the reconciler's enumeration order.

use diffm_tree::{check_root, reconcile, ReconciledFile};
use diffm_types::{Delta, DeltaKind, LogicalFile, ReconciliationConfig, Side};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::DiffResult;
use crate::file_diff::FileDiffer;

/// The ordered deltas of one differing logical file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileComparison {
    pub file: LogicalFile,
    pub side: Side,
    pub deltas: Vec<Delta>,
}

impl FileComparison {
    /// Deltas other than [`DeltaKind::Equal`].
    pub fn changes(&self) -> impl Iterator<Item = &Delta> {
        self.deltas.iter().filter(|d| !d.is_equal())
    }

    /// Returns `true` if any delta is not equal.
    pub fn has_changes(&self) -> bool {
        self.changes().next().is_some()
    }

    /// Old lines covered by delete and change deltas.
    pub fn removed_lines(&self) -> usize {
        self.changes()
            .filter(|d| matches!(d.kind, DeltaKind::Delete | DeltaKind::Change))
            .map(|d| d.source.size())
            .sum()
    }

    /// New lines covered by insert and change deltas.
    pub fn added_lines(&self) -> usize {
        self.changes()
            .filter(|d| matches!(d.kind, DeltaKind::Insert | DeltaKind::Change))
            .map(|d| d.target.size())
            .sum()
    }
}

/// A logical file skipped because its comparison failed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub file: LogicalFile,
    pub message: String,
}

/// Result of one comparison run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    /// Differing files in enumeration order.
    pub files: Vec<FileComparison>,
    /// Files that could not be compared.
    pub failures: Vec<FileFailure>,
}

impl ComparisonResult {
    /// Returns `true` if no file differs.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of differing files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn get(&self, file: &LogicalFile) -> Option<&FileComparison> {
        self.files.iter().find(|c| &c.file == file)
    }

    /// The comparison whose logical file is, or aliases, `path`.
    pub fn find_path(&self, path: &str) -> Option<&FileComparison> {
        self.files.iter().find(|c| c.file.matches_path(path))
    }
}

/// Run a complete comparison for `config`.
///
/// Fails only on configuration errors or an unreadable root; per-file errors
/// are collected in [`ComparisonResult::failures`].
pub fn compare(config: &ReconciliationConfig) -> DiffResult<ComparisonResult> {
    config.validate()?;
    let old_root = config.old_root()?;
    let new_root = config.new_root()?;
    check_root(old_root)?;
    check_root(new_root)?;

    let reconciliation = reconcile(old_root, new_root, config)?;
    let differ = FileDiffer::from_config(config)?;
    let result = compare_files(&differ, reconciliation.universe());

    info!(
        differing = result.files.len(),
        failed = result.failures.len(),
        "comparison complete"
    );
    Ok(result)
}

/// Diff every file of `universe` and keep the ones that differ.
pub fn compare_files(differ: &FileDiffer, universe: Vec<ReconciledFile>) -> ComparisonResult {
    let outcomes: Vec<_> = universe
        .into_par_iter()
        .map(|entry| {
            let outcome = differ.diff(&entry.file, entry.side);
            (entry, outcome)
        })
        .collect();

    let mut result = ComparisonResult::default();
    for (entry, outcome) in outcomes {
        match outcome {
            Ok(deltas) => {
                let comparison = FileComparison {
                    file: entry.file,
                    side: entry.side,
                    deltas,
                };
                if comparison.has_changes() {
                    result.files.push(comparison);
                } else {
                    debug!(file = %comparison.file, "identical");
                }
            }
            Err(err) => {
                warn!(file = %entry.file, error = %err, "skipping file");
                result.failures.push(FileFailure {
                    file: entry.file,
                    message: err.to_string(),
                });
            }
        }
    }
    result
}
