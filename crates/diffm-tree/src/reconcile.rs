//! Three-way partition of two trees into common, old-only, and new-only
//! logical files.

use std::collections::HashSet;
use std::path::Path;

use diffm_types::{LogicalFile, ReconciliationConfig, Side};
use serde::Serialize;
use tracing::info;

use crate::error::TreeResult;
use crate::walk::list_files;

/// The logical files of both trees and their partition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    /// Files under the old root, in walk order.
    pub old: Vec<LogicalFile>,
    /// Files under the new root, in walk order.
    pub new: Vec<LogicalFile>,
    /// Present in both trees, in new-tree order.
    pub common: Vec<LogicalFile>,
    /// Present only in the old tree.
    pub only_old: Vec<LogicalFile>,
    /// Present only in the new tree.
    pub only_new: Vec<LogicalFile>,
}

/// A logical file of the comparison universe together with where it was found.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ReconciledFile {
    pub file: LogicalFile,
    pub side: Side,
}

impl Reconciliation {
    /// Partition two deduplicated file lists.
    pub fn from_sets(old: Vec<LogicalFile>, new: Vec<LogicalFile>) -> Self {
        let old_set: HashSet<&LogicalFile> = old.iter().collect();
        let new_set: HashSet<&LogicalFile> = new.iter().collect();

        let common = new.iter().filter(|f| old_set.contains(f)).cloned().collect();
        let only_old = old.iter().filter(|f| !new_set.contains(f)).cloned().collect();
        let only_new = new.iter().filter(|f| !old_set.contains(f)).cloned().collect();

        Self {
            old,
            new,
            common,
            only_old,
            only_new,
        }
    }

    /// Every logical file present on at least one side, exactly once:
    /// common files first, then old-only, then new-only.
    pub fn universe(&self) -> Vec<ReconciledFile> {
        let tagged = |files: &[LogicalFile], side: Side| {
            files
                .iter()
                .map(move |file| ReconciledFile {
                    file: file.clone(),
                    side,
                })
                .collect::<Vec<_>>()
        };
        let mut universe = tagged(self.common.as_slice(), Side::Both);
        universe.extend(tagged(self.only_old.as_slice(), Side::OldOnly));
        universe.extend(tagged(self.only_new.as_slice(), Side::NewOnly));
        universe
    }

    /// Number of files in the universe.
    pub fn len(&self) -> usize {
        self.common.len() + self.only_old.len() + self.only_new.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if both trees hold the same logical files.
    pub fn same_listing(&self) -> bool {
        self.only_old.is_empty() && self.only_new.is_empty()
    }
}

/// Walk both roots and partition their logical files.
pub fn reconcile(
    old_root: &Path,
    new_root: &Path,
    config: &ReconciliationConfig,
) -> TreeResult<Reconciliation> {
    config.validate()?;
    let old = list_files(old_root, config)?;
    let new = list_files(new_root, config)?;
    let reconciliation = Reconciliation::from_sets(old, new);

    info!(
        common = reconciliation.common.len(),
        only_old = reconciliation.only_old.len(),
        only_new = reconciliation.only_new.len(),
        "reconciled trees"
    );
    Ok(reconciliation)
}

/// [`reconcile`] using the first and last configured roots.
pub fn reconcile_config(config: &ReconciliationConfig) -> TreeResult<Reconciliation> {
    reconcile(config.old_root()?, config.new_root()?, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TreeError;
    use crate::test_support::write_file;

    fn direct(paths: &[&str]) -> Vec<LogicalFile> {
        paths.iter().map(|p| LogicalFile::direct(*p)).collect()
    }

    #[test]
    fn partitions_overlapping_sets() {
        let old = tempfile::tempdir().unwrap();
        let new = tempfile::tempdir().unwrap();
        for name in ["a", "b", "c"] {
            write_file(old.path(), name, name);
        }
        for name in ["b", "c", "d"] {
            write_file(new.path(), name, name);
        }

        let config = ReconciliationConfig::new(old.path(), new.path());
        let r = reconcile_config(&config).unwrap();
        assert_eq!(r.common, direct(&["b", "c"]));
        assert_eq!(r.only_old, direct(&["a"]));
        assert_eq!(r.only_new, direct(&["d"]));
        assert_eq!(r.len(), 4);
        assert!(!r.same_listing());

        let universe = r.universe();
        assert_eq!(universe.len(), 4);
        assert_eq!(universe[0].side, Side::Both);
        assert_eq!(
            universe[2],
            ReconciledFile {
                file: LogicalFile::direct("a"),
                side: Side::OldOnly
            }
        );
        assert_eq!(universe[3].side, Side::NewOnly);
    }

    #[test]
    fn alias_group_is_common_across_renames() {
        let old = tempfile::tempdir().unwrap();
        let new = tempfile::tempdir().unwrap();
        write_file(old.path(), "old/name.txt", "X");
        write_file(new.path(), "new/name.txt", "Y");

        let mut config = ReconciliationConfig::new(old.path(), new.path());
        config.alias_groups = vec![vec!["old/name.txt".into(), "new/name.txt".into()]];
        let r = reconcile_config(&config).unwrap();

        let group = LogicalFile::alias(["old/name.txt", "new/name.txt"]);
        assert_eq!(r.common, vec![group]);
        assert!(r.same_listing());
        assert_eq!(r.universe().len(), 1);
    }

    #[test]
    fn alias_present_on_one_side_only() {
        let old = tempfile::tempdir().unwrap();
        let new = tempfile::tempdir().unwrap();
        write_file(old.path(), "legacy.cfg", "X");
        write_file(new.path(), "other.txt", "Y");

        let mut config = ReconciliationConfig::new(old.path(), new.path());
        config.alias_groups = vec![vec!["legacy.cfg".into(), "modern.cfg".into()]];
        let r = reconcile_config(&config).unwrap();
        assert_eq!(r.only_old, vec![LogicalFile::alias(["legacy.cfg", "modern.cfg"])]);
        assert_eq!(r.only_new, direct(&["other.txt"]));
    }

    #[test]
    fn identical_trees() {
        let old = tempfile::tempdir().unwrap();
        let new = tempfile::tempdir().unwrap();
        write_file(old.path(), "same.txt", "1");
        write_file(new.path(), "same.txt", "2");

        let config = ReconciliationConfig::new(old.path(), new.path());
        let r = reconcile_config(&config).unwrap();
        assert!(r.same_listing());
        assert_eq!(r.common, direct(&["same.txt"]));
    }

    #[test]
    fn empty_trees_have_empty_universe() {
        let r = Reconciliation::from_sets(Vec::new(), Vec::new());
        assert!(r.is_empty());
        assert!(r.universe().is_empty());
    }

    #[test]
    fn missing_new_root_is_fatal() {
        let old = tempfile::tempdir().unwrap();
        let config = ReconciliationConfig::new(old.path(), old.path().join("absent"));
        let err = reconcile_config(&config).unwrap_err();
        assert!(matches!(err, TreeError::MissingRoot { .. }));
    }

    #[test]
    fn config_without_roots_is_rejected() {
        let err = reconcile_config(&ReconciliationConfig::default()).unwrap_err();
        assert!(matches!(err, TreeError::Config(_)));
    }
}
