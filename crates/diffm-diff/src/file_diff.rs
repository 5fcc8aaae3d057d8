//! File-pair diff: resolve one logical file under both roots and produce its
//! annotated delta list.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use diffm_markup::extract_escaped;
use diffm_tree::ExclusionFilter;
use diffm_types::{Delta, InlineGranularity, LogicalFile, ReconciliationConfig, Side};
use tracing::{debug, warn};

use crate::error::{DiffError, DiffResult};
use crate::line_diff::diff_lines;
use crate::rows::RowGenerator;

/// Diffs logical files between a fixed pair of roots.
#[derive(Clone, Debug)]
pub struct FileDiffer {
    old_root: PathBuf,
    new_root: PathBuf,
    rows: RowGenerator,
    filters: Option<(ExclusionFilter, ExclusionFilter)>,
}

impl FileDiffer {
    pub fn new(
        old_root: impl Into<PathBuf>,
        new_root: impl Into<PathBuf>,
        granularity: InlineGranularity,
    ) -> Self {
        Self {
            old_root: old_root.into(),
            new_root: new_root.into(),
            rows: RowGenerator::new(granularity),
            filters: None,
        }
    }

    /// A differ for the first and last configured roots.
    ///
    /// Alias candidates excluded by the config's ignore policy are never read.
    pub fn from_config(config: &ReconciliationConfig) -> DiffResult<Self> {
        let old_root = config.old_root()?;
        let new_root = config.new_root()?;
        let filters = (
            ExclusionFilter::for_root(old_root, config)?,
            ExclusionFilter::for_root(new_root, config)?,
        );
        Ok(Self {
            filters: Some(filters),
            ..Self::new(old_root, new_root, config.inline)
        })
    }

    pub fn old_root(&self) -> &Path {
        &self.old_root
    }

    pub fn new_root(&self) -> &Path {
        &self.new_root
    }

    /// Compute the ordered deltas for `file`.
    ///
    /// `side` says where the reconciler found the file; an alias group that
    /// should be present on a side but has no existing candidate there is an
    /// [`DiffError::UnresolvableAlias`]. Missing or unreadable direct files
    /// compare as empty content.
    pub fn diff(&self, file: &LogicalFile, side: Side) -> DiffResult<Vec<Delta>> {
        let (old_filter, new_filter) = match &self.filters {
            Some((old, new)) => (Some(old), Some(new)),
            None => (None, None),
        };
        let old = resolve_content(&self.old_root, old_filter, file, side.in_old())?;
        let new = resolve_content(&self.new_root, new_filter, file, side.in_new())?;

        let deltas = self.diff_text(&old, &new);
        debug!(%file, deltas = deltas.len(), "diffed file");
        Ok(deltas)
    }

    /// Annotated deltas between two contents.
    pub fn diff_text(&self, old: &str, new: &str) -> Vec<Delta> {
        let mut deltas = diff_lines(old, new);
        for delta in deltas.iter_mut().filter(|d| !d.is_equal()) {
            self.annotate(delta);
        }
        deltas
    }

    fn annotate(&self, delta: &mut Delta) {
        let rows = self.rows.generate(&delta.source.lines, &delta.target.lines);
        delta.old_lines = rows.iter().map(|row| extract_escaped(&row.old_line)).collect();
        delta.new_lines = rows.iter().map(|row| extract_escaped(&row.new_line)).collect();
    }
}

/// Content of `file` under `root`.
///
/// Alias groups use their first existing candidate that `filter` does not
/// exclude. Different roots may resolve different candidates.
fn resolve_content(
    root: &Path,
    filter: Option<&ExclusionFilter>,
    file: &LogicalFile,
    present: bool,
) -> DiffResult<String> {
    match file {
        LogicalFile::Direct(path) => Ok(read_or_empty(&root.join(path))),
        LogicalFile::AliasGroup(candidates) => {
            let found = candidates
                .iter()
                .filter(|candidate| {
                    !filter.is_some_and(|f| f.excludes_relative(root, candidate))
                })
                .map(|candidate| root.join(candidate))
                .find(|path| path.is_file());
            match found {
                Some(path) => Ok(read_or_empty(&path)),
                None if present => Err(DiffError::UnresolvableAlias {
                    candidates: candidates.clone(),
                    root: root.to_path_buf(),
                }),
                None => Ok(String::new()),
            }
        }
    }
}

/// Missing files are empty; unreadable or non-UTF-8 files are logged and
/// treated as empty.
fn read_or_empty(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "unreadable file compared as empty");
            String::new()
        }
    }
}
