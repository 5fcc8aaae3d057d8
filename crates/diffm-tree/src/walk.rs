//! Recursive enumeration of one root into logical files.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path};

use diffm_types::{LogicalFile, ReconciliationConfig};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::{TreeError, TreeResult};
use crate::filter::ExclusionFilter;

/// Fail with [`TreeError::MissingRoot`] unless `root` is a listable directory.
pub fn check_root(root: &Path) -> TreeResult<()> {
    fs::read_dir(root)
        .map(drop)
        .map_err(|source| TreeError::MissingRoot {
            path: root.to_path_buf(),
            source,
        })
}

/// Path of `path` relative to `root`, joined with `/`.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let stripped = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = stripped
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// Every logical file under `root`, deduplicated, in walk order.
///
/// Entries are visited sorted by file name. Unreadable entries below the root
/// are logged and skipped.
pub fn list_files(root: &Path, config: &ReconciliationConfig) -> TreeResult<Vec<LogicalFile>> {
    check_root(root)?;
    let filter = ExclusionFilter::for_root(root, config)?;

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            match relative_path(root, entry.path()) {
                Some(relative) => !filter.excludes(entry, &relative),
                None => false,
            }
        });

    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(relative) = relative_path(root, entry.path()) else {
            continue;
        };
        let file = match config.alias_group_for(&relative) {
            Some(group) => LogicalFile::AliasGroup(group.to_vec()),
            None => LogicalFile::Direct(relative),
        };
        if seen.insert(file.clone()) {
            files.push(file);
        }
    }

    debug!(root = %root.display(), files = files.len(), "listed tree");
    Ok(files)
}
