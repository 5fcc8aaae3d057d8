//! Exclusion policy applied to every walked entry.

use std::ffi::OsStr;
use std::path::Path;

use diffm_types::ReconciliationConfig;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::{debug, warn};
use walkdir::DirEntry;

use crate::error::TreeResult;
use crate::pattern::WildcardPattern;

/// Decides which entries under one root are left out of the comparison.
///
/// An excluded directory is never descended into.
#[derive(Clone, Debug)]
pub struct ExclusionFilter {
    ignore_hidden: bool,
    patterns: Vec<WildcardPattern>,
    vcs: Option<Gitignore>,
}

impl ExclusionFilter {
    /// Build the filter for `root` from the run's config.
    pub fn for_root(root: &Path, config: &ReconciliationConfig) -> TreeResult<Self> {
        let patterns = WildcardPattern::compile_all(&config.ignore_patterns)?;
        let vcs = if config.use_vcs_ignore {
            load_gitignore(root)
        } else {
            None
        };
        Ok(Self {
            ignore_hidden: config.ignore_hidden,
            patterns,
            vcs,
        })
    }

    /// Returns `true` if the entry (with its root-relative path) is dropped.
    pub fn excludes(&self, entry: &DirEntry, relative: &str) -> bool {
        let hidden = self.ignore_hidden && is_hidden(entry);
        self.excludes_at(
            entry.path(),
            entry.file_name(),
            relative,
            entry.file_type().is_dir(),
            hidden,
        )
    }

    /// Returns `true` if the walk under `root` would never reach `relative`:
    /// the path itself or one of its parent directories is excluded.
    pub fn excludes_relative(&self, root: &Path, relative: &str) -> bool {
        let parts: Vec<&str> = relative.split('/').filter(|p| !p.is_empty()).collect();
        let mut prefix = String::with_capacity(relative.len());
        for (i, part) in parts.iter().enumerate() {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(part);
            let path = root.join(&prefix);
            let is_dir = i + 1 < parts.len() || path.is_dir();
            let hidden =
                self.ignore_hidden && (part.starts_with('.') || has_hidden_attribute(&path));
            if self.excludes_at(&path, OsStr::new(part), &prefix, is_dir, hidden) {
                return true;
            }
        }
        false
    }

    fn excludes_at(
        &self,
        path: &Path,
        name: &OsStr,
        relative: &str,
        is_dir: bool,
        hidden: bool,
    ) -> bool {
        if hidden {
            return true;
        }
        if let Some(vcs) = &self.vcs {
            if is_dir && name == ".git" {
                return true;
            }
            if vcs.matched(path, is_dir).is_ignore() {
                return true;
            }
        }
        self.patterns.iter().any(|p| p.matches(relative))
    }
}

fn load_gitignore(root: &Path) -> Option<Gitignore> {
    let path = root.join(".gitignore");
    if !path.is_file() {
        return None;
    }
    let mut builder = GitignoreBuilder::new(root);
    if let Some(err) = builder.add(&path) {
        warn!(path = %path.display(), error = %err, "partially invalid .gitignore");
    }
    match builder.build() {
        Ok(gitignore) => {
            debug!(path = %path.display(), rules = gitignore.num_ignores(), "loaded .gitignore");
            Some(gitignore)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unusable .gitignore");
            None
        }
    }
}

/// Dot-prefixed names are hidden everywhere; Windows also honours the
/// hidden attribute.
pub fn is_hidden(entry: &DirEntry) -> bool {
    if entry.file_name().to_string_lossy().starts_with('.') {
        return true;
    }
    has_hidden_attribute(entry.path())
}

#[cfg(windows)]
fn has_hidden_attribute(path: &Path) -> bool {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    std::fs::metadata(path)
        .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(not(windows))]
fn has_hidden_attribute(_path: &Path) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use std::fs;

    use walkdir::WalkDir;

    use super::*;

    fn entry_for(root: &Path, name: &str) -> DirEntry {
        WalkDir::new(root)
            .into_iter()
            .filter_map(Result::ok)
            .find(|e| e.file_name() == name)
            .unwrap()
    }

    #[test]
    fn hidden_entries_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env"), "x").unwrap();
        fs::write(dir.path().join("visible"), "x").unwrap();
        assert!(is_hidden(&entry_for(dir.path(), ".env")));
        assert!(!is_hidden(&entry_for(dir.path(), "visible")));
    }

    #[test]
    fn hidden_filter_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env"), "x").unwrap();
        let mut config = ReconciliationConfig::new(dir.path(), dir.path());
        config.ignore_hidden = false;
        config.use_vcs_ignore = false;
        let filter = ExclusionFilter::for_root(dir.path(), &config).unwrap();
        assert!(!filter.excludes(&entry_for(dir.path(), ".env"), ".env"));
    }

    #[test]
    fn wildcard_patterns_exclude() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("app.log"), "x").unwrap();
        let mut config = ReconciliationConfig::new(dir.path(), dir.path());
        config.ignore_patterns = vec!["*.log".into()];
        let filter = ExclusionFilter::for_root(dir.path(), &config).unwrap();
        assert!(filter.excludes(&entry_for(dir.path(), "app.log"), "app.log"));
    }

    #[test]
    fn gitignore_rules_apply_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".gitignore"), "*.bak\n").unwrap();
        fs::write(dir.path().join("notes.bak"), "x").unwrap();

        let mut config = ReconciliationConfig::new(dir.path(), dir.path());
        let filter = ExclusionFilter::for_root(dir.path(), &config).unwrap();
        assert!(filter.excludes(&entry_for(dir.path(), "notes.bak"), "notes.bak"));

        config.use_vcs_ignore = false;
        let filter = ExclusionFilter::for_root(dir.path(), &config).unwrap();
        assert!(!filter.excludes(&entry_for(dir.path(), "notes.bak"), "notes.bak"));
    }

    #[test]
    fn relative_paths_follow_the_walk_policy() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("build/out")).unwrap();
        fs::create_dir_all(dir.path().join(".cache")).unwrap();
        fs::write(dir.path().join("build/out/a.txt"), "x").unwrap();
        fs::write(dir.path().join(".cache/b.txt"), "x").unwrap();
        fs::write(dir.path().join("app.log"), "x").unwrap();
        fs::write(dir.path().join("keep.txt"), "x").unwrap();

        let mut config = ReconciliationConfig::new(dir.path(), dir.path());
        config.ignore_patterns = vec!["build".into(), "*.log".into()];
        let filter = ExclusionFilter::for_root(dir.path(), &config).unwrap();
        assert!(filter.excludes_relative(dir.path(), "build/out/a.txt"));
        assert!(filter.excludes_relative(dir.path(), ".cache/b.txt"));
        assert!(filter.excludes_relative(dir.path(), "app.log"));
        assert!(!filter.excludes_relative(dir.path(), "keep.txt"));
        assert!(!filter.excludes_relative(dir.path(), "not/there.txt"));
    }
}
