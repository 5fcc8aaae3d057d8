use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Policy for one comparison run.
///
/// The first root is the "old" tree and the last root is the "new" tree.
/// A single root is compared against itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconciliationConfig {
    #[serde(alias = "dirs")]
    pub roots: Vec<PathBuf>,
    /// Skip hidden files and directories.
    #[serde(alias = "ignoreHiddenFile")]
    pub ignore_hidden: bool,
    /// Honour `.gitignore` rules found at each root.
    #[serde(alias = "reuseVersionControlIgnoreConfig")]
    pub use_vcs_ignore: bool,
    /// Wildcard patterns (`*`, `?`) matched against root-relative paths.
    #[serde(alias = "ignoreFiles")]
    pub ignore_patterns: Vec<String>,
    /// Groups of relative paths that are compared as one logical file.
    pub alias_groups: Vec<Vec<String>>,
    /// Granularity of the highlighting inside changed lines.
    pub inline: InlineGranularity,
}

impl Default for ReconciliationConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            ignore_hidden: true,
            use_vcs_ignore: true,
            ignore_patterns: Vec::new(),
            alias_groups: Vec::new(),
            inline: InlineGranularity::default(),
        }
    }
}

impl ReconciliationConfig {
    /// Create a config comparing `old` against `new` with default policy.
    pub fn new(old: impl Into<PathBuf>, new: impl Into<PathBuf>) -> Self {
        Self {
            roots: vec![old.into(), new.into()],
            ..Self::default()
        }
    }

    /// Check the structural requirements of the config.
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.roots.is_empty() {
            return Err(TypeError::NoRoots);
        }
        if let Some(index) = self.alias_groups.iter().position(Vec::is_empty) {
            return Err(TypeError::EmptyAliasGroup { index });
        }
        Ok(())
    }

    pub fn old_root(&self) -> Result<&Path, TypeError> {
        self.roots.first().map(PathBuf::as_path).ok_or(TypeError::NoRoots)
    }

    pub fn new_root(&self) -> Result<&Path, TypeError> {
        self.roots.last().map(PathBuf::as_path).ok_or(TypeError::NoRoots)
    }

    /// The first alias group listing `path`, if any.
    pub fn alias_group_for(&self, path: &str) -> Option<&[String]> {
        self.alias_groups
            .iter()
            .find(|group| group.iter().any(|candidate| candidate == path))
            .map(Vec::as_slice)
    }
}

/// Token size used when highlighting changes within a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineGranularity {
    #[default]
    Word,
    Char,
}
