use std::fmt;

use serde::{Deserialize, Serialize};

/// The unit of comparison across the two trees.
///
/// Relative paths always use `/` as the separator. Identity is by value:
/// two `AliasGroup`s are the same logical file only if their candidate lists
/// match exactly, in order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalFile {
    /// A single relative path, identical in both trees.
    Direct(String),
    /// Candidate relative paths treated as one file. Content comes from the
    /// first candidate that exists under a given root.
    AliasGroup(Vec<String>),
}

impl LogicalFile {
    /// Create a direct entry for a relative path.
    pub fn direct(path: impl Into<String>) -> Self {
        Self::Direct(path.into())
    }

    /// Create an alias group from its candidate paths.
    pub fn alias<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AliasGroup(candidates.into_iter().map(Into::into).collect())
    }

    /// Relative paths that may hold this file's content, in resolution order.
    pub fn candidates(&self) -> &[String] {
        match self {
            Self::Direct(path) => std::slice::from_ref(path),
            Self::AliasGroup(paths) => paths,
        }
    }

    /// Returns `true` if `path` is this file's path or one of its aliases.
    pub fn matches_path(&self, path: &str) -> bool {
        self.candidates().iter().any(|c| c == path)
    }

    pub fn is_alias(&self) -> bool {
        matches!(self, Self::AliasGroup(_))
    }
}

impl fmt::Display for LogicalFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct(path) => f.write_str(path),
            Self::AliasGroup(paths) => write!(f, "{{{}}}", paths.join(" | ")),
        }
    }
}

/// Which of the two trees a logical file was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Both,
    OldOnly,
    NewOnly,
}

impl Side {
    pub fn in_old(self) -> bool {
        matches!(self, Self::Both | Self::OldOnly)
    }

    pub fn in_new(self) -> bool {
        matches!(self, Self::Both | Self::NewOnly)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Both => "common",
            Self::OldOnly => "only-old",
            Self::NewOnly => "only-new",
        };
        f.write_str(label)
    }
}
