//! Error types for the tree crate.

use std::path::PathBuf;

use diffm_types::TypeError;

/// Errors that can occur while reconciling two trees.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// A configured root does not exist or cannot be listed.
    #[error("root directory {path:?} is not readable: {source}")]
    MissingRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An ignore wildcard could not be compiled.
    #[error("invalid ignore pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] TypeError),
}

/// Convenience alias for tree results.
pub type TreeResult<T> = Result<T, TreeError>;
