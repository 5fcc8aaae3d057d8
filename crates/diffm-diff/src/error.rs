//! Error types for the diff crate.

use std::path::PathBuf;

use diffm_tree::TreeError;
use diffm_types::TypeError;

/// Errors that can occur during diff operations.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// An alias group is present under a root but none of its candidates
    /// exist there.
    #[error("no candidate of alias group {candidates:?} exists under {root:?}")]
    UnresolvableAlias {
        candidates: Vec<String>,
        root: PathBuf,
    },

    /// Walking or reconciling the trees failed.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// The configuration failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] TypeError),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
