//! Tree reconciliation for diffm.
//!
//! Walks two root directories, applies the exclusion policy (hidden entries,
//! `.gitignore` rules, wildcard patterns), maps alias-group members onto one
//! logical identity, and partitions the result into common, old-only, and
//! new-only files.
//!
//! # Key Types
//!
//! - [`Reconciliation`] -- The three-way partition of both trees
//! - [`ReconciledFile`] -- A logical file of the comparison universe and its [`Side`](diffm_types::Side)
//! - [`ExclusionFilter`] -- Per-root exclusion policy
//! - [`WildcardPattern`] -- `*`/`?` ignore pattern

pub mod error;
pub mod filter;
pub mod pattern;
pub mod reconcile;
pub mod walk;

pub use error::{TreeError, TreeResult};
pub use filter::ExclusionFilter;
pub use pattern::WildcardPattern;
pub use reconcile::{reconcile, reconcile_config, ReconciledFile, Reconciliation};
pub use walk::{check_root, list_files, relative_path};
