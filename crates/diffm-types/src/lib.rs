//! Shared data model for diffm.
//!
//! Every other diffm crate depends on `diffm-types`.
//!
//! # Key Types
//!
//! - [`LogicalFile`] -- Direct path or alias group identifying one file across two trees
//! - [`Side`] -- Whether a logical file was found in the old tree, the new tree, or both
//! - [`ReconciliationConfig`] -- Roots, ignore rules, and alias groups for a run
//! - [`Delta`] / [`Chunk`] / [`DeltaKind`] -- One line-level edit operation
//! - [`AnnotatedLine`] / [`StyleRange`] -- Plain text plus highlighted sub-ranges

pub mod annotation;
pub mod config;
pub mod delta;
pub mod error;
pub mod file;

pub use annotation::{AnnotatedLine, StyleKind, StyleRange};
pub use config::{InlineGranularity, ReconciliationConfig};
pub use delta::{Chunk, Delta, DeltaKind};
pub use error::TypeError;
pub use file::{LogicalFile, Side};
