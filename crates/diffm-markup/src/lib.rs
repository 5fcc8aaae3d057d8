//! Inline annotation markup.
//!
//! The diff-row generator marks changed spans as
//! `<annotation color="red">…</annotation>` (removed) or
//! `<annotation color="green">…</annotation>` (added). Tags never nest.
//! [`extract`] decodes a marked-up line into an [`AnnotatedLine`]. Source text
//! placed inside markup is [`escape`]d first and read back with
//! [`extract_escaped`].
//!
//! [`AnnotatedLine`]: diffm_types::AnnotatedLine

pub mod escape;
pub mod extract;
pub mod tag;

pub use escape::{escape, extract_escaped, unescape};
pub use extract::extract;
pub use tag::{kind_for_color, open_tag, push_wrapped, wrap, CLOSE_TAG};
