use thiserror::Error;

/// Errors produced while validating shared types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("configuration lists no root directories")]
    NoRoots,

    #[error("alias group {index} is empty")]
    EmptyAliasGroup { index: usize },
}
