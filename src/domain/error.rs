//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent contract violations of the tree model.
///
/// The tree-building operations themselves never fail; these are raised only
/// by strict parsers and by validation of hand-authored base trees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid selection id: {0}")]
    InvalidSelectionId(String),

    #[error("unknown display mode: {0}")]
    UnknownDisplayMode(String),

    #[error("invalid topic node '{name}': {reason}")]
    InvalidNode { name: String, reason: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
