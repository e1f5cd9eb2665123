//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::selection::CategoryId;

/// Domain errors represent violations of the tree-building rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("cycle detected in category hierarchy at: {0}")]
    CycleDetected(CategoryId),

    #[error("internal tree operation failed: {0}")]
    InternalError(String),
}
