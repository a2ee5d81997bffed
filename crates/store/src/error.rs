//! Store error model.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure at the persistence boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The addressed row does not exist.
    #[error("row not found")]
    NotFound,

    /// A uniqueness rule was violated (duplicate id or product code).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backing store failed (lock poisoning, transport, ...).
    #[error("backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
