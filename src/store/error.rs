//! Errors surfaced by store operations.

use crate::domain::NoteId;
use thiserror::Error;

/// Errors that store operations report back to the caller.
///
/// Storage failures are deliberately absent: they are absorbed by
/// [`PersistenceAdapter`](crate::infra::PersistenceAdapter).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A required field is empty or otherwise unacceptable.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// No note has the given id.
    #[error("note not found: {id}")]
    NotFound { id: NoteId },

    /// No category has the given name.
    #[error("category not found: {name}")]
    CategoryNotFound { name: String },

    /// A category with the same name already exists.
    #[error("category already exists: {name}")]
    Duplicate { name: String },

    /// Default categories cannot be removed.
    #[error("category '{name}' is a default category and cannot be removed")]
    ProtectedCategory { name: String },

    /// An import payload is not a sequence of note records.
    #[error("invalid import document: {reason}")]
    Format { reason: String },
}

impl StoreError {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    pub(crate) fn format(reason: impl Into<String>) -> Self {
        Self::Format {
            reason: reason.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
