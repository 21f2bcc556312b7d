//! Error types for the Customer actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    #[error("Frequent customer not found: {0}")]
    NotFound(String),

    /// Another customer already uses this name.
    #[error("Frequent customer already exists: {0}")]
    AlreadyExists(String),

    #[error("Frequent customer validation error: {0}")]
    ValidationError(String),

    #[error("Frequent customer storage error: {0}")]
    StorageError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CustomerError {
    fn from(msg: String) -> Self {
        CustomerError::ActorCommunicationError(msg)
    }
}
