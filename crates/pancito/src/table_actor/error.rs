//! Error types for the Table actor.

use thiserror::Error;

/// Errors that can occur during table operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    /// The requested table was not found.
    #[error("Table not found: {0}")]
    NotFound(String),

    /// The table data provided is invalid.
    #[error("Table validation error: {0}")]
    ValidationError(String),

    /// The tables could not be written to storage.
    #[error("Table storage error: {0}")]
    StorageError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for TableError {
    fn from(msg: String) -> Self {
        TableError::ActorCommunicationError(msg)
    }
}
