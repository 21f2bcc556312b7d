//! Error types for the Order actor.

use crate::table_actor::TableError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order data provided is invalid (no items, zero quantity).
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// The operation is not allowed in the order's current state.
    #[error("Invalid order transition: {0}")]
    InvalidTransition(String),

    /// The order refers to a table that does not exist.
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// The table actor refused or failed the occupancy change.
    #[error("Table update failed: {0}")]
    TableError(String),

    /// The orders could not be written to storage.
    #[error("Order storage error: {0}")]
    StorageError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl From<TableError> for OrderError {
    fn from(e: TableError) -> Self {
        match e {
            TableError::NotFound(table) => OrderError::UnknownTable(table),
            other => OrderError::TableError(other.to_string()),
        }
    }
}
