//! Error types for rateshelf
//!
//! One error enum shared by every layer, with a matching `Result`
//! alias.

use thiserror::Error;

use crate::model::ProductId;

/// Result type alias using ShelfError
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Unified error type for rateshelf operations
#[derive(Debug, Error)]
pub enum ShelfError {
    // -------------------------------------------------------------------------
    // Filesystem Errors
    // -------------------------------------------------------------------------
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Persistence Errors
    // -------------------------------------------------------------------------
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Serialization failure: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Catalog Errors
    // -------------------------------------------------------------------------
    #[error("Product with id {0} not found")]
    ProductNotFound(ProductId),

    // -------------------------------------------------------------------------
    // Wire Errors
    // -------------------------------------------------------------------------
    #[error("Wire protocol error: {0}")]
    Protocol(String),
}
