//! Common error types for Chinook Insights

use thiserror::Error;

/// Common result type for Chinook Insights operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the workspace
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A store row references an entity that does not exist.
    /// Raised while loading projections, never inside the classifier.
    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrity(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
