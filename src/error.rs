//! Error types for quillboard.

use thiserror::Error;

/// Common error type for quillboard.
#[derive(Error, Debug)]
pub enum QuillError {
    /// Database error.
    ///
    /// Wraps errors from any database backend; sqlx errors convert
    /// automatically.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for admin input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for QuillError {
    fn from(e: sqlx::Error) -> Self {
        QuillError::Database(e.to_string())
    }
}

/// Result type alias for quillboard operations.
pub type Result<T> = std::result::Result<T, QuillError>;
