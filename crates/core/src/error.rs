//! Error types for s3c-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for s3c-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for s3c-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid command arguments
    #[error("Invalid arguments: {0}")]
    Validation(String),

    /// Malformed or unsafe object key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Local filesystem failure (directory creation, read, write)
    #[error("Filesystem error: {0}")]
    Filesystem(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid endpoint URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Bucket or object does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication or permission failure
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Network error (retryable)
    #[error("Network error: {0}")]
    Network(String),

    /// Destination exists and overwrite was not requested
    #[error("File {0} exists. Use --overwrite to replace it")]
    OverwriteConflict(String),

    /// General error
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Validation(_) | Error::InvalidKey(_) => 2, // UsageError
            Error::Network(_) => 3,                           // NetworkError
            Error::AccessDenied(_) => 4,                      // AuthError
            Error::NotFound(_) => 5,                          // NotFound
            Error::OverwriteConflict(_) => 6,                 // Conflict
            _ => 1,                                           // GeneralError
        }
    }
}
