//! Error types for message-index operations.

use thiserror::Error;

/// Errors that can occur while consulting or updating the message index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The index backend could not be read.
    #[error("index read failed: {0}")]
    Read(String),

    /// The index backend rejected a write.
    #[error("index write failed: {0}")]
    Write(String),

    /// I/O error from a file-backed index.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for index operations.
pub type IndexResult<T> = Result<T, IndexError>;
