//! Error types for message parsing.

use thiserror::Error;

/// Errors from turning raw bytes into a [`Message`](crate::Message).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MailError {
    /// The input held no bytes at all. Retrieval of an unknown blob yields
    /// exactly this shape, so it gets its own variant.
    #[error("empty message")]
    Empty,

    /// The input had bytes but no recognizable message structure.
    #[error("malformed message: {0}")]
    Malformed(String),
}

/// Result alias for parsing operations.
pub type MailResult<T> = Result<T, MailError>;
