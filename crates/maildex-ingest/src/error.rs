//! Error types for scan orchestration.

use thiserror::Error;

/// Errors from an ingestion step, wrapping whichever layer failed.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("index error: {0}")]
    Index(#[from] maildex_index::IndexError),

    #[error("object store error: {0}")]
    Git(#[from] maildex_git::GitError),
}

/// Result alias for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;
