//! Error types for object-store operations.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors from driving the external `git` process.
#[derive(Debug, Error)]
pub enum GitError {
    /// The external command could not be launched.
    #[error("could not launch `{command}`: {source}")]
    Launch {
        command: String,
        source: std::io::Error,
    },

    /// I/O failure while streaming the command's output.
    #[error("error reading output of `{command}`: {source}")]
    Stream {
        command: String,
        source: std::io::Error,
    },

    /// The destination file for an extracted blob could not be created.
    #[error("could not create {}: {source}", path.display())]
    CreateDest {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Waiting for the spawned command failed.
    #[error("could not wait for `{command}`: {source}")]
    Wait {
        command: String,
        source: std::io::Error,
    },

    /// The command exited unsuccessfully on a path where its status matters.
    #[error("`{command}` exited with {status}")]
    Exit {
        command: String,
        status: ExitStatus,
    },
}

/// Result alias for object-store operations.
pub type GitResult<T> = Result<T, GitError>;
