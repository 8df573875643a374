use std::io;

use thiserror::Error;

/// Errors that end the interactive session early
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Top-level error returned by [`crate::run`]
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to start async runtime: {0}")]
    Runtime(io::Error),

    #[error(transparent)]
    Session(#[from] SessionError),
}
