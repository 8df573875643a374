// Error types for the downloader layer

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    /// yt-dlp (or a maintenance tool) could not be started at all
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Spawning or waiting on the subprocess failed for another reason
    #[error("Execution error: {0}")]
    ExecutionError(String),

    /// Update requested for a tool that is not present yet
    #[error("{0} is not installed. Please install it first (option 1).")]
    NotInstalled(String),
}

impl DownloadError {
    /// Map a spawn failure of `program` to the matching variant
    pub fn from_spawn(program: &str, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                Self::ToolNotFound(format!("{}: {}", program, err))
            }
            _ => Self::ExecutionError(format!("Failed to start {}: {}", program, err)),
        }
    }
}
