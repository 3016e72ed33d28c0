use std::path::PathBuf;
use thiserror::Error;

/// Custom error types for cropperview
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory traversal error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("Input folder not found: {0}")]
    FolderNotFound(PathBuf),

    #[error("No video files to process")]
    NoFilesFound,

    #[error("Required executable not found: {0}")]
    MissingExecutable(PathBuf),

    #[error("{tool} exited with code {code}")]
    NonZeroExit { tool: String, code: i32 },

    #[error("Failed to start {tool}: {source}")]
    CommandStart {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Crop values must be in the form top:bottom:left:right, got '{0}'")]
    MalformedCropSpec(String),

    #[error("Run cancelled")]
    Cancelled,

    #[error("Settings error: {0}")]
    SettingsPersist(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for cropperview operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
