//! Error types for the cleaning pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for pipeline operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that can occur while watching or cleaning files.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Parse error for {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Watch error: {0}")]
    WatchError(String),
}

impl From<notify::Error> for IngestError {
    fn from(err: notify::Error) -> Self {
        IngestError::WatchError(err.to_string())
    }
}
