//! Error types for cleanwatch.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cleanwatch operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Path has no file name: {0}")]
    NoFileName(PathBuf),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias using cleanwatch's Error.
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
