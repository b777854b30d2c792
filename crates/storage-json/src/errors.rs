//! Storage-specific error types for JSON file operations.
//!
//! This module provides error types that wrap I/O and serde_json errors and
//! convert them to the storage-agnostic error types defined in `moneycalc_core`.

use std::path::PathBuf;
use thiserror::Error;
use moneycalc_core::errors::{Error, ValidationError};

/// Storage-specific errors that wrap file system and JSON parsing failures.
///
/// These errors are internal to the storage layer and are converted to
/// `moneycalc_core::Error` before being returned to callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ParseFailed { .. } => {
                Error::Validation(ValidationError::InvalidInput(err.to_string()))
            }
            other => Error::Repository(other.to_string()),
        }
    }
}

/// Converts a missing series file to `SeriesNotFound`, everything else as usual.
pub(crate) fn series_error(name: &str, err: StorageError) -> Error {
    match err {
        StorageError::NotFound(_) => Error::SeriesNotFound(name.to_string()),
        other => other.into(),
    }
}
