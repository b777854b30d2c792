//! Data directory access.

use log::debug;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::errors::StorageError;

/// Root of the data directory. Every file name is resolved against it.
///
/// Cheap to clone; repositories each hold their own handle.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: Arc<PathBuf>,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Reads and parses `name` as JSON.
    pub fn read<T: DeserializeOwned>(&self, name: &str) -> Result<T, StorageError> {
        let path = self.path(name);
        debug!("Reading {}", path.display());
        let content = fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => StorageError::NotFound(path.clone()),
            _ => StorageError::ReadFailed {
                path: path.clone(),
                source,
            },
        })?;
        serde_json::from_str(&content).map_err(|source| StorageError::ParseFailed { path, source })
    }
}
