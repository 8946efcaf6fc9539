use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::IncidentRecord;

/// Log file used when nothing else is configured, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "incident_log.txt";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write incident log {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("Incident log {0} does not exist yet")]
    Missing(PathBuf),

    #[error("Failed to read incident log {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
}

/// Append-only incident log backed by a single text file.
///
/// The store keeps no state besides the path, so several stores (or
/// processes) may point at the same file.
#[derive(Debug, Clone)]
pub struct IncidentLogStore {
    path: PathBuf,
}

impl IncidentLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`DEFAULT_LOG_FILE`] inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DEFAULT_LOG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one block, creating the file (and parent directories) if absent.
    ///
    /// The block goes out in a single `write_all` on an `O_APPEND` handle.
    pub fn append(&self, record: &IncidentRecord) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;

        let block = record.to_block();
        file.write_all(block.as_bytes()).map_err(write_err)?;
        file.flush().map_err(write_err)?;

        debug!(path = %self.path.display(), bytes = block.len(), "Appended incident record");
        Ok(())
    }

    /// Full log content in file order (oldest first).
    ///
    /// A missing file yields [`StoreError::Missing`], which callers treat as
    /// "no logs yet" rather than a failure.
    pub fn read_all(&self) -> Result<String, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::Missing(self.path.clone()))
            }
            Err(source) => Err(StoreError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
