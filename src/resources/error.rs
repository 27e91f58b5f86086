//! Typed error variants for symlink resource operations.
//!
//! Resource code returns these variants directly; callers convert to
//! [`anyhow::Error`] via `?`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise from backup, removal, and link creation.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// The backup destination is already occupied.
    #[error("backup already exists: {}", .path.display())]
    BackupExists {
        /// The occupied `<target>.backup` path.
        path: PathBuf,
    },

    /// The parent directory of a link path does not exist.
    #[error("parent directory does not exist: {}", .path.display())]
    MissingParent {
        /// The missing parent directory.
        path: PathBuf,
    },

    /// An I/O operation on a path failed.
    #[error("{operation} {}: {source}", .path.display())]
    Io {
        /// Short verb describing the operation (e.g. `"link"`, `"remove"`).
        operation: &'static str,
        /// Path the operation was applied to.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl ResourceError {
    /// Wrap an I/O error with the operation and path it came from.
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
