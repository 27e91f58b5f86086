//! Symlink pair resource.
use anyhow::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::error::ResourceError;
use super::fs::{create_symlink, lexists, remove_link, remove_tree};
use super::{Applicable, Resource, ResourceChange, ResourceState};

/// Suffix appended to a link path when the existing entry is backed up.
pub const BACKUP_SUFFIX: &str = ".backup";

/// What already occupies a link path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// A symlink (possibly broken) pointing somewhere other than the source.
    Symlink,
    /// A regular file or a real directory.
    Entry,
}

/// A `.symlink` source and the home-directory path it should be linked at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymlinkMapping {
    /// Absolute path of the `.symlink` entry (what the link points to).
    pub source_path: PathBuf,
    /// Path under the home directory where the link is created.
    pub link_path: PathBuf,
}

impl SymlinkMapping {
    /// Create a new symlink pair.
    #[must_use]
    pub const fn new(source_path: PathBuf, link_path: PathBuf) -> Self {
        Self {
            source_path,
            link_path,
        }
    }

    /// Whether the link path is already a symlink to this pair's source.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        std::fs::read_link(&self.link_path).is_ok_and(|existing| existing == self.source_path)
    }

    /// Classify whatever occupies the link path, or `None` if it is free.
    ///
    /// A link that already points at the source is not a conflict.
    #[must_use]
    pub fn conflict(&self) -> Option<ConflictKind> {
        let meta = self.link_path.symlink_metadata().ok()?;
        if meta.is_symlink() {
            (!self.is_linked()).then_some(ConflictKind::Symlink)
        } else {
            Some(ConflictKind::Entry)
        }
    }

    /// The nearest parent of the link path, if it does not exist yet.
    #[must_use]
    pub fn missing_parent(&self) -> Option<&Path> {
        self.link_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty() && !p.is_dir())
    }

    /// Create the link path's parent directory tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn create_parent(&self) -> Result<(), ResourceError> {
        if let Some(parent) = self.missing_parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ResourceError::io("create directory", parent, e))?;
        }
        Ok(())
    }

    /// `<link_path>.backup`.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        let mut name = OsString::from(self.link_path.as_os_str());
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    /// Rename the existing entry at the link path to [`backup_path`](Self::backup_path).
    ///
    /// An existing backup is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup path is occupied or the rename fails.
    pub fn backup(&self) -> Result<PathBuf, ResourceError> {
        let backup = self.backup_path();
        if lexists(&backup) {
            return Err(ResourceError::BackupExists { path: backup });
        }
        std::fs::rename(&self.link_path, &backup)
            .map_err(|e| ResourceError::io("back up", &self.link_path, e))?;
        Ok(backup)
    }

    /// Remove the existing entry at the link path: file, symlink, or
    /// directory tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be removed.
    pub fn clear(&self) -> Result<(), ResourceError> {
        remove_tree(&self.link_path).map_err(|e| ResourceError::io("remove", &self.link_path, e))
    }
}

impl Applicable for SymlinkMapping {
    fn description(&self) -> String {
        format!(
            "{} -> {}",
            self.link_path.display(),
            self.source_path.display()
        )
    }

    /// Create the link.  The link path must be free and its parent must exist;
    /// conflict resolution happens before this is called.
    fn apply(&self) -> Result<ResourceChange> {
        if self.is_linked() {
            return Ok(ResourceChange::AlreadyCorrect);
        }
        if let Some(parent) = self.missing_parent() {
            return Err(ResourceError::MissingParent {
                path: parent.to_path_buf(),
            }
            .into());
        }
        create_symlink(&self.source_path, &self.link_path)
            .map_err(|e| ResourceError::io("link", &self.link_path, e))?;
        Ok(ResourceChange::Applied)
    }

    /// Remove the link if it points at this pair's source, then restore a
    /// backup left by a previous install.
    fn remove(&self) -> Result<ResourceChange> {
        if !self.is_linked() {
            return Ok(ResourceChange::Skipped {
                reason: "not linked to this source".to_string(),
            });
        }
        remove_link(&self.link_path).map_err(|e| ResourceError::io("unlink", &self.link_path, e))?;

        let backup = self.backup_path();
        if lexists(&backup) {
            std::fs::rename(&backup, &self.link_path)
                .map_err(|e| ResourceError::io("restore", &backup, e))?;
        }
        Ok(ResourceChange::Applied)
    }
}

impl Resource for SymlinkMapping {
    fn current_state(&self) -> Result<ResourceState> {
        if !lexists(&self.source_path) {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source_path.display()),
            });
        }

        let state = match self.conflict() {
            None if self.is_linked() => ResourceState::Correct,
            None => ResourceState::Missing,
            Some(ConflictKind::Symlink) => {
                let current = std::fs::read_link(&self.link_path)
                    .map_or_else(|_| "unreadable link".to_string(), |p| p.display().to_string());
                ResourceState::Incorrect {
                    current: format!("points to {current}"),
                }
            }
            Some(ConflictKind::Entry) => ResourceState::Incorrect {
                current: if self.link_path.is_dir() {
                    "directory".to_string()
                } else {
                    "regular file".to_string()
                },
            },
        };
        Ok(state)
    }
}
