//! File-system helpers shared by the symlink resource.
use std::io;
use std::path::Path;

/// Returns `true` if anything exists at `path`, including a broken symlink.
#[must_use]
pub fn lexists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Remove whatever lives at `path`: a file or symlink, falling back to a
/// recursive removal when `path` is a real directory.
///
/// # Errors
///
/// Returns an error if the entry cannot be removed.
pub fn remove_tree(path: &Path) -> io::Result<()> {
    match remove_link(path) {
        Ok(()) => Ok(()),
        Err(e) => {
            let is_real_dir = path
                .symlink_metadata()
                .map(|m| m.is_dir() && !m.is_symlink())
                .unwrap_or(false);
            if is_real_dir {
                std::fs::remove_dir_all(path)
            } else {
                Err(e)
            }
        }
    }
}

/// Remove a file or symlink, handling platform differences.
///
/// On Windows, directory symlinks must be removed with `remove_dir`.
/// `symlink_metadata().is_dir()` returns `false` for symlinks, so the raw
/// `FILE_ATTRIBUTE_DIRECTORY` flag is checked instead.
///
/// # Errors
///
/// Returns an error if the entry cannot be removed.
pub fn remove_link(path: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        let meta = std::fs::symlink_metadata(path)?;
        if meta.is_symlink() && meta.file_attributes() & 0x10 != 0 {
            return std::fs::remove_dir(path);
        }
    }
    std::fs::remove_file(path)
}

/// Create a symlink at `link` pointing to `source`.
///
/// # Errors
///
/// Returns an error if the link cannot be created (e.g. `link` exists).
pub fn create_symlink(source: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(source, link)
    }

    #[cfg(windows)]
    {
        if source.is_dir() {
            std::os::windows::fs::symlink_dir(source, link)
        } else {
            std::os::windows::fs::symlink_file(source, link)
        }
    }
}
