//! Symlink discovery: walk the source tree for `.symlink` entries.
use std::ffi::OsStr;
use std::path::Path;

use crate::error::ConfigError;
use crate::resources::symlink::SymlinkMapping;

/// Extension (without the dot) that marks an entry for linking.
pub const SYMLINK_EXTENSION: &str = "symlink";

/// Walk `root` and return one [`SymlinkMapping`] per `.symlink` entry.
///
/// Entries are visited pre-order: the `.symlink` entries of a directory are
/// recorded (sorted by name) before its subdirectories are descended, also
/// in name order.  Entries named in `exclude` are neither recorded nor
/// descended.  Symlinked directories are not followed.
///
/// The link path for `root/a/b/name.symlink` is `home/a/b/name`.
///
/// # Errors
///
/// Returns an error if a directory in the tree cannot be read.
pub fn discover(
    root: &Path,
    home: &Path,
    exclude: &[String],
) -> Result<Vec<SymlinkMapping>, ConfigError> {
    let mut mappings = Vec::new();
    walk(root, home, exclude, &mut mappings)?;
    Ok(mappings)
}

fn walk(
    dir: &Path,
    link_dir: &Path,
    exclude: &[String],
    out: &mut Vec<SymlinkMapping>,
) -> Result<(), ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: dir.display().to_string(),
        source,
    };

    let mut entries = std::fs::read_dir(dir)
        .map_err(io_err)?
        .map(|entry| entry.and_then(|e| Ok((e.file_name(), e.file_type()?))))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err)?;
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    entries.retain(|(name, _)| !exclude.iter().any(|x| OsStr::new(x) == name));

    for (name, _) in &entries {
        let name = Path::new(name);
        if name.extension() == Some(OsStr::new(SYMLINK_EXTENSION))
            && let Some(stem) = name.file_stem()
        {
            out.push(SymlinkMapping::new(dir.join(name), link_dir.join(stem)));
        }
    }

    for (name, file_type) in &entries {
        if file_type.is_dir() {
            walk(&dir.join(name), &link_dir.join(name), exclude, out)?;
        }
    }
    Ok(())
}

/// Render `path` relative to `base` with forward slashes, for display.
#[must_use]
pub fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base).map_or_else(
        |_| path.display().to_string(),
        |rel| {
            rel.components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        },
    )
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::install::InstallSettings;
    use std::path::PathBuf;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }

    fn exclude() -> Vec<String> {
        InstallSettings::default().exclude
    }

    #[test]
    fn strips_suffix_and_mirrors_directories() {
        let src = tempfile::tempdir().unwrap();
        touch(src.path(), "dotfiles/vim/.vimrc.symlink");
        let home = PathBuf::from("/home/user");

        let mappings = discover(src.path(), &home, &exclude()).unwrap();
        assert_eq!(mappings.len(), 1);
        assert_eq!(
            mappings[0].source_path,
            src.path().join("dotfiles/vim/.vimrc.symlink")
        );
        assert_eq!(
            mappings[0].link_path,
            PathBuf::from("/home/user/dotfiles/vim/.vimrc")
        );
    }

    #[test]
    fn finds_every_suffixed_entry() {
        let src = tempfile::tempdir().unwrap();
        touch(src.path(), "bashrc.symlink");
        touch(src.path(), "zsh/zshrc.symlink");
        touch(src.path(), "zsh/README.md");
        touch(src.path(), "deep/er/still/gitconfig.symlink");
        std::fs::create_dir_all(src.path().join("config.symlink")).unwrap();

        let mappings = discover(src.path(), Path::new("/h"), &exclude()).unwrap();
        assert_eq!(mappings.len(), 4);
        assert!(
            mappings
                .iter()
                .all(|m| m.link_path.extension() != Some(OsStr::new("symlink")))
        );
    }

    #[test]
    fn directories_with_suffix_are_mapped_and_descended() {
        let src = tempfile::tempdir().unwrap();
        touch(src.path(), "nvim.symlink/init.lua");
        touch(src.path(), "nvim.symlink/inner.symlink");

        let mappings = discover(src.path(), Path::new("/h"), &exclude()).unwrap();
        let links: Vec<_> = mappings.iter().map(|m| m.link_path.clone()).collect();
        assert_eq!(
            links,
            vec![PathBuf::from("/h/nvim"), PathBuf::from("/h/nvim.symlink/inner")]
        );
    }

    #[test]
    fn vcs_metadata_is_excluded() {
        let src = tempfile::tempdir().unwrap();
        touch(src.path(), ".git/hooks/pre-commit.symlink");
        touch(src.path(), ".jj/repo/store.symlink");
        touch(src.path(), "tmux.conf.symlink");

        let mappings = discover(src.path(), Path::new("/h"), &exclude()).unwrap();
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].link_path, PathBuf::from("/h/tmux.conf"));
    }

    #[test]
    fn custom_exclude_list_replaces_defaults() {
        let src = tempfile::tempdir().unwrap();
        touch(src.path(), ".git/a.symlink");
        touch(src.path(), "private/b.symlink");

        let mappings = discover(src.path(), Path::new("/h"), &["private".to_string()]).unwrap();
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].link_path, PathBuf::from("/h/.git/a"));
    }

    #[test]
    fn bare_suffix_and_lookalikes_are_ignored() {
        let src = tempfile::tempdir().unwrap();
        touch(src.path(), ".symlink");
        touch(src.path(), "notes.symlinks");
        touch(src.path(), "symlink");
        touch(src.path(), "archive.symlink.bak");

        let mappings = discover(src.path(), Path::new("/h"), &exclude()).unwrap();
        assert!(mappings.is_empty(), "unexpected: {mappings:?}");
    }

    #[test]
    fn walk_order_is_preorder_and_sorted() {
        let src = tempfile::tempdir().unwrap();
        touch(src.path(), "b/inner.symlink");
        touch(src.path(), "z.symlink");
        touch(src.path(), "a/inner.symlink");
        touch(src.path(), "c.symlink");

        let mappings = discover(src.path(), Path::new("/h"), &exclude()).unwrap();
        let links: Vec<_> = mappings
            .iter()
            .map(|m| display_relative(&m.link_path, Path::new("/h")))
            .collect();
        assert_eq!(links, vec!["c", "z", "a/inner", "b/inner"]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_followed() {
        let src = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        touch(elsewhere.path(), "hidden.symlink");
        std::os::unix::fs::symlink(elsewhere.path(), src.path().join("linked")).unwrap();

        let mappings = discover(src.path(), Path::new("/h"), &exclude()).unwrap();
        assert!(mappings.is_empty());
    }

    #[test]
    fn unreadable_root_is_an_error() {
        let src = tempfile::tempdir().unwrap();
        let err = discover(&src.path().join("missing"), Path::new("/h"), &exclude()).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn display_relative_uses_forward_slashes() {
        let base = PathBuf::from("/h");
        assert_eq!(
            display_relative(&base.join("a").join("b"), &base),
            "a/b"
        );
        assert_eq!(display_relative(Path::new("/x/y"), &base), "/x/y");
    }
}
