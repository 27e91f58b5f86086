//! Configuration: `dotlink.toml` settings plus the discovered symlink pairs.
pub mod install;
pub mod symlinks;
pub mod toml_loader;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::resources::symlink::SymlinkMapping;

/// Name of the optional settings file in the source root.
pub const CONFIG_FILE: &str = "dotlink.toml";

/// Everything an install run needs, computed fresh each invocation.
#[derive(Debug)]
pub struct Config {
    /// Absolute source root that was walked.
    pub root: PathBuf,
    /// Home directory link paths are computed under.
    pub home: PathBuf,
    /// Settings from `dotlink.toml` (defaults when absent).
    pub settings: install::InstallSettings,
    /// Discovered symlink pairs, in walk order.
    pub symlinks: Vec<SymlinkMapping>,
}

impl Config {
    /// Read `dotlink.toml` from `root` and discover every symlink pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file is malformed or the source tree
    /// cannot be walked.
    pub fn load(root: &Path, home: &Path) -> Result<Self> {
        let file: install::ConfigFile = toml_loader::load_config(&root.join(CONFIG_FILE))
            .with_context(|| format!("loading {CONFIG_FILE}"))?;
        let settings = file.install;

        let symlinks = symlinks::discover(root, home, &settings.exclude)
            .with_context(|| format!("walking {}", root.display()))?;

        Ok(Self {
            root: root.to_path_buf(),
            home: home.to_path_buf(),
            settings,
            symlinks,
        })
    }
}
