//! `[install]` settings from `dotlink.toml`.
use serde::Deserialize;

/// What to do when a link path's parent directory does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ParentPolicy {
    /// Ask before creating the directory tree; declining skips the pair.
    #[default]
    Prompt,
    /// Create the directory tree without asking.
    Create,
    /// Skip the pair without asking.
    Skip,
}

/// What to do when creating a single link fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LinkErrorPolicy {
    /// Report the failure and keep processing the remaining pairs.
    #[default]
    Continue,
    /// Stop the run at the first failed link.
    Abort,
}

/// Settings that shape an install run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallSettings {
    /// Missing-parent policy.
    pub missing_parent: ParentPolicy,
    /// Failed-link policy.
    pub on_link_error: LinkErrorPolicy,
    /// Entry names never descended into or linked (VCS metadata by default).
    pub exclude: Vec<String>,
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self {
            missing_parent: ParentPolicy::default(),
            on_link_error: LinkErrorPolicy::default(),
            exclude: [".git", ".jj", ".hg", ".svn"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Top-level layout of `dotlink.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct ConfigFile {
    #[serde(default)]
    pub(super) install: InstallSettings,
}
