//! Command-line interface definitions.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::install::{LinkErrorPolicy, ParentPolicy};

/// Top-level CLI entry point for the dotfiles symlink installer.
#[derive(Parser, Debug)]
#[command(
    name = "dotlink",
    about = "Link `.symlink` entries from a dotfiles tree into your home directory",
    version
)]
pub struct Cli {
    /// Subcommand to run; `install` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared across all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

impl Cli {
    /// The subcommand to run, defaulting to `install`.
    #[must_use]
    pub fn subcommand(&self) -> Command {
        self.command
            .clone()
            .unwrap_or_else(|| Command::Install(InstallOpts::default()))
    }
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying or prompting
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Source tree to walk (defaults to the current directory)
    #[arg(long, global = true, env = "DOTLINK_ROOT")]
    pub root: Option<PathBuf>,

    /// Home directory to link into (defaults to HOME, or USERPROFILE on Windows)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Link every `.symlink` entry into the home directory
    Install(InstallOpts),
    /// Remove links created by install and restore backups
    Uninstall,
    /// Show the state of every link without changing anything
    Status,
    /// Print a shell completion script
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the per-command log file.
    #[must_use]
    pub const fn log_name(&self) -> &'static str {
        match self {
            Self::Install(_) => "install",
            Self::Uninstall => "uninstall",
            Self::Status => "status",
            Self::Completions { .. } => "completions",
            Self::Version => "version",
        }
    }
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct InstallOpts {
    /// Override what happens when a link's parent directory is missing
    #[arg(long, value_enum)]
    pub missing_parent: Option<ParentPolicy>,

    /// Override what happens when creating a link fails
    #[arg(long, value_enum)]
    pub on_link_error: Option<LinkErrorPolicy>,
}
