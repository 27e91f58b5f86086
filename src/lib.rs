//! Dotfiles symlink installer.
//!
//! Walks a source tree for entries named `*.symlink` and links each one into
//! the home directory with the suffix stripped, asking how to resolve
//! anything already in the way.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: `dotlink.toml` settings and source-tree discovery
//! - **[`resources`]**: the symlink pair and its filesystem primitives
//! - **[`tasks`]**: install, uninstall and status over every pair
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod resources;
pub mod tasks;
