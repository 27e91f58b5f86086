//! Domain-specific error types for dotlink.
//!
//! Internal modules return typed errors ([`ConfigError`], [`InstallError`],
//! [`ResourceError`]) while command handlers at the CLI boundary convert them
//! to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! DotlinkError
//! ├── Config(ConfigError)      dotlink.toml parsing, root/home resolution
//! ├── Install(InstallError)    run-terminating install conditions
//! └── Resource(ResourceError)  backup, removal, link creation
//! ```

use std::path::PathBuf;

use thiserror::Error;

pub use crate::resources::error::ResourceError;

/// Top-level error type for dotlink.
#[derive(Error, Debug)]
pub enum DotlinkError {
    /// Configuration-related error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The install run was terminated.
    #[error("Install error: {0}")]
    Install(#[from] InstallError),

    /// A filesystem operation on a symlink pair failed.
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
}

/// Errors that arise from configuration loading and path resolution.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `dotlink.toml` could not be parsed.
    #[error("Invalid TOML in {file}: {message}")]
    InvalidSyntax {
        /// Path of the offending file.
        file: String,
        /// Parser message.
        message: String,
    },

    /// An I/O error occurred while reading a config file or walking the tree.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Path that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The source root does not exist or is not a directory.
    #[error("source root is not a directory: {}", .0.display())]
    InvalidRoot(PathBuf),

    /// No home directory could be determined.
    #[error("neither HOME nor USERPROFILE environment variable is set")]
    MissingHome,
}

/// Conditions that terminate an install run immediately.
#[derive(Error, Debug)]
pub enum InstallError {
    /// The user gave a response that is not one of the offered choices.
    #[error("aborted: unrecognized response '{response}'")]
    Aborted {
        /// The raw response, trimmed.
        response: String,
    },

    /// The prompt stream closed before a response was read.
    #[error("aborted: no response (end of input)")]
    EndOfInput,

    /// Reading from or writing to the prompt failed.
    #[error("prompt I/O failed: {0}")]
    Prompt(#[from] std::io::Error),

    /// A link failed and the configured policy stops the run.
    #[error("stopping after failed link: {}", .link.display())]
    LinkFailed {
        /// Link path of the failed pair.
        link: PathBuf,
    },
}
