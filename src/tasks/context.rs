//! Per-run task context.
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::config::symlinks::display_relative;
use crate::logging::Log;
use crate::prompt::Prompter;

/// Shared context for task execution.
pub struct Context {
    /// Settings and discovered symlink pairs.
    pub config: Arc<Config>,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Whether to perform a dry run (preview changes without applying).
    pub dry_run: bool,
    /// Where conflict and parent-directory answers come from.
    pub prompter: Arc<dyn Prompter>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("prompter", &"<dyn Prompter>")
            .finish()
    }
}

impl Context {
    /// Creates a new context for task execution.
    #[must_use]
    pub const fn new(
        config: Arc<Config>,
        log: Arc<dyn Log>,
        dry_run: bool,
        prompter: Arc<dyn Prompter>,
    ) -> Self {
        Self {
            config,
            log,
            dry_run,
            prompter,
        }
    }

    /// User's home directory path.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.config.home
    }

    /// Render a path under the home directory as `~/...` for log output.
    #[must_use]
    pub fn display_home(&self, path: &Path) -> String {
        if path.starts_with(self.home()) {
            format!("~/{}", display_relative(path, self.home()))
        } else {
            path.display().to_string()
        }
    }
}
