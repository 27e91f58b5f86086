//! Top-level subcommand orchestration.
pub mod completions;
pub mod install;
pub mod status;
pub mod uninstall;
pub mod version;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::error::ConfigError;
use crate::logging::{Log, Logger};
use crate::prompt::Prompter;
use crate::tasks::{self, Context, Task};

/// Shared state produced by the common command setup sequence.
///
/// Resolves the source root and home directory, loads `dotlink.toml`, and
/// discovers the symlink pairs so each command does not repeat it.
#[derive(Debug)]
pub struct CommandSetup {
    /// Loaded settings and discovered pairs.
    pub config: Config,
}

impl CommandSetup {
    /// Resolve paths and load all configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the root or home directory cannot be determined,
    /// `dotlink.toml` fails to parse, or the source tree cannot be walked.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let root = resolve_root(global)?;
        let home = resolve_home(global)?;
        log.debug(&format!("source root: {}", root.display()));
        log.debug(&format!("home: {}", home.display()));

        log.stage("Discovering symlinks");
        let config = Config::load(&root, &home)?;
        log.debug(&format!("missing parent policy: {:?}", config.settings.missing_parent));
        log.debug(&format!("link error policy: {:?}", config.settings.on_link_error));
        log.info(&format!(
            "found {} symlink(s) in {}",
            config.symlinks.len(),
            root.display()
        ));

        Ok(Self { config })
    }

    /// Build the task context for this run.
    #[must_use]
    pub fn into_context(
        self,
        global: &GlobalOpts,
        log: &Arc<Logger>,
        prompter: Arc<dyn Prompter>,
    ) -> Context {
        Context::new(
            Arc::new(self.config),
            Arc::clone(log) as Arc<dyn Log>,
            global.dry_run,
            prompter,
        )
    }
}

/// Resolve the source root from `--root`/`DOTLINK_ROOT` or the current
/// directory, canonicalized.
///
/// # Errors
///
/// Returns an error if the current directory is unavailable or the root is
/// not an existing directory.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    let root = match &global.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("reading current directory")?,
    };
    let root = dunce::canonicalize(&root).map_err(|_| ConfigError::InvalidRoot(root.clone()))?;
    if !root.is_dir() {
        return Err(ConfigError::InvalidRoot(root).into());
    }
    Ok(root)
}

/// Resolve the home directory from `--home` or the environment.
///
/// # Errors
///
/// Returns an error if neither `HOME` nor `USERPROFILE` is set.
pub fn resolve_home(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(home) = &global.home {
        return Ok(home.clone());
    }
    let vars: &[&str] = if cfg!(target_os = "windows") {
        &["USERPROFILE", "HOME"]
    } else {
        &["HOME"]
    };
    vars.iter()
        .find_map(|var| std::env::var_os(var).filter(|v| !v.is_empty()))
        .map(PathBuf::from)
        .ok_or_else(|| ConfigError::MissingHome.into())
}

/// Execute every task in order, print the summary, and bail if any task failed.
///
/// # Errors
///
/// Returns an error if one or more tasks recorded a failure.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
    log: &Logger,
) -> Result<()> {
    for task in tasks {
        tasks::execute(task, ctx);
    }

    log.print_summary(ctx.dry_run);

    let count = log.failure_count();
    if count > 0 {
        anyhow::bail!("{count} task(s) failed");
    }
    Ok(())
}
