//! Named tasks that orchestrate symlink changes.
mod context;
pub mod resolution;
pub mod symlinks;

pub use context::Context;

use anyhow::Result;

/// What happened to one link path during a run.
///
/// Declaration order is the order of the run summary.
///
/// # Examples
///
/// ```
/// use dotlink::tasks::Outcome;
///
/// assert_eq!(Outcome::BackedUp.label(), "backed up");
/// assert!(Outcome::Linked < Outcome::Failed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// The link path was free and is now linked.
    Linked,
    /// The existing entry was renamed to `<path>.backup`, then linked.
    BackedUp,
    /// The existing entry was removed, then linked.
    Overwritten,
    /// Our link was removed by uninstall.
    Removed,
    /// Our link was removed and `<path>.backup` moved back.
    Restored,
    /// The link path already pointed at the source.
    AlreadyLinked,
    /// Nothing was changed.
    Skipped,
    /// A filesystem change failed.
    Failed,
}

impl Outcome {
    /// Summary wording, e.g. `3 backed up`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Linked => "linked",
            Self::BackedUp => "backed up",
            Self::Overwritten => "overwritten",
            Self::Removed => "removed",
            Self::Restored => "restored",
            Self::AlreadyLinked => "already linked",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

/// A named, executable task.
pub trait Task {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task has anything to do.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the task, recording each pair's [`Outcome`] through
    /// `ctx.log`.
    ///
    /// # Errors
    ///
    /// Returns an error if the run was aborted or any filesystem change failed.
    fn run(&self, ctx: &Context) -> Result<()>;
}

/// Execute a task, recording a failure in the logger.
pub fn execute(task: &dyn Task, ctx: &Context) {
    if !task.should_run(ctx) {
        ctx.log.debug(&format!("{}: nothing to do", task.name()));
        return;
    }

    ctx.log.stage(task.name());

    if let Err(e) = task.run(ctx) {
        let message = format!("{e:#}");
        ctx.log.error(&format!("{}: {message}", task.name()));
        ctx.log.record_failure(task.name(), &message);
    }
}

/// Shared helpers for task unit tests.
#[cfg(test)]
pub mod test_helpers {
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use crate::config::Config;
    use crate::config::install::InstallSettings;
    use crate::logging::{Log, Logger};
    use crate::prompt::test_helpers::ScriptedPrompter;

    use super::Context;

    /// Build a [`Config`] with no symlink pairs, `root` as source root and
    /// `/home/test` as home.
    #[must_use]
    pub fn empty_config(root: PathBuf) -> Config {
        Config {
            root,
            home: PathBuf::from("/home/test"),
            settings: InstallSettings::default(),
            symlinks: vec![],
        }
    }

    /// Load the real [`Config`] for a fixture source tree.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn load_config(root: &Path, home: &Path) -> Config {
        Config::load(root, home).expect("fixture config loads")
    }

    /// Build a [`Context`] answering prompts with `responses`, also returning
    /// the [`Logger`] so tests can inspect recorded outcomes.
    #[must_use]
    pub fn make_context(config: Config, responses: &[&str]) -> (Context, Arc<Logger>) {
        make_scripted_context(config, Arc::new(ScriptedPrompter::new(responses)))
    }

    /// Build a [`Context`] around an existing prompter so tests can inspect
    /// the questions asked.
    #[must_use]
    pub fn make_scripted_context(
        config: Config,
        prompter: Arc<ScriptedPrompter>,
    ) -> (Context, Arc<Logger>) {
        let log = Arc::new(Logger::new("test"));
        let ctx = Context::new(
            Arc::new(config),
            Arc::clone(&log) as Arc<dyn Log>,
            false,
            prompter,
        );
        (ctx, log)
    }
}
