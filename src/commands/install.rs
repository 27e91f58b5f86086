//! Install command implementation.
use std::sync::Arc;

use anyhow::Result;

use super::{CommandSetup, run_tasks_to_completion};
use crate::cli::{GlobalOpts, InstallOpts};
use crate::logging::{Log as _, Logger};
use crate::prompt::{Prompter, TerminalPrompter};
use crate::tasks::Task;
use crate::tasks::symlinks::InstallSymlinks;

/// Run the install command, prompting on the terminal.
///
/// # Errors
///
/// Returns an error if configuration loading fails, the run is aborted, or
/// any link fails.
pub fn run(global: &GlobalOpts, opts: &InstallOpts, log: &Arc<Logger>) -> Result<()> {
    run_with_prompter(global, opts, log, Arc::new(TerminalPrompter))
}

/// Run the install command with answers from `prompter`.
///
/// # Errors
///
/// Returns an error if configuration loading fails, the run is aborted, or
/// any link fails.
pub fn run_with_prompter(
    global: &GlobalOpts,
    opts: &InstallOpts,
    log: &Arc<Logger>,
    prompter: Arc<dyn Prompter>,
) -> Result<()> {
    log.info(&format!("dotlink {}", super::version::version()));

    let mut setup = CommandSetup::init(global, log)?;
    if let Some(policy) = opts.missing_parent {
        setup.config.settings.missing_parent = policy;
    }
    if let Some(policy) = opts.on_link_error {
        setup.config.settings.on_link_error = policy;
    }
    if global.dry_run {
        log.info("dry run: nothing will be changed");
    }

    let ctx = setup.into_context(global, log, prompter);
    let task = InstallSymlinks;
    run_tasks_to_completion([&task as &dyn Task], &ctx, log)
}
