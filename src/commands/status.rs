//! Status command implementation.
use std::sync::Arc;

use anyhow::Result;

use super::{CommandSetup, run_tasks_to_completion};
use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::prompt::TerminalPrompter;
use crate::tasks::Task;
use crate::tasks::symlinks::ListSymlinks;

/// Run the status command.
///
/// # Errors
///
/// Returns an error if configuration loading fails or a link's state cannot
/// be read.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let setup = CommandSetup::init(global, log)?;
    let ctx = setup.into_context(global, log, Arc::new(TerminalPrompter));
    let task = ListSymlinks;
    run_tasks_to_completion([&task as &dyn Task], &ctx, log)
}
