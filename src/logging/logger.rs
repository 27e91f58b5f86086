//! [`Log`] implementation that also keeps the run summary.
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::Log;
use super::file::log_file_path;
use super::format::{DRY_RUN_TARGET, STAGE_TARGET};
use crate::tasks::Outcome;

#[derive(Debug, Default)]
struct Tally {
    outcomes: BTreeMap<Outcome, u32>,
    failed_links: Vec<String>,
    failed_tasks: Vec<String>,
}

/// Emits messages as [`tracing`] events and counts link outcomes.
///
/// The log file itself is written by the subscriber; the logger only knows
/// its path so the summary can point at it.
#[derive(Debug)]
pub struct Logger {
    tally: Mutex<Tally>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a logger for one `command` run.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            tally: Mutex::new(Tally::default()),
            log_file: log_file_path(command),
        }
    }

    fn tally(&self) -> MutexGuard<'_, Tally> {
        self.tally.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// How many links ended with `outcome`.
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> u32 {
        self.tally().outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Number of tasks that ended with an error.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.tally().failed_tasks.len()
    }

    /// The `N linked, N skipped, ...` line, or `None` if nothing was recorded.
    #[must_use]
    pub fn counts_line(&self) -> Option<String> {
        let tally = self.tally();
        if tally.outcomes.is_empty() {
            return None;
        }
        let parts: Vec<String> = tally
            .outcomes
            .iter()
            .map(|(outcome, n)| format!("{n} {}", outcome.label()))
            .collect();
        Some(parts.join(", "))
    }

    /// Print outcome counts, then every failed link and task.
    pub fn print_summary(&self, dry_run: bool) {
        let counts = self.counts_line();
        let (failed_links, failed_tasks) = {
            let tally = self.tally();
            (tally.failed_links.clone(), tally.failed_tasks.clone())
        };
        if counts.is_none() && failed_tasks.is_empty() {
            return;
        }

        self.stage(if dry_run { "Summary (dry run)" } else { "Summary" });
        if let Some(counts) = counts {
            self.info(&counts);
        }
        for failed in failed_links.iter().chain(&failed_tasks) {
            self.info(&format!("\x1b[31m✗\x1b[0m {failed}"));
        }
        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    fn record(&self, link: &str, outcome: Outcome) {
        let mut tally = self.tally();
        *tally.outcomes.entry(outcome).or_default() += 1;
        if outcome == Outcome::Failed {
            tally.failed_links.push(link.to_string());
        }
    }

    fn record_failure(&self, name: &str, message: &str) {
        self.tally().failed_tasks.push(format!("{name}: {message}"));
    }
}
