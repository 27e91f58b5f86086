//! Console and log-file output, plus the per-run outcome summary.
//!
//! Messages go through [`tracing`]: the console gets colored lines at
//! `info` (or `debug` with `-v`), the log file gets everything.  [`Logger`] also tallies link outcomes for the summary.

mod file;
mod format;
mod logger;

pub use logger::Logger;

use crate::tasks::Outcome;

/// Output sink used by tasks.
///
/// Tasks only see this trait so tests can hand them an isolated
/// [`Logger`].
pub trait Log: Send + Sync {
    /// A heading for a major step.
    fn stage(&self, msg: &str);
    /// Normal progress output.
    fn info(&self, msg: &str);
    /// Detail shown only with `-v`, always written to the log file.
    fn debug(&self, msg: &str);
    /// A problem that does not stop the run.
    fn warn(&self, msg: &str);
    /// A failure.
    fn error(&self, msg: &str);
    /// A change a dry run would have made.
    fn dry_run(&self, msg: &str);
    /// Count what happened to `link` for the summary.
    fn record(&self, link: &str, outcome: Outcome);
    /// Note that task `name` ended with an error.
    fn record_failure(&self, name: &str, message: &str);
}

/// Install the global subscriber for one `command` run.
///
/// `RUST_LOG` overrides the console level.  Warnings and errors go to
/// stderr, the rest to stdout.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing::Level;
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_filter = EnvFilter::builder()
        .with_default_directive(
            if verbose {
                LevelFilter::DEBUG
            } else {
                LevelFilter::INFO
            }
            .into(),
        )
        .from_env_lossy();
    let console = tracing_subscriber::fmt::layer()
        .event_format(format::Console)
        .with_writer(
            std::io::stderr
                .with_max_level(Level::WARN)
                .or_else(std::io::stdout),
        )
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(console)
        .with(file::FileLayer::create(command).map(|l| l.with_filter(LevelFilter::DEBUG)))
        .init();
}

/// Serializes `XDG_CACHE_HOME` changes across parallel test threads.
#[cfg(test)]
pub(crate) static TEST_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// A [`Logger`] whose events reach a log file in a fresh cache directory,
/// through a subscriber scoped to the calling thread.
///
/// Keep the returned guard alive for the whole test.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (Logger, tempfile::TempDir, tracing::dispatcher::DefaultGuard) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};

    let cache = tempfile::tempdir().expect("temp cache dir");
    let (layer, log) = {
        let _env = TEST_ENV_MUTEX
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        // SAFETY: Protected by TEST_ENV_MUTEX; removed again before unlocking.
        #[allow(unsafe_code)]
        unsafe {
            std::env::set_var("XDG_CACHE_HOME", cache.path());
        }
        let pair = (
            file::FileLayer::create("test").expect("log file in temp cache"),
            Logger::new("test"),
        );
        // SAFETY: Protected by TEST_ENV_MUTEX.
        #[allow(unsafe_code)]
        unsafe {
            std::env::remove_var("XDG_CACHE_HOME");
        }
        pair
    };
    let subscriber = tracing_subscriber::registry().with(layer.with_filter(LevelFilter::DEBUG));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    (log, cache, guard)
}
