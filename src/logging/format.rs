//! Line shapes shared by the console and the log file.
use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Metadata, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Target of stage headings.
pub(super) const STAGE_TARGET: &str = "dotlink::stage";
/// Target of actions a dry run only describes.
pub(super) const DRY_RUN_TARGET: &str = "dotlink::dry_run";

/// How an event is rendered, from its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Kind {
    Stage,
    DryRun,
    Error,
    Warn,
    Info,
    Debug,
}

impl Kind {
    pub(super) fn of(meta: &Metadata<'_>) -> Self {
        match (*meta.level(), meta.target()) {
            (Level::ERROR, _) => Self::Error,
            (Level::WARN, _) => Self::Warn,
            (Level::INFO, STAGE_TARGET) => Self::Stage,
            (Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Colored rendering for the terminal.
    pub(super) fn console(self, msg: &str) -> String {
        match self {
            Self::Stage => format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Self::DryRun => format!("  \x1b[36mwould\x1b[0m {msg}"),
            Self::Error => format!("\x1b[31merror:\x1b[0m {msg}"),
            Self::Warn => format!("\x1b[33mwarning:\x1b[0m {msg}"),
            Self::Info => format!("  {msg}"),
            Self::Debug => format!("  \x1b[2m{msg}\x1b[0m"),
        }
    }

    /// Plain rendering for the log file, one tag column wide.
    pub(super) fn plain(self, msg: &str) -> String {
        let tag = match self {
            Self::Stage => "==>",
            Self::DryRun => "would",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "",
            Self::Debug => "debug",
        };
        format!("{tag:<5} {msg}")
    }
}

/// Collects the `message` field of an event.
#[derive(Default)]
pub(super) struct Message(pub(super) String);

impl Message {
    pub(super) fn from_event(event: &Event<'_>) -> Self {
        let mut message = Self::default();
        event.record(&mut message);
        message
    }
}

impl Visit for Message {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

/// Console event format: no timestamps or levels, just [`Kind::console`].
pub(super) struct Console;

impl<S, N> FormatEvent<S, N> for Console
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let message = Message::from_event(event);
        writeln!(writer, "{}", Kind::of(event.metadata()).console(&message.0))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_align_after_the_tag() {
        assert_eq!(Kind::Stage.plain("Install symlinks"), "==>   Install symlinks");
        assert_eq!(Kind::DryRun.plain("link ~/.zshrc"), "would link ~/.zshrc");
        assert_eq!(Kind::Info.plain("found 3"), "      found 3");
    }

    #[test]
    fn console_marks_problems() {
        assert!(Kind::Error.console("boom").contains("error:"));
        assert!(Kind::Warn.console("careful").contains("warning:"));
        assert!(Kind::Info.console("fine").starts_with("  fine"));
    }
}
