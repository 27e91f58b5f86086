//! Per-command log file under the user cache directory.
use std::fs::File;
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

use super::format::{Kind, Message};
use crate::commands::version::version;

/// Writes every event, debug included, to `<cache>/dotlink/<command>.log`.
///
/// The file is truncated at the start of each run.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<File>,
}

impl FileLayer {
    /// Create the log file for `command` and write its header line.
    ///
    /// Returns `None` when the cache directory is unusable; the run then
    /// goes on with console output only.
    pub(super) fn create(command: &str) -> Option<Self> {
        let mut file = File::create(log_file_path(command)?).ok()?;
        writeln!(
            file,
            "# dotlink {} {command} at {}",
            version(),
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )
        .ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: Subscriber> Layer<S> for FileLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let message = Message::from_event(event);
        let line = Kind::of(event.metadata()).plain(&strip_ansi(&message.0));
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{} {line}", Utc::now().format("%H:%M:%S"));
        }
    }
}

/// `$XDG_CACHE_HOME/dotlink/<command>.log`, falling back to `~/.cache`.
/// Creates the directory.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let cache = match std::env::var_os("XDG_CACHE_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(
            std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?,
        )
        .join(".cache"),
    };
    let dir = cache.join("dotlink");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Drop the SGR color codes our own messages carry.
fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_escape = false;
    for c in s.chars() {
        match (in_escape, c) {
            (false, '\x1b') => in_escape = true,
            (false, c) => out.push(c),
            (true, c) => in_escape = !c.is_ascii_alphabetic(),
        }
    }
    out
}
