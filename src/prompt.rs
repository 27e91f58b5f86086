//! Interactive prompts for conflict resolution and parent creation.
//!
//! Reading a line is behind the [`Prompter`] trait so the install loop can
//! be driven by scripted responses in tests.
use std::io;
use std::path::Path;

use inquire::InquireError;

use crate::error::InstallError;
use crate::resources::symlink::ConflictKind;

/// Source of interactive answers.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    /// Show `question` and read one line of input.
    ///
    /// Returns `Ok(None)` when input is closed or the user cancels.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be used for the prompt.
    fn ask(&self, question: &str) -> io::Result<Option<String>>;
}

/// [`Prompter`] asking on the terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&self, question: &str) -> io::Result<Option<String>> {
        inquire::Text::new(question)
            .prompt()
            .map(Some)
            .or_else(cancelled_or_error)
    }
}

/// Esc and Ctrl-C count as closed input; anything else is an I/O failure.
fn cancelled_or_error(err: InquireError) -> io::Result<Option<String>> {
    match err {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => Ok(None),
        InquireError::IO(e) => Err(e),
        other => Err(io::Error::other(other)),
    }
}

/// A decision for one conflicting link path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    /// `s`: leave this entry alone.
    Skip,
    /// `S`: leave this entry alone and link nothing else in this run.
    SkipAll,
    /// `o`: remove this entry and link.
    Overwrite,
    /// `O`: remove this and every later conflicting entry and link.
    OverwriteAll,
    /// `b`: rename this entry to `<path>.backup` and link.
    Backup,
    /// `B`: back up this and every later conflicting entry and link.
    BackupAll,
}

impl ConflictChoice {
    /// Parse a response.  Only the exact single characters offered for
    /// `kind` are accepted: backup is never offered for symlinks.  A trailing
    /// line ending is ignored; any other whitespace makes the answer invalid.
    #[must_use]
    pub fn parse(response: &str, kind: ConflictKind) -> Option<Self> {
        let choice = match strip_line_ending(response) {
            "s" => Self::Skip,
            "S" => Self::SkipAll,
            "o" => Self::Overwrite,
            "O" => Self::OverwriteAll,
            "b" => Self::Backup,
            "B" => Self::BackupAll,
            _ => return None,
        };
        let offered = kind == ConflictKind::Entry
            || !matches!(choice, Self::Backup | Self::BackupAll);
        offered.then_some(choice)
    }
}

fn strip_line_ending(response: &str) -> &str {
    response.trim_end_matches(['\r', '\n'])
}

/// The question shown for a conflicting link path.
#[must_use]
pub fn conflict_question(link: &Path, kind: ConflictKind) -> String {
    match kind {
        ConflictKind::Symlink => format!(
            "Symbolic link {} already exists.\n\
             What do you want to do? [s]kip, [S]kip all, [o]verwrite, [O]verwrite all: ",
            link.display()
        ),
        ConflictKind::Entry => format!(
            "File {} already exists.\n\
             What do you want to do? [s]kip, [S]kip all, [o]verwrite, [O]verwrite all, \
             [b]ackup, [B]ackup all: ",
            link.display()
        ),
    }
}

/// Ask how to resolve a conflict at `link`.
///
/// # Errors
///
/// Returns [`InstallError::Aborted`] for any response that is not offered,
/// [`InstallError::EndOfInput`] when input is closed, and
/// [`InstallError::Prompt`] on I/O failure.  All of them end the run.
pub fn ask_conflict(
    prompter: &dyn Prompter,
    link: &Path,
    kind: ConflictKind,
) -> Result<ConflictChoice, InstallError> {
    let response = prompter
        .ask(&conflict_question(link, kind))?
        .ok_or(InstallError::EndOfInput)?;
    ConflictChoice::parse(&response, kind).ok_or_else(|| InstallError::Aborted {
        response: strip_line_ending(&response).to_string(),
    })
}

/// Ask a yes/no question.  Only `y`/`yes` (any case) confirm; a closed
/// input stream declines.
///
/// # Errors
///
/// Returns [`InstallError::Prompt`] on I/O failure.
pub fn confirm(prompter: &dyn Prompter, question: &str) -> Result<bool, InstallError> {
    let answer = prompter.ask(&format!("{question} [y/N]: "))?;
    Ok(answer.is_some_and(|a| matches!(a.trim().to_ascii_lowercase().as_str(), "y" | "yes")))
}
