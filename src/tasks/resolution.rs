//! Run-scoped conflict decisions.
use crate::prompt::ConflictChoice;

/// What to do with an entry that occupies a link path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the entry and do not link.
    Skip,
    /// Remove the entry, then link.
    Overwrite,
    /// Rename the entry to `<path>.backup`, then link.
    Backup,
}

/// The "all" decisions made so far in one install run.
///
/// Starts empty every run.  Per-item answers are returned as an [`Action`]
/// for the current pair only and never stored here.
///
/// # Examples
///
/// ```
/// use dotlink::prompt::ConflictChoice;
/// use dotlink::tasks::resolution::{Action, Resolution};
///
/// let mut resolution = Resolution::default();
/// assert_eq!(resolution.record(ConflictChoice::Overwrite), Action::Overwrite);
/// assert_eq!(resolution.standing(), None);
///
/// assert_eq!(resolution.record(ConflictChoice::BackupAll), Action::Backup);
/// assert_eq!(resolution.standing(), Some(Action::Backup));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Overwrite every later conflict.
    pub overwrite_all: bool,
    /// Back up every later conflict.
    pub backup_all: bool,
    /// Skip every later conflict.
    pub skip_all: bool,
}

impl Resolution {
    /// The action already decided for the next conflict, if any.
    ///
    /// The same action applies to every kind of entry: `backup_all` backs up
    /// symlinks too, even though a symlink prompt never offers backup.
    #[must_use]
    pub const fn standing(&self) -> Option<Action> {
        if self.skip_all {
            Some(Action::Skip)
        } else if self.overwrite_all {
            Some(Action::Overwrite)
        } else if self.backup_all {
            Some(Action::Backup)
        } else {
            None
        }
    }

    /// Record a prompt answer and return the action for the current pair.
    pub const fn record(&mut self, choice: ConflictChoice) -> Action {
        match choice {
            ConflictChoice::Skip => Action::Skip,
            ConflictChoice::SkipAll => {
                self.skip_all = true;
                Action::Skip
            }
            ConflictChoice::Overwrite => Action::Overwrite,
            ConflictChoice::OverwriteAll => {
                self.overwrite_all = true;
                Action::Overwrite
            }
            ConflictChoice::Backup => Action::Backup,
            ConflictChoice::BackupAll => {
                self.backup_all = true;
                Action::Backup
            }
        }
    }
}
