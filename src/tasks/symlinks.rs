//! Install, remove, and report `.symlink` pairs.
use anyhow::Result;

use super::resolution::{Action, Resolution};
use super::{Context, Outcome, Task};
use crate::config::install::{LinkErrorPolicy, ParentPolicy};
use crate::config::symlinks::display_relative;
use crate::error::InstallError;
use crate::prompt::{ask_conflict, confirm};
use crate::resources::fs::lexists;
use crate::resources::symlink::{ConflictKind, SymlinkMapping};
use crate::resources::{Applicable, Resource, ResourceChange, ResourceState};

/// A filesystem change that ends in creating the link.
#[derive(Debug, Clone, Copy)]
enum Step {
    Link,
    CreateParent,
    Backup,
    Overwrite,
}

impl Step {
    const fn outcome(self) -> Outcome {
        match self {
            Self::Link | Self::CreateParent => Outcome::Linked,
            Self::Backup => Outcome::BackedUp,
            Self::Overwrite => Outcome::Overwritten,
        }
    }
}

/// Fail the task when any pair failed, after every pair was tried.
fn check_failed(failed: u32) -> Result<()> {
    if failed > 0 {
        anyhow::bail!("{failed} link(s) failed");
    }
    Ok(())
}

/// Link every discovered pair into the home directory, resolving conflicts
/// interactively.
#[derive(Debug)]
pub struct InstallSymlinks;

impl Task for InstallSymlinks {
    fn name(&self) -> &str {
        "Install symlinks"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.symlinks.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let mut resolution = Resolution::default();
        let mut failed = 0u32;

        for mapping in &ctx.config.symlinks {
            let outcome = install_pair(ctx, mapping, &mut resolution)?;
            ctx.log.record(&ctx.display_home(&mapping.link_path), outcome);

            if outcome == Outcome::Failed {
                if ctx.config.settings.on_link_error == LinkErrorPolicy::Abort {
                    return Err(InstallError::LinkFailed {
                        link: mapping.link_path.clone(),
                    }
                    .into());
                }
                failed += 1;
            }
        }

        check_failed(failed)
    }
}

/// Run the conflict resolution protocol for one pair.
///
/// `resolution` carries the "all" decisions between pairs of the same run.
/// Once skip-all was chosen nothing else is linked, free link paths
/// included.
///
/// # Errors
///
/// Returns an [`InstallError`] when the run must stop: an unrecognized
/// answer, closed input, or a prompt I/O failure.
pub fn install_pair(
    ctx: &Context,
    mapping: &SymlinkMapping,
    resolution: &mut Resolution,
) -> Result<Outcome, InstallError> {
    let shown = ctx.display_home(&mapping.link_path);

    if mapping.is_linked() {
        ctx.log.debug(&format!("ok: {shown} (already linked)"));
        return Ok(Outcome::AlreadyLinked);
    }

    if resolution.skip_all {
        ctx.log.info(&format!("skipped {shown}"));
        return Ok(Outcome::Skipped);
    }

    let Some(kind) = mapping.conflict() else {
        if mapping.missing_parent().is_none() {
            return Ok(apply_step(ctx, mapping, Step::Link));
        }
        return Ok(if approve_parent(ctx, mapping)? {
            apply_step(ctx, mapping, Step::CreateParent)
        } else {
            Outcome::Skipped
        });
    };

    let action = match resolution.standing() {
        Some(action) => action,
        None if ctx.dry_run => {
            ctx.log
                .dry_run(&format!("ask about existing {} at {shown}", noun(kind)));
            return Ok(Outcome::Skipped);
        }
        None => resolution.record(ask_conflict(
            ctx.prompter.as_ref(),
            &mapping.link_path,
            kind,
        )?),
    };

    Ok(match action {
        Action::Skip => {
            ctx.log.info(&format!("skipped {shown}"));
            Outcome::Skipped
        }
        Action::Backup => apply_step(ctx, mapping, Step::Backup),
        Action::Overwrite => apply_step(ctx, mapping, Step::Overwrite),
    })
}

const fn noun(kind: ConflictKind) -> &'static str {
    match kind {
        ConflictKind::Symlink => "symlink",
        ConflictKind::Entry => "file",
    }
}

/// Decide whether a missing parent directory may be created.
fn approve_parent(ctx: &Context, mapping: &SymlinkMapping) -> Result<bool, InstallError> {
    let Some(parent) = mapping.missing_parent() else {
        return Ok(true);
    };
    let parent_shown = ctx.display_home(parent);

    let approved = match ctx.config.settings.missing_parent {
        ParentPolicy::Create => true,
        ParentPolicy::Skip => false,
        ParentPolicy::Prompt if ctx.dry_run => {
            ctx.log
                .dry_run(&format!("ask to create directory {parent_shown}"));
            true
        }
        ParentPolicy::Prompt => confirm(
            ctx.prompter.as_ref(),
            &format!("Directory {} does not exist. Create it?", parent.display()),
        )?,
    };

    if !approved {
        ctx.log.info(&format!(
            "skipped {}: {parent_shown} does not exist",
            ctx.display_home(&mapping.link_path)
        ));
    }
    Ok(approved)
}

/// Perform `step` and create the link, or describe it in dry-run mode.
///
/// Failures are logged and reported as [`Outcome::Failed`].
fn apply_step(ctx: &Context, mapping: &SymlinkMapping, step: Step) -> Outcome {
    let shown = ctx.display_home(&mapping.link_path);
    let source = display_relative(&mapping.source_path, &ctx.config.root);

    if ctx.dry_run {
        let what = match step {
            Step::Link => "link",
            Step::CreateParent => "create parent and link",
            Step::Backup => "back up and link",
            Step::Overwrite => "overwrite and link",
        };
        ctx.log.dry_run(&format!("{what} {shown} -> {source}"));
        return step.outcome();
    }

    match perform(mapping, step) {
        Ok(()) => {
            if matches!(step, Step::Backup) {
                ctx.log.info(&format!(
                    "backed up {shown} to {}",
                    ctx.display_home(&mapping.backup_path())
                ));
            }
            ctx.log.debug(&format!("linked {}", mapping.description()));
            step.outcome()
        }
        Err(e) => {
            ctx.log.error(&format!("{shown}: {e:#}"));
            Outcome::Failed
        }
    }
}

fn perform(mapping: &SymlinkMapping, step: Step) -> Result<()> {
    match step {
        Step::Link => {}
        Step::CreateParent => mapping.create_parent()?,
        Step::Backup => {
            mapping.backup()?;
        }
        Step::Overwrite => mapping.clear()?,
    }
    mapping.apply()?;
    Ok(())
}

/// Remove links that point at their source and restore backups.
#[derive(Debug)]
pub struct UninstallSymlinks;

impl Task for UninstallSymlinks {
    fn name(&self) -> &str {
        "Remove symlinks"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.symlinks.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let mut failed = 0u32;

        for mapping in &ctx.config.symlinks {
            let shown = ctx.display_home(&mapping.link_path);
            let outcome = if mapping.is_linked() {
                uninstall_pair(ctx, mapping, &shown)
            } else if lexists(&mapping.link_path) {
                ctx.log.debug(&format!("not our link, leaving: {shown}"));
                Outcome::Skipped
            } else {
                continue;
            };

            ctx.log.record(&shown, outcome);
            if outcome == Outcome::Failed {
                failed += 1;
            }
        }

        check_failed(failed)
    }
}

/// Remove one of our links and move its backup back, if there is one.
fn uninstall_pair(ctx: &Context, mapping: &SymlinkMapping, shown: &str) -> Outcome {
    let backup = mapping.backup_path();
    let done = if lexists(&backup) {
        Outcome::Restored
    } else {
        Outcome::Removed
    };

    if ctx.dry_run {
        ctx.log.dry_run(&format!("remove {shown}"));
        if done == Outcome::Restored {
            ctx.log.dry_run(&format!(
                "restore {shown} from {}",
                ctx.display_home(&backup)
            ));
        }
        return done;
    }

    match mapping.remove() {
        Ok(ResourceChange::Applied) => {
            ctx.log.debug(&format!("removed {shown}"));
            if done == Outcome::Restored {
                ctx.log.info(&format!("restored {shown} from backup"));
            }
            done
        }
        Ok(ResourceChange::AlreadyCorrect | ResourceChange::Skipped { .. }) => Outcome::Skipped,
        Err(e) => {
            ctx.log.error(&format!("{shown}: {e:#}"));
            Outcome::Failed
        }
    }
}

/// Report the state of every pair without changing anything.
#[derive(Debug)]
pub struct ListSymlinks;

impl Task for ListSymlinks {
    fn name(&self) -> &str {
        "Symlink status"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.symlinks.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<()> {
        let (mut linked, mut pending, mut invalid) = (0u32, 0u32, 0u32);

        for mapping in &ctx.config.symlinks {
            let shown = ctx.display_home(&mapping.link_path);
            let source = display_relative(&mapping.source_path, &ctx.config.root);

            match mapping.current_state()? {
                ResourceState::Correct => {
                    linked += 1;
                    ctx.log.info(&format!("linked    {shown} -> {source}"));
                }
                ResourceState::Missing => {
                    pending += 1;
                    ctx.log.info(&format!("missing   {shown} -> {source}"));
                }
                ResourceState::Incorrect { current } => {
                    pending += 1;
                    ctx.log.warn(&format!("conflict  {shown} ({current})"));
                }
                ResourceState::Invalid { reason } => {
                    invalid += 1;
                    ctx.log.warn(&format!("invalid   {shown}: {reason}"));
                }
            }
        }

        ctx.log.info(&format!(
            "{linked} linked, {pending} not linked, {invalid} invalid"
        ));
        Ok(())
    }
}
