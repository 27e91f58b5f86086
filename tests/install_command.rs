#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `install` command.
//!
//! Each test builds a source tree and a home directory, runs the command end
//! to end with scripted answers, and checks the resulting filesystem.

mod common;

use common::{ScriptedPrompter, TestTreeBuilder};
use dotlink::cli::InstallOpts;
use dotlink::commands::install::run_with_prompter;
use dotlink::config::install::{InstallSettings, ParentPolicy};
use dotlink::config::symlinks::{discover, display_relative};
use dotlink::tasks::Outcome;

// ---------------------------------------------------------------------------
// Snapshot: discovered pairs
// ---------------------------------------------------------------------------

/// Snapshot of the pairs discovered in a representative tree, in walk order.
#[test]
fn discovered_pairs() {
    let tree = TestTreeBuilder::new()
        .with_source("bash/bashrc.symlink", "")
        .with_source("git/gitconfig.symlink", "")
        .with_source("git/README.md", "")
        .with_source("vim/vim.symlink/vimrc", "")
        .with_source("vim/vim.symlink/colors.symlink", "")
        .with_source("zshrc.symlink", "")
        .with_source(".git/hooks.symlink", "")
        .with_source("notes.txt", "")
        .build();

    let src = tree.src_path();
    let pairs = discover(&src, tree.home.path(), &InstallSettings::default().exclude).unwrap();
    let lines: Vec<String> = pairs
        .iter()
        .map(|p| {
            format!(
                "{} -> ~/{}",
                display_relative(&p.source_path, &src),
                display_relative(&p.link_path, tree.home.path())
            )
        })
        .collect();
    insta::assert_snapshot!("discovered_pairs", lines.join("\n"));
}

// ---------------------------------------------------------------------------
// Linking
// ---------------------------------------------------------------------------

/// `dotfiles/vim/.vimrc.symlink` is linked at `~/dotfiles/vim/.vimrc`.
#[test]
fn links_nested_entry_after_confirming_parent() {
    let tree = TestTreeBuilder::new()
        .with_source("dotfiles/vim/.vimrc.symlink", "set number")
        .build();
    let prompter = ScriptedPrompter::new(&["y"]);

    run_with_prompter(
        &tree.global(false),
        &InstallOpts::default(),
        &tree.logger(),
        prompter.clone(),
    )
    .unwrap();

    assert!(tree.is_linked("dotfiles/vim/.vimrc", "dotfiles/vim/.vimrc.symlink"));
    assert_eq!(tree.read_home("dotfiles/vim/.vimrc"), "set number");
    assert_eq!(prompter.asked().len(), 1);
}

#[test]
fn missing_parent_flag_overrides_settings() {
    let tree = TestTreeBuilder::new()
        .with_source("config/nvim/init.lua.symlink", "")
        .with_settings("[install]\nmissing_parent = \"skip\"\n")
        .build();
    let prompter = ScriptedPrompter::new(&[]);
    let opts = InstallOpts {
        missing_parent: Some(ParentPolicy::Create),
        ..InstallOpts::default()
    };

    run_with_prompter(&tree.global(false), &opts, &tree.logger(), prompter.clone()).unwrap();

    assert!(tree.is_linked("config/nvim/init.lua", "config/nvim/init.lua.symlink"));
    assert!(prompter.asked().is_empty());
}

#[test]
fn settings_skip_policy_leaves_parent_missing() {
    let tree = TestTreeBuilder::new()
        .with_source("config/nvim/init.lua.symlink", "")
        .with_settings("[install]\nmissing_parent = \"skip\"\n")
        .build();

    run_with_prompter(
        &tree.global(false),
        &InstallOpts::default(),
        &tree.logger(),
        ScriptedPrompter::new(&[]),
    )
    .unwrap();

    assert!(!tree.home_path("config").exists());
}

// ---------------------------------------------------------------------------
// Conflicts
// ---------------------------------------------------------------------------

#[test]
fn backup_then_overwrite_all() {
    let tree = TestTreeBuilder::new()
        .with_source("a.symlink", "new a")
        .with_source("b.symlink", "new b")
        .with_source("c.symlink", "new c")
        .with_home_file("a", "old a")
        .with_home_file("b", "old b")
        .with_home_file("c", "old c")
        .build();
    let prompter = ScriptedPrompter::new(&["b", "O"]);

    run_with_prompter(
        &tree.global(false),
        &InstallOpts::default(),
        &tree.logger(),
        prompter.clone(),
    )
    .unwrap();

    assert_eq!(prompter.asked().len(), 2);
    assert_eq!(tree.read_home("a.backup"), "old a");
    assert!(!tree.home_path("b.backup").exists());
    assert!(!tree.home_path("c.backup").exists());
    for name in ["a", "b", "c"] {
        assert_eq!(tree.read_home(name), format!("new {name}"));
    }
}

#[test]
fn skip_all_leaves_the_rest_of_the_run_unlinked() {
    let tree = TestTreeBuilder::new()
        .with_source("a.symlink", "new a")
        .with_source("b.symlink", "new b")
        .with_source("c.symlink", "new c")
        .with_home_file("b", "old b")
        .build();
    let log = tree.logger();

    run_with_prompter(
        &tree.global(false),
        &InstallOpts::default(),
        &log,
        ScriptedPrompter::new(&["S"]),
    )
    .unwrap();

    assert!(tree.is_linked("a", "a.symlink"));
    assert_eq!(tree.read_home("b"), "old b");
    assert!(!tree.home_path("c").exists());
    assert_eq!(log.count(Outcome::Linked), 1);
    assert_eq!(log.count(Outcome::Skipped), 2);
}

#[test]
fn unrecognized_answer_fails_the_command() {
    let tree = TestTreeBuilder::new()
        .with_source("a.symlink", "new")
        .with_source("b.symlink", "new")
        .with_home_file("a", "old")
        .build();

    let err = run_with_prompter(
        &tree.global(false),
        &InstallOpts::default(),
        &tree.logger(),
        ScriptedPrompter::new(&["q"]),
    )
    .unwrap_err();

    assert_eq!(err.to_string(), "1 task(s) failed");
    assert_eq!(tree.read_home("a"), "old");
    assert!(!tree.home_path("b").exists());
}

#[test]
fn existing_correct_links_are_left_alone() {
    let tree = TestTreeBuilder::new().with_source("a.symlink", "x").build();
    let opts = InstallOpts::default();

    run_with_prompter(&tree.global(false), &opts, &tree.logger(), ScriptedPrompter::new(&[]))
        .unwrap();
    let prompter = ScriptedPrompter::new(&["q"]);
    run_with_prompter(&tree.global(false), &opts, &tree.logger(), prompter.clone()).unwrap();

    assert!(prompter.asked().is_empty());
    assert!(tree.is_linked("a", "a.symlink"));
}

// ---------------------------------------------------------------------------
// Dry run and configuration
// ---------------------------------------------------------------------------

#[test]
fn dry_run_touches_nothing() {
    let tree = TestTreeBuilder::new()
        .with_source("a.symlink", "new")
        .with_source("deep/b.symlink", "new")
        .with_home_file("a", "old")
        .build();
    let prompter = ScriptedPrompter::new(&[]);

    run_with_prompter(
        &tree.global(true),
        &InstallOpts::default(),
        &tree.logger(),
        prompter.clone(),
    )
    .unwrap();

    assert!(prompter.asked().is_empty());
    assert_eq!(tree.read_home("a"), "old");
    assert!(!tree.home_path("deep").exists());
}

#[test]
fn malformed_settings_file_is_an_error() {
    let tree = TestTreeBuilder::new()
        .with_source("a.symlink", "")
        .with_settings("[install]\nmissing_parnet = \"create\"\n")
        .build();

    let err = run_with_prompter(
        &tree.global(false),
        &InstallOpts::default(),
        &tree.logger(),
        ScriptedPrompter::new(&[]),
    )
    .unwrap_err();

    assert!(format!("{err:#}").contains("dotlink.toml"));
    assert!(!tree.home_path("a").exists());
}
