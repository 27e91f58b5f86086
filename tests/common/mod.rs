// Shared helpers for integration tests.
//
// Provides a source tree and a home directory backed by temporary
// directories, plus a prompter that answers from a script, so each
// integration test can run a command end to end in isolation.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use dotlink::cli::GlobalOpts;
use dotlink::logging::Logger;
use dotlink::prompt::Prompter;

/// Answers prompts from a FIFO of canned responses; an exhausted queue
/// behaves like closed input.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    responses: Mutex<VecDeque<String>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(responses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.iter().map(|r| format!("{r}\n")).collect()),
            asked: Mutex::new(Vec::new()),
        })
    }

    /// Every question asked so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().expect("asked lock").clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, question: &str) -> io::Result<Option<String>> {
        self.asked.lock().expect("asked lock").push(question.to_string());
        Ok(self.responses.lock().expect("responses lock").pop_front())
    }
}

/// A dotfiles source tree and a home directory, both temporary.
pub struct TestTree {
    /// Source root walked for `.symlink` entries.
    pub src: tempfile::TempDir,
    /// Home directory links are created in.
    pub home: tempfile::TempDir,
}

impl TestTree {
    /// Canonical source root, as the commands resolve it.
    pub fn src_path(&self) -> PathBuf {
        dunce::canonicalize(self.src.path()).expect("canonicalize source root")
    }

    /// Path of `rel` under the home directory.
    pub fn home_path(&self, rel: &str) -> PathBuf {
        self.home.path().join(rel)
    }

    /// Global options pointing the commands at this tree.
    pub fn global(&self, dry_run: bool) -> GlobalOpts {
        GlobalOpts {
            dry_run,
            root: Some(self.src.path().to_path_buf()),
            home: Some(self.home.path().to_path_buf()),
        }
    }

    /// A fresh logger for one command run.
    pub fn logger(&self) -> Arc<Logger> {
        Arc::new(Logger::new("test"))
    }

    /// Whether `rel` under home is a symlink to `source` under the root.
    pub fn is_linked(&self, rel: &str, source: &str) -> bool {
        std::fs::read_link(self.home_path(rel))
            .is_ok_and(|target| target == self.src_path().join(source))
    }

    /// Contents of `rel` under home, following links.
    pub fn read_home(&self, rel: &str) -> String {
        std::fs::read_to_string(self.home_path(rel)).expect("read home file")
    }
}

/// Fluent builder for [`TestTree`].
pub struct TestTreeBuilder {
    tree: TestTree,
}

impl TestTreeBuilder {
    /// Begin with an empty source tree and an empty home directory.
    pub fn new() -> Self {
        Self {
            tree: TestTree {
                src: tempfile::tempdir().expect("create source dir"),
                home: tempfile::tempdir().expect("create home dir"),
            },
        }
    }

    /// Write a file at `rel` in the source tree.
    pub fn with_source(self, rel: &str, content: &str) -> Self {
        write(&self.tree.src.path().join(rel), content);
        self
    }

    /// Write a pre-existing file at `rel` in the home directory.
    pub fn with_home_file(self, rel: &str, content: &str) -> Self {
        write(&self.tree.home.path().join(rel), content);
        self
    }

    /// Create a directory at `rel` in the home directory.
    pub fn with_home_dir(self, rel: &str) -> Self {
        std::fs::create_dir_all(self.tree.home.path().join(rel)).expect("create home dir");
        self
    }

    /// Write `dotlink.toml` in the source root.
    pub fn with_settings(self, toml: &str) -> Self {
        write(&self.tree.src.path().join("dotlink.toml"), toml);
        self
    }

    /// Finish building.
    pub fn build(self) -> TestTree {
        self.tree
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent");
    }
    std::fs::write(path, content).expect("write file");
}
