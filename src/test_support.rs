//! Scratch git repositories for tests.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::git::GitRepository;

/// Whether a usable `git` binary is on PATH. Tests that need one return
/// early without it.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A temporary git work tree, removed on drop.
pub struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let repo = Self { dir };
        repo.git(&["init", "-q"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    pub fn open(&self, name: &str) -> GitRepository {
        GitRepository::open(name, self.path()).expect("Failed to open test repository")
    }

    /// Run git in this repository, panicking on failure.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .expect("Failed to execute git command");

        if !output.status.success() {
            panic!(
                "git {:?} failed with exit code {:?}:\n{}",
                args,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            );
        }

        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    pub fn write_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write file");
    }

    /// Stage everything, commit, and return the new HEAD hash.
    pub fn commit_all(&self, message: &str) -> String {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "-m", message]);
        self.head()
    }

    pub fn head(&self) -> String {
        self.git(&["rev-parse", "HEAD"])
    }

    /// Move `from` to `to` with `git mv`, creating parent directories.
    pub fn move_path(&self, from: &str, to: &str) {
        if let Some(parent) = Path::new(to).parent() {
            std::fs::create_dir_all(self.dir.path().join(parent))
                .expect("Failed to create parent directories");
        }
        self.git(&["mv", from, to]);
    }
}

pub const OLD_PATH: &str = "a/f.kt";
pub const NEW_PATH: &str = "b/a/f.kt";

pub const FILE_BEFORE: &str = r#"package com.example.loclogger

import android.net.Uri

fun mainActivityBefore() {
    val uri = Uri.parse("geo:0,0?q=1,2(label)")
    println(uri)
}
"#;

pub const FILE_AFTER: &str = r#"package com.example.loclogger

import androidx.core.net.toUri

fun mainActivityAfter() {
    val uri = "geo:0,0?q=1,2(label)".toUri()
    println(uri)
}
"#;

/// A file created ("v1"), modified ("v2"), then moved from `a/` to `b/a/`
/// ("v3").
pub struct RenamedFile {
    pub repo: TestRepo,
    pub hash_create: String,
    pub hash_modify: String,
    pub hash_move: String,
}

impl RenamedFile {
    pub fn new() -> Self {
        let repo = TestRepo::new();

        repo.write_file(OLD_PATH, FILE_BEFORE);
        let hash_create = repo.commit_all("v1");

        repo.write_file(OLD_PATH, FILE_AFTER);
        let hash_modify = repo.commit_all("v2");

        repo.move_path("a", "b/a");
        let hash_move = repo.commit_all("v3");

        Self {
            repo,
            hash_create,
            hash_modify,
            hash_move,
        }
    }
}
