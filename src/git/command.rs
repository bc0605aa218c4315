//! git command executor
//!
//! Runs the `git` binary inside a repository and captures its output.
//! Every call is a blocking subprocess; async callers go through
//! `spawn_blocking`.

use std::path::PathBuf;
use std::process::Command;

use super::GitError;

const GIT_COMMAND: &str = "git";

/// Config overrides prepended to every invocation so output stays parseable.
const FIXED_ARGS: &[&str] = &["-c", "color.ui=never", "-c", "core.quotepath=off"];

/// Executor for git commands in one repository
#[derive(Debug, Clone)]
pub struct GitExecutor {
    repo_path: PathBuf,
}

impl GitExecutor {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    /// Run git with the given arguments and return trimmed stdout.
    ///
    /// A non-zero exit becomes `GitError::CommandFailed` carrying the
    /// trimmed stderr.
    pub fn run(&self, args: &[&str]) -> Result<String, GitError> {
        tracing::debug!(repo = %self.repo_path.display(), ?args, "running git");

        let output = Command::new(GIT_COMMAND)
            .args(FIXED_ARGS)
            .args(args)
            .current_dir(&self.repo_path)
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GitError::GitNotFound
                } else {
                    GitError::Io(e)
                }
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let exit_code = output.status.code().unwrap_or(-1);
            tracing::debug!(exit_code, %stderr, "git command failed");
            Err(GitError::CommandFailed { stderr, exit_code })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{git_available, TestRepo};

    #[test]
    fn test_executor_keeps_repo_path() {
        let executor = GitExecutor::new("/tmp/test");
        assert_eq!(executor.repo_path, PathBuf::from("/tmp/test"));
    }

    #[test]
    fn test_run_trims_stdout() {
        if !git_available() {
            return;
        }
        let repo = TestRepo::new();
        let executor = GitExecutor::new(repo.path());
        let out = executor.run(&["rev-parse", "--is-inside-work-tree"]).unwrap();
        assert_eq!(out, "true");
    }

    #[test]
    fn test_run_failure_carries_stderr() {
        if !git_available() {
            return;
        }
        let repo = TestRepo::new();
        let executor = GitExecutor::new(repo.path());
        let err = executor.run(&["log", "no-such-revision"]).unwrap_err();
        match err {
            GitError::CommandFailed { stderr, exit_code } => {
                assert_ne!(exit_code, 0);
                assert!(!stderr.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
