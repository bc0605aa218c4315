//! git command execution and output parsing.

mod command;
pub mod diff;
pub mod history;
pub mod log;
pub mod paths;
pub mod refs;
pub mod repository;
pub mod tree;

pub use command::GitExecutor;
pub use repository::{GitRepository, RepoRegistry};

use std::io;
use thiserror::Error;

/// Revision used when a request names none.
pub const DEFAULT_REVISION: &str = "HEAD";

/// Errors from running git or opening a repository
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git command failed (exit code {exit_code}): {stderr}")]
    CommandFailed { stderr: String, exit_code: i32 },

    #[error("git is not installed or not in PATH")]
    GitNotFound,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0} is not a git working tree")]
    NotAWorkTree(String),

    #[error("Failed to open repository: {0}")]
    Open(#[from] git2::Error),
}

/// Fall back to `HEAD` for an empty revision.
pub(crate) fn revision_or_head(rev: &str) -> &str {
    if rev.is_empty() { DEFAULT_REVISION } else { rev }
}
