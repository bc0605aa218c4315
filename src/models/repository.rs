//! Response bodies for the JSON API.
//!
//! Every per-repository page carries a `RepoContext` (flattened) so the
//! frontend can render the repo switcher and branch list.

use serde::Serialize;

use super::{FileHistoryEntry, LogEntry, TreeEntry};

#[derive(Debug, Clone, Serialize)]
pub struct RepoContext {
    pub repo: String,
    pub repos: Vec<String>,
    pub rev: String,
    pub branches: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepoListResponse {
    pub repos: Vec<String>,
    pub default_repo: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RepositoryInfo {
    pub name: String,
    pub current_branch: String,
    pub branches: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreeResponse {
    #[serde(flatten)]
    pub context: RepoContext,
    pub path: String,
    pub entries: Vec<TreeEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BlobResponse {
    #[serde(flatten)]
    pub context: RepoContext,
    pub path: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitListResponse {
    #[serde(flatten)]
    pub context: RepoContext,
    pub commits: Vec<LogEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileHistoryResponse {
    #[serde(flatten)]
    pub context: RepoContext,
    pub path: String,
    pub commits: Vec<FileHistoryEntry>,
}

/// Whole-commit diff (`path` empty) or a single file's diff.
#[derive(Debug, Clone, Serialize)]
pub struct DiffResponse {
    #[serde(flatten)]
    pub context: RepoContext,
    pub hash: String,
    pub diff: String,
    pub path: String,
}
