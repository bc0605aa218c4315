use serde::{Deserialize, Serialize};

/// One commit as printed by `git log --pretty=format:%H|%an|%ad|%s`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub hash: String,
    pub author: String,
    /// Short date, `YYYY-MM-DD`
    pub date: String,
    pub subject: String,
}

/// A commit in a file's history together with the path the file had at
/// that commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHistoryEntry {
    #[serde(flatten)]
    pub entry: LogEntry,
    pub path: String,
}

/// Diff text for one path at one commit, with the path it was fetched under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDiff {
    pub diff: String,
    pub path: String,
}
