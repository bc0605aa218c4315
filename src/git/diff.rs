use super::{GitError, GitRepository, DEFAULT_REVISION};
use crate::models::ResolvedDiff;

impl GitRepository {
    /// Full patch for a commit (`git show <hash>`).
    pub fn commit_diff(&self, hash: &str) -> Result<String, GitError> {
        self.executor().run(&["show", hash])
    }

    /// Patch for a single path in a commit.
    ///
    /// Empty when the commit did not touch `path` under that name.
    pub fn commit_file_diff(&self, hash: &str, path: &str) -> Result<String, GitError> {
        let path = path.strip_prefix('/').unwrap_or(path);
        self.executor().run(&["show", hash, "--", path])
    }

    /// Patch for `path` in commit `hash`, where `path` is the file's current
    /// name.
    ///
    /// An empty direct diff usually means the file was called something else
    /// at that commit. The file's history from `HEAD` (up to `history_limit`
    /// entries) is then searched for the commit and the diff re-fetched under
    /// the name recorded there. Failures during that lookup are logged and
    /// the empty direct result is returned.
    pub fn resolve_diff_with_fallback(
        &self,
        hash: &str,
        path: &str,
        history_limit: usize,
    ) -> Result<ResolvedDiff, GitError> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let diff = self.commit_file_diff(hash, path)?;

        if !diff.trim().is_empty() {
            return Ok(ResolvedDiff {
                diff,
                path: path.to_string(),
            });
        }

        let resolved = self
            .historical_diff(hash, path, history_limit)
            .unwrap_or(ResolvedDiff {
                diff,
                path: path.to_string(),
            });
        Ok(resolved)
    }

    fn historical_diff(
        &self,
        hash: &str,
        path: &str,
        history_limit: usize,
    ) -> Option<ResolvedDiff> {
        let history = match self.resolve_file_history(DEFAULT_REVISION, path, history_limit) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!(
                    repo = %self.name,
                    %hash,
                    %path,
                    error = %e,
                    "history lookup for diff fallback failed"
                );
                return None;
            }
        };

        let entry = history.into_iter().find(|e| e.entry.hash == hash)?;
        if entry.path == path {
            return None;
        }

        match self.commit_file_diff(hash, &entry.path) {
            Ok(diff) => {
                tracing::debug!(%hash, from = %path, to = %entry.path, "resolved historical path");
                Some(ResolvedDiff {
                    diff,
                    path: entry.path,
                })
            }
            Err(e) => {
                tracing::warn!(
                    repo = %self.name,
                    %hash,
                    path = %entry.path,
                    error = %e,
                    "diff retry under historical path failed"
                );
                None
            }
        }
    }
}
