//! API route handlers - maps HTTP endpoints to git operations.
//!
//! Each submodule defines routes for a feature area:
//! - `repository`: Configured repos and per-repo info
//! - `tree`: Directory listing and blob content at a revision
//! - `commits`: Commit log and whole-commit diffs
//! - `history`: Per-file history across renames and per-file diffs
//!
//! git runs as a blocking subprocess, so every handler hands its work to
//! `spawn_blocking`.

pub mod commits;
pub mod history;
pub mod repository;
pub mod tree;

use axum::Router;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::Limits;
use crate::error::{AppError, Result};
use crate::git::paths::is_safe_revision;
use crate::git::{GitRepository, RepoRegistry};
use crate::models::RepoContext;

/// Read-only state shared by all requests.
pub struct AppState {
    pub repos: RepoRegistry,
    pub limits: Limits,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn repo(&self, name: &str) -> Result<GitRepository> {
        self.repos
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::RepoNotFound(name.to_string()))
    }

    /// Header data for a page. Branch lookup failures leave the list empty.
    fn context(&self, repo: &GitRepository, rev: &str) -> RepoContext {
        RepoContext {
            repo: repo.name.clone(),
            repos: self.repos.names().to_vec(),
            rev: rev.to_string(),
            branches: repo.branches().unwrap_or_default(),
        }
    }
}

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .merge(repository::routes(state.clone()))
        .merge(tree::routes(state.clone()))
        .merge(commits::routes(state.clone()))
        .merge(history::routes(state))
}

/// Run blocking git work off the async runtime.
async fn blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
}

fn check_revision(rev: &str) -> Result<()> {
    if is_safe_revision(rev) {
        Ok(())
    } else {
        Err(AppError::InvalidRevision(rev.to_string()))
    }
}

#[derive(Debug, Default, Deserialize)]
struct LimitQuery {
    limit: Option<usize>,
}

impl LimitQuery {
    fn or(&self, default: usize) -> usize {
        self.limit.filter(|&limit| limit > 0).unwrap_or(default)
    }
}
