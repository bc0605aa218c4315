//! Repository endpoints.
//!
//! - GET /api/v1/repos
//!   Configured repository names, in config order, plus the default repo.
//!
//! - GET /api/v1/repos/{repo}
//!   Current branch (`HEAD` when detached or unknown) and local branches.
//!   Used by the frontend to pick the initial tree revision.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::{blocking, SharedState};
use crate::error::Result;
use crate::git::DEFAULT_REVISION;
use crate::models::{RepoListResponse, RepositoryInfo};

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/repos", get(list_repos))
        .route("/api/v1/repos/{repo}", get(get_repository))
        .with_state(state)
}

async fn list_repos(State(state): State<SharedState>) -> Json<RepoListResponse> {
    Json(RepoListResponse {
        repos: state.repos.names().to_vec(),
        default_repo: state.repos.default_repo().map(str::to_string),
    })
}

async fn get_repository(
    State(state): State<SharedState>,
    Path(name): Path<String>,
) -> Result<Json<RepositoryInfo>> {
    let repo = state.repo(&name)?;

    let info = blocking(move || {
        let current_branch = repo
            .current_branch()
            .ok()
            .filter(|branch| !branch.is_empty())
            .unwrap_or_else(|| DEFAULT_REVISION.to_string());
        Ok(RepositoryInfo {
            name: repo.name.clone(),
            current_branch,
            branches: repo.branches().unwrap_or_default(),
        })
    })
    .await?;

    Ok(Json(info))
}
