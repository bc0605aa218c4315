//! Per-file history endpoints.
//!
//! - GET /api/v1/repos/{repo}/file-history/{rev}/{*path}?limit=
//!   Commits touching a file, newest first, each with the path the file had
//!   at that commit.
//!
//! - GET /api/v1/repos/{repo}/file-diff/{hash}/{*path}
//!   A file's diff in one commit. `path` may be the file's current name;
//!   the name at that commit is resolved from its history when needed and
//!   reported back in the response.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use super::{blocking, check_revision, LimitQuery, SharedState};
use crate::error::{AppError, Result};
use crate::git::paths::normalize_repo_relative_path;
use crate::models::{DiffResponse, FileHistoryResponse};

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/repos/{repo}/file-history/{rev}/{*path}", get(get_file_history))
        .route("/api/v1/repos/{repo}/file-diff/{hash}/{*path}", get(get_file_diff))
        .with_state(state)
}

async fn get_file_history(
    State(state): State<SharedState>,
    Path((name, rev, path)): Path<(String, String, String)>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<FileHistoryResponse>> {
    let repo = state.repo(&name)?;
    check_revision(&rev)?;
    let path = normalize_repo_relative_path(&repo.path, &path).ok_or(AppError::InvalidPath(path))?;
    let limit = query.or(state.limits.history);

    let response = blocking(move || {
        let commits = repo.resolve_file_history(&rev, &path, limit)?;
        Ok(FileHistoryResponse {
            context: state.context(&repo, &rev),
            path,
            commits,
        })
    })
    .await?;

    Ok(Json(response))
}

async fn get_file_diff(
    State(state): State<SharedState>,
    Path((name, hash, path)): Path<(String, String, String)>,
) -> Result<Json<DiffResponse>> {
    let repo = state.repo(&name)?;
    check_revision(&hash)?;
    let path = normalize_repo_relative_path(&repo.path, &path).ok_or(AppError::InvalidPath(path))?;
    let limit = state.limits.history;

    let response = blocking(move || {
        let resolved = repo.resolve_diff_with_fallback(&hash, &path, limit)?;
        let rev = repo.current_branch().unwrap_or_default();
        Ok(DiffResponse {
            context: state.context(&repo, &rev),
            hash,
            diff: resolved.diff,
            path: resolved.path,
        })
    })
    .await?;

    Ok(Json(response))
}
