use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use super::{blocking, check_revision, LimitQuery, SharedState};
use crate::error::Result;
use crate::models::{CommitListResponse, DiffResponse};

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/repos/{repo}/commits", get(get_commits_at_head))
        .route("/api/v1/repos/{repo}/commits/{rev}", get(get_commits))
        .route("/api/v1/repos/{repo}/commit/{hash}", get(get_commit))
        .with_state(state)
}

async fn get_commits_at_head(
    State(state): State<SharedState>,
    Path(name): Path<String>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<CommitListResponse>> {
    commits_response(state, name, None, query).await
}

async fn get_commits(
    State(state): State<SharedState>,
    Path((name, rev)): Path<(String, String)>,
    Query(query): Query<LimitQuery>,
) -> Result<Json<CommitListResponse>> {
    check_revision(&rev)?;
    commits_response(state, name, Some(rev), query).await
}

async fn commits_response(
    state: SharedState,
    name: String,
    rev: Option<String>,
    query: LimitQuery,
) -> Result<Json<CommitListResponse>> {
    let repo = state.repo(&name)?;
    let limit = query.or(state.limits.log);

    let response = blocking(move || {
        // Without an explicit revision, log the checked-out branch
        let rev = rev.unwrap_or_else(|| repo.current_branch().unwrap_or_default());
        let commits = repo.log(&rev, limit)?;
        Ok(CommitListResponse {
            context: state.context(&repo, &rev),
            commits,
        })
    })
    .await?;

    Ok(Json(response))
}

async fn get_commit(
    State(state): State<SharedState>,
    Path((name, hash)): Path<(String, String)>,
) -> Result<Json<DiffResponse>> {
    let repo = state.repo(&name)?;
    check_revision(&hash)?;

    let response = blocking(move || {
        let diff = repo.commit_diff(&hash)?;
        let rev = repo.current_branch().unwrap_or_default();
        Ok(DiffResponse {
            context: state.context(&repo, &rev),
            hash,
            diff,
            path: String::new(),
        })
    })
    .await?;

    Ok(Json(response))
}
