use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::{blocking, check_revision, SharedState};
use crate::error::{AppError, Result};
use crate::git::paths::{normalize_repo_relative_path, normalize_tree_path};
use crate::models::{BlobResponse, TreeResponse};

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/api/v1/repos/{repo}/tree/{rev}", get(get_tree_root))
        .route("/api/v1/repos/{repo}/tree/{rev}/{*path}", get(get_tree))
        .route("/api/v1/repos/{repo}/blob/{rev}/{*path}", get(get_blob))
        .with_state(state)
}

async fn get_tree_root(
    State(state): State<SharedState>,
    Path((repo, rev)): Path<(String, String)>,
) -> Result<Json<TreeResponse>> {
    tree_response(state, repo, rev, String::new()).await
}

async fn get_tree(
    State(state): State<SharedState>,
    Path((repo, rev, path)): Path<(String, String, String)>,
) -> Result<Json<TreeResponse>> {
    tree_response(state, repo, rev, path).await
}

async fn tree_response(
    state: SharedState,
    name: String,
    rev: String,
    path: String,
) -> Result<Json<TreeResponse>> {
    let repo = state.repo(&name)?;
    check_revision(&rev)?;
    // Paths containing '-' as their first character would be read as options
    let path = normalize_tree_path(&repo.path, &path)
        .filter(|p| !p.starts_with('-'))
        .ok_or(AppError::InvalidPath(path))?;

    let response = blocking(move || {
        let entries = repo.list_tree(&rev, &path)?;
        Ok(TreeResponse {
            context: state.context(&repo, &rev),
            path,
            entries,
        })
    })
    .await?;

    Ok(Json(response))
}

async fn get_blob(
    State(state): State<SharedState>,
    Path((name, rev, path)): Path<(String, String, String)>,
) -> Result<Json<BlobResponse>> {
    let repo = state.repo(&name)?;
    check_revision(&rev)?;
    let path = normalize_repo_relative_path(&repo.path, &path).ok_or(AppError::InvalidPath(path))?;

    let response = blocking(move || {
        let content = repo.file_content(&rev, &path)?;
        Ok(BlobResponse {
            context: state.context(&repo, &rev),
            lines: content.split('\n').map(str::to_string).collect(),
            path,
        })
    })
    .await?;

    Ok(Json(response))
}
