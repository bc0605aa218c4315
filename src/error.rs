//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` for all request-level failures and implements Axum's
//! `IntoResponse` to convert them to HTTP responses with JSON error bodies.
//!
//! Error mappings:
//! - `RepoNotFound` → 404
//! - `InvalidPath`, `InvalidRevision` → 400
//! - `Git`, `Internal` → 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::git::GitError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid revision: {0}")]
    InvalidRevision(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Git(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RepoNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidPath(_) | AppError::InvalidRevision(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
