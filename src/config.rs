//! Repository configuration.
//!
//! Loaded once at startup from a JSON file:
//!
//! ```json
//! {
//!   "repos": [{ "name": "app", "path": "../app" }],
//!   "log_limit": 20,
//!   "history_limit": 50
//! }
//! ```
//!
//! Every repository is validated before the server binds; the resulting
//! `RepoRegistry` is never modified afterwards.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::git::{GitError, GitRepository, RepoRegistry};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("all repos must have a non-empty name")]
    EmptyName,

    #[error("repo name {0:?} cannot contain '/'")]
    NameContainsSlash(String),

    #[error("repo name {0:?} is duplicated")]
    DuplicateName(String),

    #[error("repo {0:?} must have a non-empty path")]
    EmptyPath(String),

    #[error("resolve path for repo {name:?}: {source}")]
    Resolve {
        name: String,
        source: std::io::Error,
    },

    #[error("repo {name:?} path {path:?} is invalid: {source}")]
    Missing {
        name: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("repo {name:?} path {path:?} is not a directory")]
    NotADirectory { name: String, path: PathBuf },

    #[error("repo {name:?} path {path:?} is not a valid git working tree: {source}")]
    InvalidRepository {
        name: String,
        path: PathBuf,
        source: GitError,
    },

    #[error("config must include at least one repo")]
    NoRepos,

    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoConfig {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub repos: Vec<RepoConfig>,
    /// Commits shown by the commit log
    #[serde(default = "default_log_limit")]
    pub log_limit: usize,
    /// Commits searched by file history and the diff path fallback
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_log_limit() -> usize {
    20
}

fn default_history_limit() -> usize {
    50
}

/// Query windows used by requests that don't ask for their own.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub log: usize,
    pub history: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            log: default_log_limit(),
            history: default_history_limit(),
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn limits(&self) -> Result<Limits, ConfigError> {
        if self.log_limit == 0 {
            return Err(ConfigError::ZeroLimit("log_limit"));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::ZeroLimit("history_limit"));
        }
        Ok(Limits {
            log: self.log_limit,
            history: self.history_limit,
        })
    }

    /// Validate every configured repository and build the registry.
    pub fn registry(&self) -> Result<RepoRegistry, ConfigError> {
        let mut registry = RepoRegistry::default();

        for repo in &self.repos {
            let name = repo.name.trim();
            if name.is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if name.contains('/') {
                return Err(ConfigError::NameContainsSlash(name.to_string()));
            }
            if registry.get(name).is_some() {
                return Err(ConfigError::DuplicateName(name.to_string()));
            }

            let repo_path = repo.path.trim();
            if repo_path.is_empty() {
                return Err(ConfigError::EmptyPath(name.to_string()));
            }
            let abs_path = std::path::absolute(repo_path).map_err(|source| ConfigError::Resolve {
                name: name.to_string(),
                source,
            })?;

            let metadata = std::fs::metadata(&abs_path).map_err(|source| ConfigError::Missing {
                name: name.to_string(),
                path: abs_path.clone(),
                source,
            })?;
            if !metadata.is_dir() {
                return Err(ConfigError::NotADirectory {
                    name: name.to_string(),
                    path: abs_path,
                });
            }

            let git_repo = GitRepository::open(name, &abs_path).map_err(|source| {
                ConfigError::InvalidRepository {
                    name: name.to_string(),
                    path: abs_path.clone(),
                    source,
                }
            })?;

            tracing::debug!(repo = %name, path = %git_repo.path.display(), "registered repository");
            registry.insert(git_repo);
        }

        if registry.is_empty() {
            return Err(ConfigError::NoRepos);
        }
        Ok(registry)
    }
}
