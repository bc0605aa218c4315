use git2::Repository;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{GitError, GitExecutor};

/// A configured, validated git work tree.
#[derive(Debug, Clone)]
pub struct GitRepository {
    pub name: String,
    pub path: PathBuf,
    executor: GitExecutor,
}

impl GitRepository {
    /// Open the work tree containing `path`.
    ///
    /// Bare repositories are rejected. Commands run from the work tree root
    /// so tree paths are always relative to it.
    pub fn open<P: AsRef<Path>>(name: &str, path: P) -> Result<Self, GitError> {
        let repo = Repository::discover(path.as_ref())?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| GitError::NotAWorkTree(path.as_ref().display().to_string()))?;
        let workdir = workdir.canonicalize()?;

        Ok(Self {
            name: name.to_string(),
            executor: GitExecutor::new(&workdir),
            path: workdir,
        })
    }

    pub fn executor(&self) -> &GitExecutor {
        &self.executor
    }
}

/// Immutable repository name -> repository mapping, in config order.
#[derive(Debug, Default)]
pub struct RepoRegistry {
    repos: HashMap<String, GitRepository>,
    names: Vec<String>,
}

impl RepoRegistry {
    /// Add a repository. Returns false if the name is already taken.
    pub fn insert(&mut self, repo: GitRepository) -> bool {
        if self.repos.contains_key(&repo.name) {
            return false;
        }
        self.names.push(repo.name.clone());
        self.repos.insert(repo.name.clone(), repo);
        true
    }

    pub fn get(&self, name: &str) -> Option<&GitRepository> {
        self.repos.get(name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The first configured repository.
    pub fn default_repo(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
