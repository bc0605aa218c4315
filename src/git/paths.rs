//! Request path and revision checks.
//!
//! Paths arrive from URL wildcards and may be absolute paths inside the
//! repository, contain `.`/`..` segments, or doubled slashes. They are
//! reduced to a clean path relative to the repository root, or rejected.

use std::path::Path;

/// Lexically clean a slash-separated path. Never returns an empty string.
fn clean(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(parts.last(), Some(last) if *last != "..") {
                    parts.pop();
                } else {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

/// Strip an absolute repository prefix, given with or without its leading
/// slash.
fn strip_repo_prefix<'a>(repo_path: &Path, path: &'a str) -> &'a str {
    let repo = repo_path.to_string_lossy().replace('\\', "/");
    let repo = repo.trim_end_matches('/');
    let repo_relative = repo.trim_start_matches('/');
    if repo_relative.is_empty() {
        return path;
    }

    let prefix = format!("{repo_relative}/");
    path.strip_prefix(prefix.as_str()).unwrap_or(path)
}

/// Normalize a requested file path relative to the repository root.
///
/// Returns `None` for empty paths, the root itself, and paths escaping the
/// repository.
pub fn normalize_repo_relative_path(repo_path: &Path, requested: &str) -> Option<String> {
    let path = requested.trim();
    let path = path.strip_prefix('/').unwrap_or(path);
    if path.is_empty() {
        return None;
    }

    let path = clean(strip_repo_prefix(repo_path, path));
    if path == "." || path == ".." || path.starts_with("../") {
        return None;
    }
    Some(path)
}

/// Like `normalize_repo_relative_path`, but the root is allowed and maps to
/// an empty path.
pub fn normalize_tree_path(repo_path: &Path, requested: &str) -> Option<String> {
    let trimmed = requested.trim().trim_matches('/');
    if trimmed.is_empty() || clean(trimmed) == "." {
        return Some(String::new());
    }
    normalize_repo_relative_path(repo_path, requested)
}

/// A revision or hash that is safe to pass to git as a positional argument.
pub fn is_safe_revision(rev: &str) -> bool {
    !rev.is_empty() && !rev.starts_with('-') && !rev.chars().any(char::is_control)
}
