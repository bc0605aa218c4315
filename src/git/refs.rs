use super::{GitError, GitRepository};

impl GitRepository {
    /// Local branch names. A detached HEAD is not listed.
    pub fn branches(&self) -> Result<Vec<String>, GitError> {
        let out = self
            .executor()
            .run(&["branch", "--format=%(refname:short)"])?;
        Ok(out
            .lines()
            .filter(|line| !line.is_empty() && !line.starts_with('('))
            .map(str::to_string)
            .collect())
    }

    /// Checked-out branch, or `HEAD` when detached.
    pub fn current_branch(&self) -> Result<String, GitError> {
        self.executor().run(&["rev-parse", "--abbrev-ref", "HEAD"])
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{git_available, TestRepo};

    #[test]
    fn test_branches_and_current_branch() {
        if !git_available() {
            return;
        }
        let repo = TestRepo::new();
        repo.write_file("a.txt", "a\n");
        repo.commit_all("init");
        repo.git(&["checkout", "-q", "-b", "feature"]);
        let git = repo.open("test");

        let branches = git.branches().unwrap();
        assert_eq!(branches.len(), 2);
        assert!(branches.contains(&"feature".to_string()));
        assert_eq!(git.current_branch().unwrap(), "feature");
    }

    #[test]
    fn test_detached_head_reports_head() {
        if !git_available() {
            return;
        }
        let repo = TestRepo::new();
        repo.write_file("a.txt", "a\n");
        let first = repo.commit_all("one");
        repo.write_file("a.txt", "b\n");
        repo.commit_all("two");
        repo.git(&["checkout", "-q", &first]);
        let git = repo.open("test");

        assert_eq!(git.current_branch().unwrap(), "HEAD");
        assert_eq!(git.branches().unwrap().len(), 1);
    }

    #[test]
    fn test_no_branches_before_first_commit() {
        if !git_available() {
            return;
        }
        let repo = TestRepo::new();
        let git = repo.open("test");
        assert!(git.branches().unwrap().is_empty());
    }
}
