use super::{revision_or_head, GitError, GitRepository};
use crate::models::{EntryType, TreeEntry};

/// Parse one `ls-tree` record: `<mode> SP <type> SP <hash> TAB <path>`.
fn parse_tree_record(record: &str, dir: &str) -> Option<TreeEntry> {
    let (meta, path) = record.split_once('\t')?;
    let mut fields = meta.split(' ');
    let mode = fields.next()?;
    let entry_type = EntryType::parse(fields.next()?)?;
    let hash = fields.next()?;

    Some(TreeEntry {
        mode: mode.to_string(),
        entry_type,
        hash: hash.to_string(),
        name: path.strip_prefix(dir).unwrap_or(path).to_string(),
        path: path.to_string(),
    })
}

/// Parse NUL-separated `ls-tree -z` output, directories first.
pub(crate) fn parse_tree(output: &str, dir: &str) -> Vec<TreeEntry> {
    let mut entries: Vec<TreeEntry> = output
        .split('\0')
        .filter(|record| !record.is_empty())
        .filter_map(|record| parse_tree_record(record, dir))
        .collect();

    // Stable, so git's name order holds within each group
    entries.sort_by_key(|e| e.entry_type != EntryType::Tree);
    entries
}

impl GitRepository {
    /// Children of directory `path` at `rev`. An empty path lists the root.
    pub fn list_tree(&self, rev: &str, path: &str) -> Result<Vec<TreeEntry>, GitError> {
        let rev = revision_or_head(rev);
        let mut dir = path.trim_start_matches('/').to_string();
        if !dir.is_empty() && !dir.ends_with('/') {
            dir.push('/');
        }
        let target = if dir.is_empty() { "." } else { dir.as_str() };

        let out = self.executor().run(&["ls-tree", "-z", rev, target])?;
        Ok(parse_tree(&out, &dir))
    }

    /// Blob content of `path` at `rev`.
    pub fn file_content(&self, rev: &str, path: &str) -> Result<String, GitError> {
        let rev = revision_or_head(rev);
        let path = path.strip_prefix('/').unwrap_or(path);
        self.executor().run(&["show", &format!("{rev}:{path}")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{git_available, TestRepo};

    const HASH: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";

    #[test]
    fn test_parse_tree_strips_directory_prefix() {
        let out = format!("100644 blob {HASH}\tsrc/main.rs\0040000 tree {HASH}\tsrc/git\0");
        let entries = parse_tree(&out, "src/");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entry_type, EntryType::Tree);
        assert_eq!(entries[0].name, "git");
        assert_eq!(entries[0].path, "src/git");
        assert_eq!(entries[1].mode, "100644");
        assert_eq!(entries[1].name, "main.rs");
        assert_eq!(entries[1].hash, HASH);
    }

    #[test]
    fn test_parse_tree_keeps_spaces_in_names() {
        let out = format!("100644 blob {HASH}\tmy  notes.txt");
        let entries = parse_tree(&out, "");
        assert_eq!(entries[0].name, "my  notes.txt");
    }

    #[test]
    fn test_parse_tree_skips_unknown_records() {
        let out = format!("garbage\0100644 weird {HASH}\tx\0160000 commit {HASH}\tvendor/lib\0");
        let entries = parse_tree(&out, "vendor/");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_type, EntryType::Commit);
        assert_eq!(entries[0].name, "lib");
    }

    #[test]
    fn test_list_tree_root_and_subdirectory() {
        if !git_available() {
            return;
        }
        let repo = TestRepo::new();
        repo.write_file("README.md", "# hi\n");
        repo.write_file("src/lib.rs", "pub fn f() {}\n");
        repo.write_file("src/git/mod.rs", "\n");
        repo.commit_all("init");
        let git = repo.open("test");

        let root = git.list_tree("HEAD", "").unwrap();
        let names: Vec<_> = root.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["src", "README.md"]);

        let src = git.list_tree("", "/src").unwrap();
        let names: Vec<_> = src.iter().map(|e| (e.name.as_str(), e.path.as_str())).collect();
        assert_eq!(names, [("git", "src/git"), ("lib.rs", "src/lib.rs")]);
    }

    #[test]
    fn test_list_tree_missing_directory_is_empty() {
        if !git_available() {
            return;
        }
        let repo = TestRepo::new();
        repo.write_file("a.txt", "a\n");
        repo.commit_all("init");
        let git = repo.open("test");

        assert!(git.list_tree("HEAD", "nope").unwrap().is_empty());
    }

    #[test]
    fn test_file_content_at_revision() {
        if !git_available() {
            return;
        }
        let repo = TestRepo::new();
        repo.write_file("a.txt", "first\n");
        let first = repo.commit_all("one");
        repo.write_file("a.txt", "second\n");
        repo.commit_all("two");
        let git = repo.open("test");

        assert_eq!(git.file_content(&first, "a.txt").unwrap(), "first");
        assert_eq!(git.file_content("", "/a.txt").unwrap(), "second");
        assert!(git.file_content("HEAD", "missing.txt").is_err());
    }
}
