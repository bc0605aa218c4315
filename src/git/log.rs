use super::{revision_or_head, GitError, GitRepository};
use crate::models::LogEntry;

/// `--pretty` format shared by the log and file-history queries.
pub(crate) const LOG_FORMAT: &str = "%H|%an|%ad|%s";

/// Parse one `hash|author|date|subject` record.
///
/// Author and subject may both contain `|`. The date is the first field
/// after the author shaped like `YYYY-MM-DD`; everything between the hash
/// and the date is the author. Records without a hash or a date field are
/// malformed and yield `None`.
pub(crate) fn parse_log_record(line: &str) -> Option<LogEntry> {
    let (hash, rest) = line.split_once('|')?;
    if hash.is_empty() {
        return None;
    }

    let mut offset = 0;
    loop {
        let sep = offset + rest[offset..].find('|')?;
        let (date, subject) = rest[sep + 1..].split_once('|')?;
        if is_short_date(date) {
            return Some(LogEntry {
                hash: hash.to_string(),
                author: rest[..sep].to_string(),
                date: date.to_string(),
                subject: subject.to_string(),
            });
        }
        offset = sep + 1;
    }
}

/// `git --date=short` output: `YYYY-MM-DD`.
fn is_short_date(field: &str) -> bool {
    let bytes = field.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

pub(crate) fn parse_log(output: &str) -> Vec<LogEntry> {
    output.lines().filter_map(parse_log_record).collect()
}

impl GitRepository {
    /// The `limit` most recent commits reachable from `rev`.
    pub fn log(&self, rev: &str, limit: usize) -> Result<Vec<LogEntry>, GitError> {
        let rev = revision_or_head(rev);
        let format = format!("--pretty=format:{LOG_FORMAT}");
        let limit = limit.to_string();

        let out = self.executor().run(&[
            "log",
            rev,
            &format,
            "--date=short",
            "-n",
            &limit,
            "--",
        ])?;

        Ok(parse_log(&out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{git_available, TestRepo};

    #[test]
    fn test_parse_log_record() {
        let entry = parse_log_record("abc123|Jane Doe|2024-03-01|Fix parser").unwrap();
        assert_eq!(entry.hash, "abc123");
        assert_eq!(entry.author, "Jane Doe");
        assert_eq!(entry.date, "2024-03-01");
        assert_eq!(entry.subject, "Fix parser");
    }

    #[test]
    fn test_parse_log_record_keeps_pipes_in_subject() {
        let entry = parse_log_record("abc|Jane|2024-03-01|a | b | c").unwrap();
        assert_eq!(entry.subject, "a | b | c");
    }

    #[test]
    fn test_parse_log_record_keeps_pipes_in_author() {
        let entry = parse_log_record("abc|Jane|Doe|2024-03-01|Fix | parser").unwrap();
        assert_eq!(entry.author, "Jane|Doe");
        assert_eq!(entry.date, "2024-03-01");
        assert_eq!(entry.subject, "Fix | parser");
    }

    #[test]
    fn test_parse_log_record_requires_date() {
        assert!(parse_log_record("abc|Jane|yesterday|subject").is_none());
        assert!(parse_log_record("abc|Jane|2024-3-1|subject").is_none());
        assert!(parse_log_record("|Jane|2024-03-01|subject").is_none());
    }

    #[test]
    fn test_parse_log_skips_malformed_lines() {
        let out = "abc|Jane|2024-03-01|one\nnot a record\n\
                   def|John|2024-03-02\nghi|Ann|2024-03-03|three";
        let entries = parse_log(out);
        let hashes: Vec<_> = entries.iter().map(|e| e.hash.as_str()).collect();
        assert_eq!(hashes, ["abc", "ghi"]);
    }

    #[test]
    fn test_parse_log_empty() {
        assert!(parse_log("").is_empty());
    }

    #[test]
    fn test_log_is_newest_first_and_bounded() {
        if !git_available() {
            return;
        }
        let repo = TestRepo::new();
        let mut hashes = Vec::new();
        for i in 0..3 {
            repo.write_file("file.txt", &format!("{i}\n"));
            hashes.push(repo.commit_all(&format!("commit {i}")));
        }

        let git = repo.open("test");
        let entries = git.log("", 2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].hash, hashes[2]);
        assert_eq!(entries[0].subject, "commit 2");
        assert_eq!(entries[1].hash, hashes[1]);
        assert_eq!(entries[0].author, "Test User");
        assert_eq!(entries[0].date.len(), 10);
    }

    #[test]
    fn test_log_unknown_revision_is_an_error() {
        if !git_available() {
            return;
        }
        let repo = TestRepo::new();
        repo.write_file("file.txt", "x\n");
        repo.commit_all("init");

        let git = repo.open("test");
        assert!(matches!(
            git.log("does-not-exist", 20),
            Err(GitError::CommandFailed { .. })
        ));
    }
}
