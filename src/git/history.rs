//! File history across renames.
//!
//! `git log --follow --name-status` prints one marker line per commit
//! followed by the status lines for the followed path:
//!
//! ```text
//! __GB__<hash>|<author>|<date>|<subject>
//! R100	a/f.kt	b/a/f.kt
//!
//! __GB__<hash>|<author>|<date>|<subject>
//! M	a/f.kt
//! ```
//!
//! The output is folded line by line through `HistoryFold`. The fold tracks
//! the name the file is known by while walking backwards in time: a rename
//! commit is recorded under its new name, and every older commit under the
//! old one.

use std::borrow::Cow;

use super::log::{parse_log_record, LOG_FORMAT};
use super::{revision_or_head, GitError, GitRepository};
use crate::models::FileHistoryEntry;

/// Prefix distinguishing commit markers from name-status lines.
pub(crate) const COMMIT_MARKER: &str = "__GB__";

/// One name-status line, reduced to what the fold needs.
#[derive(Debug, PartialEq, Eq)]
enum StatusLine<'a> {
    Renamed { from: Cow<'a, str>, to: Cow<'a, str> },
    Changed { path: Cow<'a, str> },
}

impl<'a> StatusLine<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            return None;
        }
        let status = fields[0];

        if status.starts_with('R') && fields.len() >= 3 {
            return Some(Self::Renamed {
                from: unquote(fields[1]),
                to: unquote(fields[2]),
            });
        }

        // Copies list source then destination; the destination is the
        // followed file.
        let path = if status.starts_with('C') && fields.len() >= 3 {
            fields[2]
        } else {
            fields[1]
        };
        Some(Self::Changed {
            path: unquote(path),
        })
    }
}

/// Undo git's C-style quoting of a path field.
///
/// git quotes paths containing `"`, `\` or control characters even with
/// `core.quotepath=off`. Unquoted fields are returned as-is.
fn unquote(field: &str) -> Cow<'_, str> {
    let Some(inner) = field
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return Cow::Borrowed(field);
    };

    let mut bytes = Vec::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            let mut buf = [0; 4];
            bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            continue;
        }
        match chars.next() {
            Some('a') => bytes.push(0x07),
            Some('b') => bytes.push(0x08),
            Some('t') => bytes.push(b'\t'),
            Some('n') => bytes.push(b'\n'),
            Some('v') => bytes.push(0x0b),
            Some('f') => bytes.push(0x0c),
            Some('r') => bytes.push(b'\r'),
            // Octal escapes encode raw bytes of a multi-byte name
            Some(d @ '0'..='7') => {
                let mut value = d.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                bytes.push(value as u8);
            }
            Some(other) => {
                let mut buf = [0; 4];
                bytes.extend_from_slice(other.encode_utf8(&mut buf).as_bytes());
            }
            None => bytes.push(b'\\'),
        }
    }

    Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
}

/// Accumulator for the history fold.
#[derive(Debug)]
pub(crate) struct HistoryFold {
    entries: Vec<FileHistoryEntry>,
    pending: Option<FileHistoryEntry>,
    /// Name the file has at the commit being read
    cursor: String,
    /// Name the file has before the pending commit, set by a rename
    next_cursor: Option<String>,
}

impl HistoryFold {
    pub(crate) fn new(path: &str) -> Self {
        Self {
            entries: Vec::new(),
            pending: None,
            cursor: path.to_string(),
            next_cursor: None,
        }
    }

    /// Consume one output line.
    pub(crate) fn apply(mut self, line: &str) -> Self {
        if let Some(record) = line.strip_prefix(COMMIT_MARKER) {
            self.flush();
            self.pending = parse_log_record(record).map(|entry| FileHistoryEntry {
                entry,
                path: self.cursor.clone(),
            });
            return self;
        }

        if line.trim().is_empty() {
            return self;
        }
        let Some(pending) = self.pending.as_mut() else {
            return self;
        };

        match StatusLine::parse(line) {
            Some(StatusLine::Renamed { from, to }) if to == self.cursor.as_str() => {
                pending.path = to.into_owned();
                self.next_cursor = Some(from.into_owned());
            }
            Some(StatusLine::Changed { path }) if path == self.cursor.as_str() => {
                pending.path = path.into_owned();
            }
            _ => {}
        }
        self
    }

    /// Flush the last pending entry and return the history.
    pub(crate) fn finish(mut self) -> Vec<FileHistoryEntry> {
        self.flush();
        self.entries
    }

    fn flush(&mut self) {
        if let Some(entry) = self.pending.take() {
            self.entries.push(entry);
        }
        if let Some(next) = self.next_cursor.take() {
            self.cursor = next;
        }
    }
}

pub(crate) fn parse_file_history(output: &str, path: &str) -> Vec<FileHistoryEntry> {
    output
        .lines()
        .fold(HistoryFold::new(path), HistoryFold::apply)
        .finish()
}

impl GitRepository {
    /// Commits touching `path` reachable from `rev`, newest first, each
    /// carrying the name the file had at that commit.
    ///
    /// An unknown path yields an empty history, not an error.
    pub fn resolve_file_history(
        &self,
        rev: &str,
        path: &str,
        limit: usize,
    ) -> Result<Vec<FileHistoryEntry>, GitError> {
        let rev = revision_or_head(rev);
        let path = path.strip_prefix('/').unwrap_or(path);
        let format = format!("--pretty=format:{COMMIT_MARKER}{LOG_FORMAT}");
        let limit = limit.to_string();

        let out = self.executor().run(&[
            "log",
            rev,
            &format,
            "--date=short",
            "-n",
            &limit,
            "--follow",
            "--name-status",
            "--",
            path,
        ])?;

        Ok(parse_file_history(&out, path))
    }
}
