//! Tree listing DTOs.
//!
//! - `TreeEntry`: one child of a directory at a revision (`git ls-tree`)
//! - `EntryType`: blob, tree, or submodule commit

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub mode: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub hash: String,
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Blob,
    Tree,
    Commit,
}

impl EntryType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "blob" => Some(Self::Blob),
            "tree" => Some(Self::Tree),
            "commit" => Some(Self::Commit),
            _ => None,
        }
    }
}
