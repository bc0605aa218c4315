//! Data transfer objects (DTOs) for API responses.
//!
//! - `commit`: LogEntry, FileHistoryEntry, ResolvedDiff
//! - `tree`: TreeEntry, EntryType
//! - `repository`: RepoContext and the per-route response bodies

pub mod commit;
pub mod repository;
pub mod tree;

pub use commit::*;
pub use repository::*;
pub use tree::*;
