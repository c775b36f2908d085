//! Issue tracker port
//!
//! Defines the interface to the issue/label API the engine reads from and
//! reconciles against.

use serde::{Deserialize, Serialize};

use super::super::models::{IssueRef, RepoId};

/// What the tracker knows about a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedIssue {
    /// The number looked up
    pub number: u64,
    /// Issues and pull requests share one numbering space
    pub is_pull_request: bool,
}

/// Issue tracker abstraction
///
/// Implementations are synchronous and make a single attempt per call.
/// Adding a present label or removing an absent one must not fail.
#[cfg_attr(test, mockall::automock)]
pub trait IssueTracker: Send + Sync {
    /// Look up an issue or pull request by number
    ///
    /// Returns `Ok(None)` when nothing exists under that number.
    fn get_issue(&self, repo: &RepoId, number: u64) -> anyhow::Result<Option<TrackedIssue>>;

    /// Labels currently on the item
    fn list_labels(&self, item: &IssueRef) -> anyhow::Result<Vec<String>>;

    /// Add a label to the item
    fn add_label(&self, item: &IssueRef, label: &str) -> anyhow::Result<()>;

    /// Remove a label from the item
    fn remove_label(&self, item: &IssueRef, label: &str) -> anyhow::Result<()>;

    /// Post a comment on the item
    fn create_comment(&self, item: &IssueRef, body: &str) -> anyhow::Result<()>;

    /// Commit messages of a pull request, oldest first
    fn list_commit_messages(&self, item: &IssueRef) -> anyhow::Result<Vec<String>>;
}
