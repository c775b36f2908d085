//! Checkable item model
//!
//! The transient view of a pull request or issue that rules are evaluated against.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of tracker item an event is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A pull request
    PullRequest,
    /// A plain issue
    Issue,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PullRequest => write!(f, "pull request"),
            Self::Issue => write!(f, "issue"),
        }
    }
}

/// A pull request or issue, as seen by rule evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckableItem {
    /// Pull request or issue
    pub kind: ItemKind,
    /// Item number
    pub number: u64,
    /// Title text
    pub title: String,
    /// Body text (empty when the item has no description)
    pub body: String,
    /// Base branch (pull requests only)
    pub base_branch: Option<String>,
    /// Login of the item author
    pub author: String,
    /// When the item was created
    pub created_at: DateTime<Utc>,
    /// Commit messages in order (pull requests only, filled on demand)
    pub commit_messages: Vec<String>,
    /// Label names currently on the item
    pub labels: Vec<String>,
}

impl CheckableItem {
    /// Whether the item currently carries the given label
    #[must_use]
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}
