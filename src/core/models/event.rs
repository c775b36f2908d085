//! Normalized tracker events
//!
//! Transport-independent pull request and issue events. Webhook payloads are
//! converted into these by the `adapters::github::payload` module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CheckableItem, ItemKind, RepoId};

/// What happened to the item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "label")]
pub enum EventAction {
    /// Item was created
    Opened,
    /// Title or body was edited
    Edited,
    /// New commits were pushed (pull requests)
    Synchronize,
    /// Item was reopened
    Reopened,
    /// Draft pull request was marked ready
    ReadyForReview,
    /// A label was added
    Labeled(String),
    /// A label was removed
    Unlabeled(String),
    /// Any other action, carried by name
    Other(String),
}

/// Which rules an action re-evaluates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerPolicy {
    /// Evaluate every configured rule
    FullCheck,
    /// Evaluate only the rules whose skip label is this label
    SkipLabelGated(String),
    /// Evaluate nothing
    Ignore,
}

impl EventAction {
    /// Parse a webhook action name; `label` is the label involved in label events
    #[must_use]
    pub fn parse(action: &str, label: Option<&str>) -> Self {
        let label_name = || label.unwrap_or_default().to_string();
        match action {
            "opened" => Self::Opened,
            "edited" => Self::Edited,
            "synchronize" => Self::Synchronize,
            "reopened" => Self::Reopened,
            "ready_for_review" => Self::ReadyForReview,
            "labeled" => Self::Labeled(label_name()),
            "unlabeled" => Self::Unlabeled(label_name()),
            other => Self::Other(other.to_string()),
        }
    }

    /// The trigger policy table
    ///
    /// Content-changing actions re-check everything. Label actions can only
    /// change the outcome of rules gated by that label.
    #[must_use]
    pub fn trigger_policy(&self, kind: ItemKind) -> TriggerPolicy {
        match (kind, self) {
            (_, Self::Opened | Self::Edited | Self::Reopened)
            | (ItemKind::PullRequest, Self::Synchronize | Self::ReadyForReview) => {
                TriggerPolicy::FullCheck
            },
            (_, Self::Labeled(label) | Self::Unlabeled(label)) if !label.is_empty() => {
                TriggerPolicy::SkipLabelGated(label.clone())
            },
            _ => TriggerPolicy::Ignore,
        }
    }
}

/// Pull request content carried by an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Pull request number
    pub number: u64,
    /// Title
    pub title: String,
    /// Description
    #[serde(default)]
    pub body: String,
    /// Base branch the pull request targets
    pub base_branch: Option<String>,
    /// Author login
    pub author: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Labels on the pull request after the event happened
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Issue content carried by an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number
    pub number: u64,
    /// Title
    pub title: String,
    /// Description
    #[serde(default)]
    pub body: String,
    /// Author login
    pub author: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Labels on the issue after the event happened
    #[serde(default)]
    pub labels: Vec<String>,
}

/// A pull request event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestEvent {
    /// What happened
    pub action: EventAction,
    /// Repository the pull request lives in
    pub repo: RepoId,
    /// The pull request
    pub pull_request: PullRequest,
}

/// An issue event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueEvent {
    /// What happened
    pub action: EventAction,
    /// Repository the issue lives in
    pub repo: RepoId,
    /// The issue
    pub issue: Issue,
}

/// Any event the dispatcher understands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// Pull request event
    PullRequest(PullRequestEvent),
    /// Issue event
    Issue(IssueEvent),
}

impl From<&PullRequest> for CheckableItem {
    fn from(pr: &PullRequest) -> Self {
        Self {
            kind: ItemKind::PullRequest,
            number: pr.number,
            title: pr.title.clone(),
            body: pr.body.clone(),
            base_branch: pr.base_branch.clone(),
            author: pr.author.clone(),
            created_at: pr.created_at,
            commit_messages: Vec::new(),
            labels: pr.labels.clone(),
        }
    }
}

impl From<&Issue> for CheckableItem {
    fn from(issue: &Issue) -> Self {
        Self {
            kind: ItemKind::Issue,
            number: issue.number,
            title: issue.title.clone(),
            body: issue.body.clone(),
            base_branch: None,
            author: issue.author.clone(),
            created_at: issue.created_at,
            commit_messages: Vec::new(),
            labels: issue.labels.clone(),
        }
    }
}
