//! GitHub webhook payloads
//!
//! Converts raw `pull_request` and `issues` webhook bodies into normalized
//! [`Event`]s. Only the fields the rule engine looks at are read.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

use crate::core::models::{
    Event, EventAction, Issue, IssueEvent, PullRequest, PullRequestEvent, RepoId,
};

/// Webhook event name for pull requests
pub const PULL_REQUEST_EVENT: &str = "pull_request";

/// Webhook event name for issues
pub const ISSUES_EVENT: &str = "issues";

/// Payload conversion failures
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The body is not the expected JSON
    #[error("malformed {event} payload: {source}")]
    Json {
        /// Event name
        event: String,
        /// Decoding failure
        #[source]
        source: serde_json::Error,
    },

    /// The event name is not one the engine handles
    #[error("unsupported event '{0}' (expected pull_request or issues)")]
    UnsupportedEvent(String),
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

#[derive(Debug, Deserialize)]
struct User {
    login: String,
}

#[derive(Debug, Deserialize)]
struct Repository {
    name: String,
    owner: User,
}

impl Repository {
    fn id(self) -> RepoId {
        RepoId::new(self.owner.login, self.name)
    }
}

#[derive(Debug, Deserialize)]
struct BaseRef {
    #[serde(rename = "ref")]
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawPullRequest {
    number: u64,
    title: String,
    body: Option<String>,
    base: Option<BaseRef>,
    user: User,
    created_at: DateTime<Utc>,
    #[serde(default)]
    labels: Vec<Named>,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    number: u64,
    title: String,
    body: Option<String>,
    user: User,
    created_at: DateTime<Utc>,
    #[serde(default)]
    labels: Vec<Named>,
}

#[derive(Debug, Deserialize)]
struct RawPullRequestEvent {
    action: String,
    label: Option<Named>,
    repository: Repository,
    pull_request: RawPullRequest,
}

#[derive(Debug, Deserialize)]
struct RawIssueEvent {
    action: String,
    label: Option<Named>,
    repository: Repository,
    issue: RawIssue,
}

fn names(labels: Vec<Named>) -> Vec<String> {
    labels.into_iter().map(|l| l.name).collect()
}

fn action(action: &str, label: Option<&Named>) -> EventAction {
    EventAction::parse(action, label.map(|l| l.name.as_str()))
}

/// Convert a `pull_request` webhook body
pub fn parse_pull_request_event(json: &str) -> Result<PullRequestEvent, PayloadError> {
    let raw: RawPullRequestEvent =
        serde_json::from_str(json).map_err(|source| PayloadError::Json {
            event: PULL_REQUEST_EVENT.to_string(),
            source,
        })?;

    let pr = raw.pull_request;
    Ok(PullRequestEvent {
        action: action(&raw.action, raw.label.as_ref()),
        repo: raw.repository.id(),
        pull_request: PullRequest {
            number: pr.number,
            title: pr.title,
            body: pr.body.unwrap_or_default(),
            base_branch: pr.base.map(|b| b.name),
            author: pr.user.login,
            created_at: pr.created_at,
            labels: names(pr.labels),
        },
    })
}

/// Convert an `issues` webhook body
pub fn parse_issue_event(json: &str) -> Result<IssueEvent, PayloadError> {
    let raw: RawIssueEvent = serde_json::from_str(json).map_err(|source| PayloadError::Json {
        event: ISSUES_EVENT.to_string(),
        source,
    })?;

    let issue = raw.issue;
    Ok(IssueEvent {
        action: action(&raw.action, raw.label.as_ref()),
        repo: raw.repository.id(),
        issue: Issue {
            number: issue.number,
            title: issue.title,
            body: issue.body.unwrap_or_default(),
            author: issue.user.login,
            created_at: issue.created_at,
            labels: names(issue.labels),
        },
    })
}

/// Convert a webhook body given its event name (`X-GitHub-Event`)
pub fn parse_event(event: &str, json: &str) -> Result<Event, PayloadError> {
    match event {
        PULL_REQUEST_EVENT => parse_pull_request_event(json).map(Event::PullRequest),
        ISSUES_EVENT => parse_issue_event(json).map(Event::Issue),
        other => Err(PayloadError::UnsupportedEvent(other.to_string())),
    }
}
