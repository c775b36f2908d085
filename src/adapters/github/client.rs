//! GitHub REST API tracker
//!
//! Implements [`IssueTracker`] with blocking `reqwest`. One request per call,
//! no retries.

use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode, Url, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::GitHubSettings;
use crate::core::models::{IssueRef, RepoId};
use crate::core::ports::{IssueTracker, TrackedIssue};

const PER_PAGE: usize = 100;

/// GitHub API failures
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The request could not be sent or the response not read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured API URL is unusable
    #[error("invalid API URL '{0}'")]
    InvalidUrl(String),

    /// GitHub answered with a non-success status
    #[error("GitHub API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message from the error body, if any
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct IssueBody {
    number: u64,
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct LabelBody {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CommitEntry {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
}

/// Tracker backed by the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubTracker {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl GitHubTracker {
    /// Create a tracker from settings and an optional token
    pub fn new(settings: &GitHubSettings, token: Option<String>) -> Result<Self, GitHubError> {
        let http = Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        let mut raw = settings.api_url.trim_end_matches('/').to_string();
        raw.push('/');
        let base_url = Url::parse(&raw).map_err(|_| GitHubError::InvalidUrl(settings.api_url.clone()))?;

        Ok(Self {
            http,
            base_url,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, GitHubError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GitHubError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn issue_url(&self, item: &IssueRef, rest: &[&str]) -> Result<Url, GitHubError> {
        let number = item.number.to_string();
        let mut segments = vec![
            "repos",
            item.repo.org.as_str(),
            item.repo.name.as_str(),
            "issues",
            number.as_str(),
        ];
        segments.extend_from_slice(rest);
        self.url(&segments)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{method} {url}");
        let builder = self
            .http
            .request(method, url)
            .header(header::ACCEPT, "application/vnd.github+json");
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn check(response: Response) -> Result<Response, GitHubError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ApiErrorBody>()
            .map(|body| body.message)
            .unwrap_or_default();
        Err(GitHubError::Api {
            status: status.as_u16(),
            message,
        })
    }

    fn fetch_issue(&self, repo: &RepoId, number: u64) -> Result<Option<TrackedIssue>, GitHubError> {
        let url = self.issue_url(&repo.item(number), &[])?;
        let response = self.request(Method::GET, url).send()?;
        if matches!(response.status(), StatusCode::NOT_FOUND | StatusCode::GONE) {
            return Ok(None);
        }
        let body: IssueBody = Self::check(response)?.json()?;
        Ok(Some(TrackedIssue {
            number: body.number,
            is_pull_request: body.pull_request.is_some(),
        }))
    }

    fn fetch_labels(&self, item: &IssueRef) -> Result<Vec<String>, GitHubError> {
        let labels: Vec<LabelBody> = self.fetch_pages(&self.issue_url(item, &["labels"])?)?;
        Ok(labels.into_iter().map(|l| l.name).collect())
    }

    fn post_label(&self, item: &IssueRef, label: &str) -> Result<(), GitHubError> {
        let url = self.issue_url(item, &["labels"])?;
        let body = serde_json::json!({ "labels": [label] });
        Self::check(self.request(Method::POST, url).json(&body).send()?)?;
        Ok(())
    }

    fn delete_label(&self, item: &IssueRef, label: &str) -> Result<(), GitHubError> {
        let url = self.issue_url(item, &["labels", label])?;
        let response = self.request(Method::DELETE, url).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::check(response)?;
        Ok(())
    }

    fn post_comment(&self, item: &IssueRef, body: &str) -> Result<(), GitHubError> {
        let url = self.issue_url(item, &["comments"])?;
        let body = serde_json::json!({ "body": body });
        Self::check(self.request(Method::POST, url).json(&body).send()?)?;
        Ok(())
    }

    fn fetch_commits(&self, item: &IssueRef) -> Result<Vec<String>, GitHubError> {
        let number = item.number.to_string();
        let base = self.url(&[
            "repos",
            item.repo.org.as_str(),
            item.repo.name.as_str(),
            "pulls",
            number.as_str(),
            "commits",
        ])?;

        let commits: Vec<CommitEntry> = self.fetch_pages(&base)?;
        Ok(commits.into_iter().map(|c| c.commit.message).collect())
    }

    /// Read every page of a list endpoint
    fn fetch_pages<T: DeserializeOwned>(&self, base: &Url) -> Result<Vec<T>, GitHubError> {
        let mut entries = Vec::new();
        for page in 1.. {
            let batch: Vec<T> =
                Self::check(self.request(Method::GET, page_url(base, page)).send()?)?.json()?;
            let last = batch.len() < PER_PAGE;
            entries.extend(batch);
            if last {
                break;
            }
        }
        Ok(entries)
    }
}

fn page_url(base: &Url, page: usize) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("per_page", &PER_PAGE.to_string())
        .append_pair("page", &page.to_string());
    url
}

impl IssueTracker for GitHubTracker {
    fn get_issue(&self, repo: &RepoId, number: u64) -> anyhow::Result<Option<TrackedIssue>> {
        Ok(self.fetch_issue(repo, number)?)
    }

    fn list_labels(&self, item: &IssueRef) -> anyhow::Result<Vec<String>> {
        Ok(self.fetch_labels(item)?)
    }

    fn add_label(&self, item: &IssueRef, label: &str) -> anyhow::Result<()> {
        Ok(self.post_label(item, label)?)
    }

    fn remove_label(&self, item: &IssueRef, label: &str) -> anyhow::Result<()> {
        Ok(self.delete_label(item, label)?)
    }

    fn create_comment(&self, item: &IssueRef, body: &str) -> anyhow::Result<()> {
        Ok(self.post_comment(item, body)?)
    }

    fn list_commit_messages(&self, item: &IssueRef) -> anyhow::Result<Vec<String>> {
        Ok(self.fetch_commits(item)?)
    }
}
