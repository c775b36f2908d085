//! GitHub integration
//!
//! - [`payload`] - Webhook bodies to normalized events
//! - `client` - [`IssueTracker`](crate::core::ports::IssueTracker) over the REST API
//!   (feature `github`)

#[cfg(feature = "github")]
mod client;
pub mod payload;

#[cfg(feature = "github")]
pub use client::{GitHubError, GitHubTracker};
pub use payload::{PayloadError, parse_event, parse_issue_event, parse_pull_request_event};
