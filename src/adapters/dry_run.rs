//! Dry-run tracker
//!
//! Reads go to the wrapped tracker; writes are logged and recorded instead of
//! performed.

use std::sync::{Mutex, PoisonError};

use log::info;
use serde::Serialize;

use crate::core::models::{IssueRef, RepoId};
use crate::core::ports::{IssueTracker, TrackedIssue};

/// A write that was not performed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum RecordedWrite {
    /// Label addition
    AddLabel {
        /// Target item (`org/repo#N`)
        item: String,
        /// Label
        label: String,
    },
    /// Label removal
    RemoveLabel {
        /// Target item (`org/repo#N`)
        item: String,
        /// Label
        label: String,
    },
    /// Comment
    Comment {
        /// Target item (`org/repo#N`)
        item: String,
        /// Comment body
        body: String,
    },
}

/// Tracker wrapper that never writes
#[derive(Debug)]
pub struct DryRunTracker<T> {
    inner: T,
    writes: Mutex<Vec<RecordedWrite>>,
}

impl<T: IssueTracker> DryRunTracker<T> {
    /// Wrap a tracker
    #[must_use]
    pub const fn new(inner: T) -> Self {
        Self {
            inner,
            writes: Mutex::new(Vec::new()),
        }
    }

    /// Writes recorded so far, in order
    #[must_use]
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn record(&self, write: RecordedWrite) {
        info!("dry run: {write:?}");
        self.writes.lock().unwrap_or_else(PoisonError::into_inner).push(write);
    }
}

impl<T: IssueTracker> IssueTracker for DryRunTracker<T> {
    fn get_issue(&self, repo: &RepoId, number: u64) -> anyhow::Result<Option<TrackedIssue>> {
        self.inner.get_issue(repo, number)
    }

    fn list_labels(&self, item: &IssueRef) -> anyhow::Result<Vec<String>> {
        self.inner.list_labels(item)
    }

    fn add_label(&self, item: &IssueRef, label: &str) -> anyhow::Result<()> {
        self.record(RecordedWrite::AddLabel {
            item: item.to_string(),
            label: label.to_string(),
        });
        Ok(())
    }

    fn remove_label(&self, item: &IssueRef, label: &str) -> anyhow::Result<()> {
        self.record(RecordedWrite::RemoveLabel {
            item: item.to_string(),
            label: label.to_string(),
        });
        Ok(())
    }

    fn create_comment(&self, item: &IssueRef, body: &str) -> anyhow::Result<()> {
        self.record(RecordedWrite::Comment {
            item: item.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }

    fn list_commit_messages(&self, item: &IssueRef) -> anyhow::Result<Vec<String>> {
        self.inner.list_commit_messages(item)
    }
}
