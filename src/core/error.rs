//! Per-event errors
//!
//! "Rule not satisfied" is a normal result, never an error. These cover the
//! tracker failing underneath the engine.

use std::fmt;

use thiserror::Error;

use super::models::IssueRef;

/// A label/comment write that failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Adding the label
    AddLabel(String),
    /// Removing the label
    RemoveLabel(String),
    /// Posting a comment for the label
    Comment(String),
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddLabel(label) => write!(f, "add label '{label}'"),
            Self::RemoveLabel(label) => write!(f, "remove label '{label}'"),
            Self::Comment(label) => write!(f, "comment about '{label}'"),
        }
    }
}

/// Errors that abort handling of one event
#[derive(Debug, Error)]
pub enum HandleError {
    /// A cross-reference lookup failed; no labels were changed
    #[error("failed to look up {reference} while checking {item}")]
    Lookup {
        /// The item being checked
        item: IssueRef,
        /// The referenced number
        reference: IssueRef,
        /// Tracker failure
        #[source]
        source: anyhow::Error,
    },

    /// Reading the item's labels failed; no labels were changed
    #[error("failed to list labels of {item}")]
    Labels {
        /// The item being checked
        item: IssueRef,
        /// Tracker failure
        #[source]
        source: anyhow::Error,
    },

    /// Reading the pull request's commits failed; no labels were changed
    #[error("failed to list commits of {item}")]
    Commits {
        /// The item being checked
        item: IssueRef,
        /// Tracker failure
        #[source]
        source: anyhow::Error,
    },

    /// A write failed; earlier writes of the same event stay applied
    #[error("failed to {mutation} on {item}")]
    Mutation {
        /// The item being changed
        item: IssueRef,
        /// What was attempted
        mutation: Mutation,
        /// Tracker failure
        #[source]
        source: anyhow::Error,
    },
}
