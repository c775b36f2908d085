//! Repository and item identity
//!
//! Labels, comments and cross-reference lookups are all scoped by these.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a repository identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoParseError {
    /// Identifier was not of the form `org/repo`
    #[error("invalid repository '{0}', expected org/repo")]
    Malformed(String),
}

/// A repository identity (`org/repo`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoId {
    /// Owning organization or user
    pub org: String,
    /// Repository name
    pub name: String,
}

impl RepoId {
    /// Create a repository identity from its parts
    #[must_use]
    pub fn new(org: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            name: name.into(),
        }
    }

    /// Reference to an issue or pull request in this repository
    #[must_use]
    pub fn item(&self, number: u64) -> IssueRef {
        IssueRef {
            repo: self.clone(),
            number,
        }
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.name)
    }
}

impl FromStr for RepoId {
    type Err = RepoParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.split_once('/') {
            Some((org, name))
                if !org.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(org, name))
            },
            _ => Err(RepoParseError::Malformed(s.to_string())),
        }
    }
}

/// An issue or pull request, addressed by repository and number
///
/// Displays as `org/repo#N`, the namespace applied to every label mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueRef {
    /// Owning repository
    pub repo: RepoId,
    /// Item number (issues and pull requests share one numbering space)
    pub number: u64,
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repo, self.number)
    }
}
