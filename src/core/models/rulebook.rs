//! Rule book - every repository's compiled rules
//!
//! Built once per configuration load. Compilation is where configuration
//! errors surface; a `RuleBook` that exists is valid.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{RepoId, RepoParseError, Rule, RuleSpec};

/// Errors found while compiling rule configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A `repos` entry is not `org/repo`
    #[error("rule set {set}: {source}")]
    InvalidRepo {
        /// Index of the rule set in the file
        set: usize,
        /// Parse failure
        #[source]
        source: RepoParseError,
    },

    /// The pattern does not compile once rendered for the repository
    #[error("{repo} rule {index}: invalid regexp: {source}")]
    InvalidPattern {
        /// Repository the pattern was rendered for
        repo: RepoId,
        /// Rule index within its rule set
        index: usize,
        /// Compilation failure
        #[source]
        source: regex::Error,
    },

    /// Rule targets neither pull requests nor issues
    #[error("{repo} rule {index}: enable at least one of pull_request, issue")]
    NoTarget {
        /// Repository
        repo: RepoId,
        /// Rule index within its rule set
        index: usize,
    },

    /// Rule checks no text at all
    #[error("{repo} rule {index}: enable at least one of title, body, commit_message")]
    NoCorpus {
        /// Repository
        repo: RepoId,
        /// Rule index within its rule set
        index: usize,
    },

    /// Rule has an empty `missing_label`
    #[error("{repo} rule {index}: missing_label must not be empty")]
    MissingLabel {
        /// Repository
        repo: RepoId,
        /// Rule index within its rule set
        index: usize,
    },

    /// Two rules of one repository share a label
    #[error("{repo}: missing_label '{label}' is used by more than one rule")]
    DuplicateMissingLabel {
        /// Repository
        repo: RepoId,
        /// The shared label
        label: String,
    },

    /// A rule would be skipped by its own missing label
    #[error("{repo} rule {index}: skip_label '{label}' equals missing_label")]
    SkipLabelIsMissingLabel {
        /// Repository
        repo: RepoId,
        /// Rule index within its rule set
        index: usize,
        /// The label
        label: String,
    },
}

/// Rules shared by a group of repositories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Repositories (`org/repo`) the rules apply to
    pub repos: Vec<String>,

    /// Rules, in evaluation order
    #[serde(default)]
    pub required_match_rules: Vec<RuleSpec>,
}

/// Compiled rules for every configured repository
#[derive(Debug, Clone, Default)]
pub struct RuleBook {
    repos: BTreeMap<RepoId, Vec<Rule>>,
}

impl RuleBook {
    /// A book with no rules
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate and compile rule sets
    ///
    /// A repository listed by several sets gets their rules concatenated in order.
    pub fn compile(sets: &[RuleSet]) -> Result<Self, ConfigError> {
        let mut repos: BTreeMap<RepoId, Vec<Rule>> = BTreeMap::new();

        for (set_index, set) in sets.iter().enumerate() {
            for raw in &set.repos {
                let repo: RepoId = raw.parse().map_err(|source| ConfigError::InvalidRepo {
                    set: set_index,
                    source,
                })?;

                for (index, spec) in set.required_match_rules.iter().enumerate() {
                    validate_spec(spec, &repo, index)?;
                    let rule = Rule::compile(spec.clone(), &repo).map_err(|source| {
                        ConfigError::InvalidPattern {
                            repo: repo.clone(),
                            index,
                            source,
                        }
                    })?;
                    repos.entry(repo.clone()).or_default().push(rule);
                }
            }
        }

        for (repo, rules) in &repos {
            let mut seen = HashSet::new();
            for rule in rules {
                if !seen.insert(rule.missing_label()) {
                    return Err(ConfigError::DuplicateMissingLabel {
                        repo: repo.clone(),
                        label: rule.missing_label().to_string(),
                    });
                }
            }
        }

        Ok(Self { repos })
    }

    /// Rules configured for a repository, in evaluation order
    #[must_use]
    pub fn rules_for(&self, repo: &RepoId) -> &[Rule] {
        self.repos.get(repo).map(Vec::as_slice).unwrap_or_default()
    }

    /// Repositories with at least one rule
    pub fn repos(&self) -> impl Iterator<Item = &RepoId> {
        self.repos.keys()
    }

    /// Total number of activated rules
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.repos.values().map(Vec::len).sum()
    }

    /// Whether no repository has rules
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

fn validate_spec(spec: &RuleSpec, repo: &RepoId, index: usize) -> Result<(), ConfigError> {
    let repo_id = || repo.clone();

    if !spec.pull_request && !spec.issue {
        return Err(ConfigError::NoTarget { repo: repo_id(), index });
    }
    if !spec.checks_anything() {
        return Err(ConfigError::NoCorpus { repo: repo_id(), index });
    }
    if spec.missing_label.trim().is_empty() {
        return Err(ConfigError::MissingLabel { repo: repo_id(), index });
    }
    if let Some(skip) = spec.skip_label()
        && skip == spec.missing_label
    {
        return Err(ConfigError::SkipLabelIsMissingLabel {
            repo: repo_id(),
            index,
            label: skip.to_string(),
        });
    }
    Ok(())
}
