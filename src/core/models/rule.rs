//! Rule model
//!
//! A rule declares: "items of these kinds must contain text matching this
//! pattern, or they get this label."

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CompiledPattern, ItemKind, PatternTemplate, RepoId};

/// A rule as written in configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSpec {
    /// Evaluate for pull request events
    pub pull_request: bool,

    /// Evaluate for issue events
    pub issue: bool,

    /// Check the title
    pub title: bool,

    /// Check the body
    pub body: bool,

    /// Check each commit message (pull requests only)
    pub commit_message: bool,

    /// Pattern template (see [`PatternTemplate`])
    pub regexp: String,

    /// Label applied while the rule is unsatisfied
    pub missing_label: String,

    /// Comment posted when the label is first applied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_message: Option<String>,

    /// Label that exempts an item from the rule
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_label: Option<String>,

    /// Items created before this instant are exempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    /// Base branches the rule is limited to (empty = all)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<String>,

    /// Authors exempt from the rule
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub trusted_users: Vec<String>,
}

impl RuleSpec {
    /// Whether the rule is evaluated for this kind of item
    #[must_use]
    pub const fn applies_to(&self, kind: ItemKind) -> bool {
        match kind {
            ItemKind::PullRequest => self.pull_request,
            ItemKind::Issue => self.issue,
        }
    }

    /// Whether at least one corpus is enabled
    #[must_use]
    pub const fn checks_anything(&self) -> bool {
        self.title || self.body || self.commit_message
    }

    /// The skip label, if set and non-empty
    #[must_use]
    pub fn skip_label(&self) -> Option<&str> {
        self.skip_label.as_deref().filter(|l| !l.is_empty())
    }

    /// The comment to post, if set and non-blank
    #[must_use]
    pub fn missing_message(&self) -> Option<&str> {
        self.missing_message.as_deref().filter(|m| !m.trim().is_empty())
    }

    /// The pattern as a template
    #[must_use]
    pub fn template(&self) -> PatternTemplate {
        PatternTemplate::new(self.regexp.clone())
    }
}

/// A rule activated for one repository
#[derive(Debug, Clone)]
pub struct Rule {
    spec: RuleSpec,
    pattern: CompiledPattern,
}

impl Rule {
    /// Render the rule's pattern for `repo` and compile it
    pub fn compile(spec: RuleSpec, repo: &RepoId) -> Result<Self, regex::Error> {
        let pattern = CompiledPattern::compile(&spec.template().render(repo))?;
        Ok(Self { spec, pattern })
    }

    /// The configuration the rule was built from
    #[must_use]
    pub const fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    /// The compiled pattern
    #[must_use]
    pub const fn pattern(&self) -> &CompiledPattern {
        &self.pattern
    }

    /// Label applied while unsatisfied
    #[must_use]
    pub fn missing_label(&self) -> &str {
        &self.spec.missing_label
    }
}
