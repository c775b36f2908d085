//! Evaluation results and label plans

use serde::Serialize;

/// Why a rule was treated as satisfied without matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bypass {
    /// The item carries the rule's skip label
    SkipLabel,
    /// The item author is a trusted user
    TrustedUser,
}

/// Outcome of evaluating one rule against one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    /// Whether the rule applies to the item at all
    pub applicable: bool,
    /// Whether the rule is satisfied (meaningless when not applicable)
    pub satisfied: bool,
    /// Set when satisfaction came from a bypass rather than matching
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bypass: Option<Bypass>,
    /// Captured issue references that did not resolve to an issue
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violated_captures: Vec<String>,
}

impl Evaluation {
    /// The rule does not apply
    #[must_use]
    pub const fn not_applicable() -> Self {
        Self {
            applicable: false,
            satisfied: false,
            bypass: None,
            violated_captures: Vec::new(),
        }
    }

    /// The rule is satisfied by a bypass
    #[must_use]
    pub const fn bypassed(bypass: Bypass) -> Self {
        Self {
            applicable: true,
            satisfied: true,
            bypass: Some(bypass),
            violated_captures: Vec::new(),
        }
    }

    /// The rule matched
    #[must_use]
    pub const fn satisfied() -> Self {
        Self {
            applicable: true,
            satisfied: true,
            bypass: None,
            violated_captures: Vec::new(),
        }
    }

    /// The rule did not match, or matched only with invalid references
    #[must_use]
    pub const fn unsatisfied(violated_captures: Vec<String>) -> Self {
        Self {
            applicable: true,
            satisfied: false,
            bypass: None,
            violated_captures,
        }
    }
}

/// A comment to post on the item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedComment {
    /// The label whose addition triggered the comment
    pub label: String,
    /// Comment body
    pub body: String,
}

/// Label and comment changes for one item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelPlan {
    /// Labels to add
    pub add: Vec<String>,
    /// Labels to remove
    pub remove: Vec<String>,
    /// Comments to post
    pub comments: Vec<PlannedComment>,
}

impl LabelPlan {
    /// Whether the plan changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty() && self.comments.is_empty()
    }

    /// Schedule a label addition
    pub fn add_label(&mut self, label: &str) {
        if !self.add.iter().any(|l| l == label) {
            self.add.push(label.to_string());
        }
    }

    /// Schedule a label removal
    pub fn remove_label(&mut self, label: &str) {
        if !self.remove.iter().any(|l| l == label) {
            self.remove.push(label.to_string());
        }
    }

    /// Schedule a comment
    pub fn comment(&mut self, label: &str, body: String) {
        self.comments.push(PlannedComment {
            label: label.to_string(),
            body,
        });
    }
}
