//! Domain models for formatcheck
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`RuleSpec`] / [`Rule`] - "items must match this, or get this label"
//! - [`RuleBook`] - every repository's compiled rules
//! - [`CheckableItem`] - the pull request or issue being checked
//! - [`Event`] - what happened to it
//! - [`Evaluation`] / [`LabelPlan`] - what the engine decided

mod evaluation;
mod event;
mod item;
mod pattern;
mod repo;
mod rule;
mod rulebook;

pub use evaluation::{Bypass, Evaluation, LabelPlan, PlannedComment};
pub use event::{
    Event, EventAction, Issue, IssueEvent, PullRequest, PullRequestEvent, TriggerPolicy,
};
pub use item::{CheckableItem, ItemKind};
pub use pattern::{CompiledPattern, ISSUE_NUMBER_GROUP, PatternTemplate};
pub(crate) use pattern::REPEATED_SPAN_GROUP;
pub use repo::{IssueRef, RepoId, RepoParseError};
pub use rule::{Rule, RuleSpec};
pub use rulebook::{ConfigError, RuleBook, RuleSet};
