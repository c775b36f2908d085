//! Applicability filter - does a rule apply to an item at all?
//!
//! Pure checks on rule configuration and item metadata; no text is looked at.

use crate::core::models::{Bypass, CheckableItem, ItemKind, RuleSpec};

/// Whether the rule applies to the item
///
/// Short-circuits in order: item kind, creation time, base branch. Branch
/// filtering only concerns pull requests; issues have no base branch.
#[must_use]
pub fn is_applicable(rule: &RuleSpec, item: &CheckableItem) -> bool {
    if !rule.applies_to(item.kind) {
        return false;
    }

    if let Some(start) = rule.start_time
        && item.created_at < start
    {
        return false;
    }

    if item.kind == ItemKind::PullRequest && !rule.branches.is_empty() {
        return item
            .base_branch
            .as_ref()
            .is_some_and(|base| rule.branches.iter().any(|b| b == base));
    }

    true
}

/// Whether the rule is bypassed for the item
///
/// A bypassed rule counts as satisfied without any matching.
#[must_use]
pub fn bypass(rule: &RuleSpec, item: &CheckableItem) -> Option<Bypass> {
    if rule.skip_label().is_some_and(|skip| item.has_label(skip)) {
        return Some(Bypass::SkipLabel);
    }
    if rule.trusted_users.iter().any(|user| user == &item.author) {
        return Some(Bypass::TrustedUser);
    }
    None
}
