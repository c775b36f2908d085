//! Reconciler - turns evaluations into label changes
//!
//! The diff is scoped by the item's current labels: a label is only added
//! when absent and only removed when present, so repeated events with the
//! same outcome change nothing and never repeat a comment.

use crate::core::models::{Evaluation, LabelPlan, Rule};

/// Marker prefix appended to posted comments
pub const COMMENT_MARKER: &str = "formatcheck:missing-label";

/// Body of the comment posted when `label` is added
#[must_use]
pub fn comment_body(message: &str, label: &str) -> String {
    format!("{message}\n\n<!-- {COMMENT_MARKER}={label} -->")
}

/// Add one rule's contribution to the plan
pub fn reconcile(rule: &Rule, evaluation: &Evaluation, labels: &[String], plan: &mut LabelPlan) {
    if !evaluation.applicable {
        return;
    }

    let label = rule.missing_label();
    let present = labels.iter().any(|l| l == label);

    match (evaluation.satisfied, present) {
        (false, false) => {
            plan.add_label(label);
            if let Some(message) = rule.spec().missing_message() {
                plan.comment(label, comment_body(message, label));
            }
        },
        (true, true) => plan.remove_label(label),
        _ => {},
    }
}
