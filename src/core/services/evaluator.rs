//! Rule evaluator - one rule against one item
//!
//! Applicability first, then the bypasses, then matching. Bypassed and
//! inapplicable rules never reach the matcher, so they never cost a lookup.

use log::debug;

use super::applicability::{bypass, is_applicable};
use super::extractor::corpora;
use super::matcher::match_corpus;
use super::validator::CrossReferenceValidator;
use crate::core::error::HandleError;
use crate::core::models::{CheckableItem, Evaluation, Rule};
use crate::core::ports::IssueTracker;

/// Evaluate a rule against an item
///
/// The rule is satisfied when any corpus matches and every reference that
/// corpus captured resolves to an issue. Corpora are tried in order and the
/// first satisfying one ends the evaluation.
pub fn evaluate<T: IssueTracker + ?Sized>(
    rule: &Rule,
    item: &CheckableItem,
    validator: &mut CrossReferenceValidator<'_, T>,
) -> Result<Evaluation, HandleError> {
    let spec = rule.spec();
    let label = rule.missing_label();

    if !is_applicable(spec, item) {
        debug!("#{} [{label}]: not applicable", item.number);
        return Ok(Evaluation::not_applicable());
    }
    if let Some(reason) = bypass(spec, item) {
        debug!("#{} [{label}]: bypassed ({reason:?})", item.number);
        return Ok(Evaluation::bypassed(reason));
    }

    let mut violated: Vec<String> = Vec::new();
    for corpus in corpora(spec, item) {
        let outcome = match_corpus(rule.pattern(), corpus.text);
        if !outcome.matched {
            continue;
        }

        let invalid = validator.invalid(&outcome.references)?;
        if invalid.is_empty() {
            debug!("#{} [{label}]: satisfied by {}", item.number, corpus.source);
            return Ok(Evaluation::satisfied());
        }

        debug!(
            "#{} [{label}]: {} matched with invalid references {invalid:?}",
            item.number, corpus.source
        );
        for reference in invalid {
            if !violated.iter().any(|v| v == reference) {
                violated.push(reference.to_string());
            }
        }
    }

    debug!("#{} [{label}]: not satisfied", item.number);
    Ok(Evaluation::unsatisfied(violated))
}
