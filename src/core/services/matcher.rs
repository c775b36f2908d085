//! Pattern matcher service - matches rule patterns against corpora
//!
//! This module contains pure matching logic with no I/O dependencies.

use crate::core::models::{CompiledPattern, ISSUE_NUMBER_GROUP, REPEATED_SPAN_GROUP};

/// Result of matching one corpus
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Whether the pattern matched anywhere in the corpus
    pub matched: bool,
    /// Captured issue numbers, deduplicated, in order of appearance
    pub references: Vec<String>,
}

/// Match a pattern against a corpus
///
/// An empty corpus never matches. Case sensitivity and line anchoring are
/// whatever the pattern declares (e.g. `(?im)`).
///
/// When the pattern captures issue numbers, every match contributes its
/// capture; captures inside a repeated group contribute every iteration of
/// that group, and nothing outside it.
#[must_use]
pub fn match_corpus(pattern: &CompiledPattern, corpus: &str) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();
    if corpus.is_empty() {
        return outcome;
    }

    let Some(capture) = pattern.reference_capture() else {
        outcome.matched = pattern.regex().is_match(corpus);
        return outcome;
    };

    let regex = capture.repeated.as_ref().map_or(pattern.regex(), |r| &r.span);
    for caps in regex.captures_iter(corpus) {
        outcome.matched = true;

        let mut found = Vec::new();
        if let Some(repeated) = &capture.repeated
            && let Some(span) = caps.name(REPEATED_SPAN_GROUP)
        {
            found.extend(
                repeated
                    .body
                    .captures_iter(span.as_str())
                    .filter_map(|c| c.name(ISSUE_NUMBER_GROUP))
                    .map(|m| m.as_str()),
            );
        }
        if found.is_empty()
            && let Some(m) = caps.name(ISSUE_NUMBER_GROUP)
        {
            found.push(m.as_str());
        }

        for reference in found {
            if !outcome.references.iter().any(|r| r == reference) {
                outcome.references.push(reference.to_string());
            }
        }
    }

    outcome
}
