//! Text extractor - which texts a rule is checked against
//!
//! Each commit message is its own corpus: a match in any single commit
//! satisfies the rule, and concatenating them would let a pattern match
//! across commit boundaries.

use std::fmt;

use crate::core::models::{CheckableItem, ItemKind, RuleSpec};

/// Where a corpus came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusSource {
    /// The title
    Title,
    /// The body
    Body,
    /// The commit at this position
    Commit(usize),
}

impl fmt::Display for CorpusSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Body => write!(f, "body"),
            Self::Commit(index) => write!(f, "commit {}", index + 1),
        }
    }
}

/// One checkable text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corpus<'a> {
    /// Origin of the text
    pub source: CorpusSource,
    /// The text itself (never empty)
    pub text: &'a str,
}

/// Texts to check, in order: title, body, then each commit message
///
/// Empty texts are left out. Issues contribute no commit messages.
#[must_use]
pub fn corpora<'a>(rule: &RuleSpec, item: &'a CheckableItem) -> Vec<Corpus<'a>> {
    let mut out = Vec::new();

    if rule.title {
        out.push(Corpus {
            source: CorpusSource::Title,
            text: &item.title,
        });
    }
    if rule.body {
        out.push(Corpus {
            source: CorpusSource::Body,
            text: &item.body,
        });
    }
    if rule.commit_message && item.kind == ItemKind::PullRequest {
        out.extend(item.commit_messages.iter().enumerate().map(|(i, message)| Corpus {
            source: CorpusSource::Commit(i),
            text: message,
        }));
    }

    out.retain(|c| !c.text.is_empty());
    out
}
