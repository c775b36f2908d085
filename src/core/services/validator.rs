//! Cross-reference validator - do captured issue numbers point at issues?
//!
//! Issues and pull requests share one numbering space, so a number only
//! counts when the tracker knows it and it is not a pull request.

use std::collections::HashMap;
use std::fmt;

use log::debug;

use crate::core::error::HandleError;
use crate::core::models::{IssueRef, RepoId};
use crate::core::ports::IssueTracker;

/// Resolves captured references against the tracker
///
/// Results are cached for the lifetime of the validator, which is one event:
/// several rules capturing the same number cost a single lookup.
pub struct CrossReferenceValidator<'a, T: IssueTracker + ?Sized> {
    tracker: &'a T,
    item: IssueRef,
    cache: HashMap<u64, bool>,
}

impl<T: IssueTracker + ?Sized> fmt::Debug for CrossReferenceValidator<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossReferenceValidator")
            .field("item", &self.item)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl<'a, T: IssueTracker + ?Sized> CrossReferenceValidator<'a, T> {
    /// Validator for references made by `item`
    #[must_use]
    pub fn new(tracker: &'a T, item: IssueRef) -> Self {
        Self {
            tracker,
            item,
            cache: HashMap::new(),
        }
    }

    const fn repo(&self) -> &RepoId {
        &self.item.repo
    }

    /// Whether one captured reference resolves to an issue
    ///
    /// Captures that are not numbers are invalid without a lookup.
    pub fn is_valid(&mut self, reference: &str) -> Result<bool, HandleError> {
        let Ok(number) = reference.parse::<u64>() else {
            debug!("{}: reference '{reference}' is not a number", self.item);
            return Ok(false);
        };
        if let Some(&valid) = self.cache.get(&number) {
            return Ok(valid);
        }

        let found = self
            .tracker
            .get_issue(self.repo(), number)
            .map_err(|source| HandleError::Lookup {
                item: self.item.clone(),
                reference: self.repo().item(number),
                source,
            })?;

        let valid = found.is_some_and(|issue| !issue.is_pull_request);
        if !valid {
            debug!(
                "{}: #{number} is {}",
                self.item,
                if found.is_some() { "a pull request" } else { "not found" }
            );
        }
        self.cache.insert(number, valid);
        Ok(valid)
    }

    /// The references that do not resolve to an issue, in input order
    pub fn invalid<'r>(&mut self, references: &'r [String]) -> Result<Vec<&'r str>, HandleError> {
        let mut invalid = Vec::new();
        for reference in references {
            if !self.is_valid(reference)? {
                invalid.push(reference.as_str());
            }
        }
        Ok(invalid)
    }
}
