//! Dispatcher - entry point for pull request and issue events
//!
//! Picks the rules an event re-evaluates, builds the label plan for the
//! item, then applies it through the tracker. The plan is computed in full
//! before the first write, so a failed lookup leaves every label untouched.

use std::fmt;

use log::{debug, info, warn};

use super::applicability::{bypass, is_applicable};
use super::evaluator::evaluate;
use super::reconciler::reconcile;
use super::validator::CrossReferenceValidator;
use crate::core::error::{HandleError, Mutation};
use crate::core::models::{
    CheckableItem, Event, EventAction, IssueEvent, IssueRef, ItemKind, LabelPlan, PullRequestEvent,
    RepoId, Rule, RuleBook, TriggerPolicy,
};
use crate::core::ports::IssueTracker;

/// Handles events against a tracker
pub struct Dispatcher<'a, T: IssueTracker + ?Sized> {
    tracker: &'a T,
    refresh_labels: bool,
}

impl<T: IssueTracker + ?Sized> fmt::Debug for Dispatcher<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("refresh_labels", &self.refresh_labels)
            .finish_non_exhaustive()
    }
}

impl<'a, T: IssueTracker + ?Sized> Dispatcher<'a, T> {
    /// Dispatcher using the labels carried by each event
    #[must_use]
    pub const fn new(tracker: &'a T) -> Self {
        Self {
            tracker,
            refresh_labels: false,
        }
    }

    /// Re-read the item's labels from the tracker before reconciling
    #[must_use]
    pub const fn refresh_labels(mut self, refresh: bool) -> Self {
        self.refresh_labels = refresh;
        self
    }

    /// Handle any event, returning the plan that was applied
    pub fn handle(&self, event: &Event, book: &RuleBook) -> Result<LabelPlan, HandleError> {
        match event {
            Event::PullRequest(event) => self.handle_pull_request(event, book),
            Event::Issue(event) => self.handle_issue(event, book),
        }
    }

    /// Handle a pull request event
    pub fn handle_pull_request(
        &self,
        event: &PullRequestEvent,
        book: &RuleBook,
    ) -> Result<LabelPlan, HandleError> {
        let item = CheckableItem::from(&event.pull_request);
        self.run(&event.repo, &event.action, item, book)
    }

    /// Handle an issue event
    pub fn handle_issue(&self, event: &IssueEvent, book: &RuleBook) -> Result<LabelPlan, HandleError> {
        let item = CheckableItem::from(&event.issue);
        self.run(&event.repo, &event.action, item, book)
    }

    /// Compute the plan for an event without applying it
    pub fn plan(&self, event: &Event, book: &RuleBook) -> Result<LabelPlan, HandleError> {
        let (repo, action, item) = match event {
            Event::PullRequest(e) => (&e.repo, &e.action, CheckableItem::from(&e.pull_request)),
            Event::Issue(e) => (&e.repo, &e.action, CheckableItem::from(&e.issue)),
        };
        self.plan_item(repo, action, item, book)
    }

    fn run(
        &self,
        repo: &RepoId,
        action: &EventAction,
        item: CheckableItem,
        book: &RuleBook,
    ) -> Result<LabelPlan, HandleError> {
        let target = repo.item(item.number);
        let plan = self.plan_item(repo, action, item, book)?;
        self.apply(&target, &plan)?;
        Ok(plan)
    }

    fn plan_item(
        &self,
        repo: &RepoId,
        action: &EventAction,
        mut item: CheckableItem,
        book: &RuleBook,
    ) -> Result<LabelPlan, HandleError> {
        let mut plan = LabelPlan::default();

        let rules = book.rules_for(repo);
        if rules.is_empty() {
            warn!("{repo}: no rules configured, ignoring {} #{}", item.kind, item.number);
            return Ok(plan);
        }

        let selected: Vec<&Rule> = match action.trigger_policy(item.kind) {
            TriggerPolicy::FullCheck => rules.iter().collect(),
            TriggerPolicy::SkipLabelGated(label) => rules
                .iter()
                .filter(|rule| rule.spec().skip_label() == Some(label.as_str()))
                .collect(),
            TriggerPolicy::Ignore => {
                debug!("{repo}#{}: action {action:?} ignored", item.number);
                return Ok(plan);
            },
        };
        if selected.is_empty() {
            debug!("{repo}#{}: no rule gated by this label", item.number);
            return Ok(plan);
        }

        let target = repo.item(item.number);
        if self.refresh_labels {
            item.labels = self
                .tracker
                .list_labels(&target)
                .map_err(|source| HandleError::Labels {
                    item: target.clone(),
                    source,
                })?;
        }

        let needs_commits = item.kind == ItemKind::PullRequest
            && selected.iter().any(|rule| {
                let spec = rule.spec();
                spec.commit_message && is_applicable(spec, &item) && bypass(spec, &item).is_none()
            });
        if needs_commits {
            item.commit_messages = self
                .tracker
                .list_commit_messages(&target)
                .map_err(|source| HandleError::Commits {
                    item: target.clone(),
                    source,
                })?;
        }

        let mut validator = CrossReferenceValidator::new(self.tracker, target);
        for rule in selected {
            let evaluation = evaluate(rule, &item, &mut validator)?;
            reconcile(rule, &evaluation, &item.labels, &mut plan);
        }
        Ok(plan)
    }

    /// Apply a plan: removals, then additions, then comments
    ///
    /// Stops at the first failure; earlier writes are not rolled back.
    pub fn apply(&self, item: &IssueRef, plan: &LabelPlan) -> Result<(), HandleError> {
        let failed = |mutation: Mutation| {
            let item = item.clone();
            move |source| HandleError::Mutation {
                item,
                mutation,
                source,
            }
        };

        for label in &plan.remove {
            info!("{item}: removing label '{label}'");
            self.tracker
                .remove_label(item, label)
                .map_err(failed(Mutation::RemoveLabel(label.clone())))?;
        }
        for label in &plan.add {
            info!("{item}: adding label '{label}'");
            self.tracker
                .add_label(item, label)
                .map_err(failed(Mutation::AddLabel(label.clone())))?;
        }
        for comment in &plan.comments {
            info!("{item}: commenting about '{}'", comment.label);
            self.tracker
                .create_comment(item, &comment.body)
                .map_err(failed(Mutation::Comment(comment.label.clone())))?;
        }
        Ok(())
    }
}
