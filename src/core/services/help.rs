//! Human-readable descriptions of configured rules

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::core::models::{RepoId, Rule, RuleBook};

/// Describe one rule
#[must_use]
pub fn describe_rule(rule: &Rule) -> String {
    let spec = rule.spec();

    let mut items = Vec::new();
    if spec.pull_request {
        items.push("pull request");
    }
    if spec.issue {
        items.push("issue");
    }
    let mut texts = Vec::new();
    if spec.title {
        texts.push("title");
    }
    if spec.body {
        texts.push("body");
    }
    if spec.commit_message {
        texts.push("commit messages");
    }

    let mut out = format!(
        "The {} of every {} must be matched by regex `{}`; otherwise the label `{}` is added",
        texts.join(" or "),
        items.join(" and "),
        rule.pattern().as_str(),
        rule.missing_label(),
    );
    if spec.missing_message().is_some() {
        out.push_str(" and a comment is posted");
    }
    out.push('.');

    if rule.pattern().captures_references() {
        out.push_str(" Every captured issue number must refer to an existing issue.");
    }
    if let Some(start) = spec.start_time {
        let _ = write!(out, " Only items created from {} on are checked.", start.to_rfc3339());
    }
    if !spec.branches.is_empty() {
        let _ = write!(
            out,
            " Pull requests are only checked when targeting {}.",
            spec.branches.join(", ")
        );
    }
    if let Some(skip) = spec.skip_label() {
        let _ = write!(out, " The label `{skip}` skips this check.");
    }
    if !spec.trusted_users.is_empty() {
        let _ = write!(out, " Items by {} are not checked.", spec.trusted_users.join(", "));
    }
    out
}

/// Help text per requested repository, keyed by `org/repo`
#[must_use]
pub fn repo_help(book: &RuleBook, repos: &[RepoId]) -> BTreeMap<String, String> {
    repos
        .iter()
        .map(|repo| {
            let rules = book.rules_for(repo);
            let text = if rules.is_empty() {
                format!("No format rules are configured for {repo}.")
            } else {
                let mut text = format!("Format rules for {repo}:\n");
                for rule in rules {
                    let _ = writeln!(text, "- {}", describe_rule(rule));
                }
                text
            };
            (repo.to_string(), text)
        })
        .collect()
}
