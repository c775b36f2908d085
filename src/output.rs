//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::collections::BTreeMap;

use colored::Colorize;
use serde::Serialize;

use crate::adapters::RecordedWrite;
use crate::core::models::{LabelPlan, RuleBook};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Result of a `rules` command
#[derive(Debug, Serialize)]
pub struct RulesHelpResult {
    /// Help text per repository (`org/repo`)
    pub repos: BTreeMap<String, String>,
}

impl RulesHelpResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                for (repo, text) in &self.repos {
                    println!("{}", repo.cyan().bold());
                    println!("{text}");
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Rule count for one repository
#[derive(Debug, Serialize)]
pub struct RepoRuleCount {
    /// Repository (`org/repo`)
    pub repo: String,
    /// Number of rules
    pub rules: usize,
}

/// Result of a `validate` command
#[derive(Debug, Serialize)]
pub struct ValidateResult {
    /// Rule file that was checked
    pub path: String,
    /// Whether the file compiled
    pub valid: bool,
    /// Rules per repository (empty when invalid)
    pub repos: Vec<RepoRuleCount>,
    /// Why the file is invalid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidateResult {
    /// Result for a compiled rule book
    #[must_use]
    pub fn valid(path: String, book: &RuleBook) -> Self {
        Self {
            path,
            valid: true,
            repos: book
                .repos()
                .map(|repo| RepoRuleCount {
                    repo: repo.to_string(),
                    rules: book.rules_for(repo).len(),
                })
                .collect(),
            error: None,
        }
    }

    /// Result for a rule file that failed to load
    #[must_use]
    pub const fn invalid(path: String, error: String) -> Self {
        Self {
            path,
            valid: false,
            repos: Vec::new(),
            error: Some(error),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if let Some(error) = &self.error {
            println!("{} {}", "✗".red().bold(), self.path);
            println!("  {}", error.red());
            return;
        }

        println!("{} {}", "✓".green().bold(), self.path);
        if self.repos.is_empty() {
            println!("  No repositories configured.");
        }
        for count in &self.repos {
            println!("  {:<40} {} rule(s)", count.repo, count.rules);
        }
    }
}

/// Result of a `handle` command
#[derive(Debug, Serialize)]
pub struct HandleResult {
    /// The item handled (`org/repo#N`)
    pub item: String,
    /// Whether writes were only recorded
    pub dry_run: bool,
    /// Label and comment changes
    pub plan: LabelPlan,
    /// Writes recorded instead of performed on a dry run
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub writes: Vec<RecordedWrite>,
}

impl HandleResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let suffix = if self.dry_run { " (dry run)" } else { "" };
        if self.plan.is_empty() {
            println!("{}: no changes{suffix}", self.item);
            return;
        }

        println!("{}{suffix}", self.item.bold());
        for label in &self.plan.remove {
            println!("  {} {label}", "-".green().bold());
        }
        for label in &self.plan.add {
            println!("  {} {label}", "+".red().bold());
        }
        for comment in &self.plan.comments {
            println!("  {} comment about {}", "✉".yellow(), comment.label);
        }
        if !self.writes.is_empty() {
            println!("  {} write(s) not performed", self.writes.len());
        }
    }
}
