//! Handle one webhook payload against GitHub

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use formatcheck::adapters::DryRunTracker;
use formatcheck::adapters::github::{GitHubTracker, parse_event};
use formatcheck::config::{ConfigAgent, Settings};
use formatcheck::core::models::Event;
use formatcheck::core::services::Dispatcher;
use formatcheck::output::{HandleResult, OutputMode};
use log::debug;

/// Webhook event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventKind {
    /// `pull_request` payload
    #[value(name = "pull_request")]
    PullRequest,
    /// `issues` payload
    #[value(name = "issues")]
    Issues,
}

impl EventKind {
    const fn name(self) -> &'static str {
        match self {
            Self::PullRequest => "pull_request",
            Self::Issues => "issues",
        }
    }
}

/// Arguments of the `handle` command
#[derive(Args, Debug)]
pub struct HandleArgs {
    /// Webhook event name (the `X-GitHub-Event` header)
    #[arg(long, value_enum)]
    pub event: EventKind,

    /// File holding the webhook JSON body
    #[arg(long)]
    pub payload: PathBuf,

    /// Log and report label changes without performing them
    #[arg(long)]
    pub dry_run: bool,

    /// Re-read the item's labels from GitHub instead of trusting the payload
    #[arg(long)]
    pub refresh_labels: bool,

    /// GitHub API URL (overrides the settings file)
    #[arg(long)]
    pub api_url: Option<String>,
}

/// Run the dispatcher for one payload
pub fn handle(config: Option<&Path>, args: &HandleArgs, mode: OutputMode) -> anyhow::Result<()> {
    let json = fs::read_to_string(&args.payload)
        .with_context(|| format!("failed to read {}", args.payload.display()))?;
    let event = parse_event(args.event.name(), &json)?;

    let agent = ConfigAgent::default();
    let book = agent.reload(&super::rules_path(config)?)?;

    let mut settings = Settings::load().github;
    if let Some(url) = &args.api_url {
        settings.api_url.clone_from(url);
    }
    let token = env::var(&settings.token_env).ok();
    if token.is_none() {
        debug!("{} is not set, calling the API anonymously", settings.token_env);
    }
    let tracker = GitHubTracker::new(&settings, token)?;

    let item = match &event {
        Event::PullRequest(e) => e.repo.item(e.pull_request.number),
        Event::Issue(e) => e.repo.item(e.issue.number),
    };

    let (plan, writes) = if args.dry_run {
        let tracker = DryRunTracker::new(tracker);
        let plan = Dispatcher::new(&tracker)
            .refresh_labels(args.refresh_labels)
            .handle(&event, &book)?;
        (plan, tracker.writes())
    } else {
        let plan = Dispatcher::new(&tracker)
            .refresh_labels(args.refresh_labels)
            .handle(&event, &book)?;
        (plan, Vec::new())
    };

    let result = HandleResult {
        item: item.to_string(),
        dry_run: args.dry_run,
        plan,
        writes,
    };
    result.render(mode);
    Ok(())
}
