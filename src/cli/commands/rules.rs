//! Describe the rules configured for repositories

use std::path::Path;

use anyhow::Context;
use formatcheck::adapters::toml::load_rulebook;
use formatcheck::core::models::RepoId;
use formatcheck::core::services::repo_help;
use formatcheck::output::{OutputMode, RulesHelpResult};

/// Print the help text for each requested repository
pub fn rules(config: Option<&Path>, repos: &[String], mode: OutputMode) -> anyhow::Result<()> {
    let repos = repos
        .iter()
        .map(|raw| raw.parse::<RepoId>().with_context(|| format!("invalid repository '{raw}'")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let path = super::rules_path(config)?;
    let book = load_rulebook(&path)?;

    let result = RulesHelpResult {
        repos: repo_help(&book, &repos),
    };
    result.render(mode);
    Ok(())
}
