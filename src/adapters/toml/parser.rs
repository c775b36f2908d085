//! TOML parser for rule files
//!
//! Handles reading and deserializing `formatcheck.toml` files.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::core::models::{RuleBook, RuleSet};

/// A rule file
#[derive(Debug, Default, Deserialize)]
pub struct RuleFile {
    /// Rule sets, each shared by a list of repositories
    #[serde(default)]
    pub format_checker: Vec<RuleSet>,
}

impl RuleFile {
    /// Compile every rule set
    pub fn compile(&self) -> anyhow::Result<RuleBook> {
        Ok(RuleBook::compile(&self.format_checker)?)
    }
}

/// Parse a rule file from a string
///
/// # Errors
///
/// Returns an error if the content is not a valid rule file.
pub fn parse_str(content: &str) -> anyhow::Result<RuleFile> {
    Ok(toml::from_str(content)?)
}

/// Load a rule file
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_file(path: &Path) -> anyhow::Result<RuleFile> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    parse_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Load and compile a rule file
pub fn load_rulebook(path: &Path) -> anyhow::Result<RuleBook> {
    load_file(path)?
        .compile()
        .with_context(|| format!("invalid rules in {}", path.display()))
}
