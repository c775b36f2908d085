//! Configuration management
//!
//! - [`Settings`] - user preferences stored at `~/.config/formatcheck/config.toml`
//! - [`ConfigAgent`] - the active [`RuleBook`], swappable at runtime

use std::fs;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::adapters::toml::load_rulebook;
use crate::core::models::RuleBook;
use crate::paths;

/// User settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// GitHub API settings
    #[serde(default)]
    pub github: GitHubSettings,
}

/// GitHub API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubSettings {
    /// API base URL
    pub api_url: String,
    /// `User-Agent` header sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API token
    pub token_env: String,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            user_agent: format!("formatcheck/{}", crate::VERSION),
            timeout_secs: 30,
            token_env: "GITHUB_TOKEN".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if missing or invalid
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&paths::global_config())
    }

    /// Load settings from a specific file, or defaults if missing or invalid
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        fs::read_to_string(path)
            .ok()
            .and_then(|content| {
                toml::from_str(&content)
                    .inspect_err(|e| warn!("ignoring invalid settings in {}: {e}", path.display()))
                    .ok()
            })
            .unwrap_or_default()
    }
}

/// Holds the active rule book
///
/// Readers take a [`snapshot`](Self::snapshot) and keep using it for the
/// whole event; a reload swaps the book without disturbing them.
#[derive(Debug, Default)]
pub struct ConfigAgent {
    current: RwLock<Arc<RuleBook>>,
}

impl ConfigAgent {
    /// Agent serving `book`
    #[must_use]
    pub fn new(book: RuleBook) -> Self {
        Self {
            current: RwLock::new(Arc::new(book)),
        }
    }

    /// The active rule book
    #[must_use]
    pub fn snapshot(&self) -> Arc<RuleBook> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replace the active rule book
    pub fn set(&self, book: RuleBook) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(book);
    }

    /// Load and compile a rule file, replacing the active book on success
    ///
    /// On failure the previous book stays active.
    pub fn reload(&self, path: &Path) -> anyhow::Result<Arc<RuleBook>> {
        let book = load_rulebook(path)?;
        info!(
            "loaded {} rules for {} repositories from {}",
            book.rule_count(),
            book.repos().count(),
            path.display()
        );
        self.set(book);
        Ok(self.snapshot())
    }
}
