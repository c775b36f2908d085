//! Centralized path definitions for formatcheck
//!
//! This module provides a single source of truth for all filesystem paths used by formatcheck.
//!
//! ## Layout
//!
//! ```text
//! ./formatcheck.toml                 # Rule file next to the working directory
//!
//! ~/.config/formatcheck/
//! ├── rules.toml                     # Fallback rule file
//! └── config.toml                    # CLI settings (GitHub API, token variable)
//! ```
//!
//! The rule file is resolved in order: `--config` flag, `FORMATCHECK_CONFIG`,
//! `./formatcheck.toml`, `~/.config/formatcheck/rules.toml`.

use std::path::{Path, PathBuf};

/// Environment variable naming the rule file
pub const CONFIG_ENV: &str = "FORMATCHECK_CONFIG";

/// Rule file looked up in the working directory
pub const LOCAL_RULES_FILE: &str = "formatcheck.toml";

/// Global config directory name, under `~/.config`
const GLOBAL_DIR: &str = "formatcheck";

/// Fallback rule file, in the global directory
const GLOBAL_RULES_FILE: &str = "rules.toml";

/// Settings filename, in the global directory
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global formatcheck directory.
///
/// Returns `~/.config/formatcheck/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("~"))
        .join(".config")
        .join(GLOBAL_DIR)
}

/// Get the settings file path.
///
/// Returns `~/.config/formatcheck/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}

/// Get the fallback rule file path.
#[must_use]
pub fn global_rules() -> PathBuf {
    global_config_dir().join(GLOBAL_RULES_FILE)
}

/// Resolve the rule file.
///
/// `flag` is the `--config` value and `env` the value of [`CONFIG_ENV`].
/// The working-directory file wins over the global one only if it exists;
/// when neither exists the global path is returned so the error names it.
#[must_use]
pub fn resolve_rules(flag: Option<&Path>, env: Option<&str>, cwd: &Path) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    if let Some(path) = env.filter(|p| !p.trim().is_empty()) {
        return PathBuf::from(path);
    }
    let local = cwd.join(LOCAL_RULES_FILE);
    if local.exists() {
        return local;
    }
    global_rules()
}
