//! Command implementations

#[cfg(feature = "github")]
mod handle;
mod rules;
mod validate;

use std::env;
use std::path::{Path, PathBuf};

use formatcheck::paths;

#[cfg(feature = "github")]
pub use handle::{HandleArgs, handle};
pub use rules::rules;
pub use validate::validate;

/// Rule file chosen by flag, environment or the default locations
fn rules_path(flag: Option<&Path>) -> anyhow::Result<PathBuf> {
    let env_value = env::var(paths::CONFIG_ENV).ok();
    Ok(paths::resolve_rules(flag, env_value.as_deref(), &env::current_dir()?))
}
