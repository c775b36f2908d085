//! Validate the rule file

use std::path::Path;

use formatcheck::adapters::toml::load_rulebook;
use formatcheck::output::{OutputMode, ValidateResult};

/// Compile the rule file and report what it configures
///
/// Exits with status 1 when the file does not compile.
pub fn validate(config: Option<&Path>, mode: OutputMode) -> anyhow::Result<()> {
    let path = super::rules_path(config)?;
    let shown = path.display().to_string();

    match load_rulebook(&path) {
        Ok(book) => {
            ValidateResult::valid(shown, &book).render(mode);
            Ok(())
        },
        Err(err) => {
            ValidateResult::invalid(shown, format!("{err:#}")).render(mode);
            std::process::exit(1);
        },
    }
}
