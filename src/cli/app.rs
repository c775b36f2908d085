//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands;
use formatcheck::output::OutputMode;

/// formatcheck - Format rules for pull requests and issues
#[derive(Parser, Debug)]
#[command(
    name = "formatcheck",
    version,
    about = "Format rules for pull requests and issues",
    long_about = "Check pull request and issue titles, bodies and commit messages against\n\
                  per-repository rules, and keep a label on every item that breaks one."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Rule file (defaults to $FORMATCHECK_CONFIG, ./formatcheck.toml, then
    /// ~/.config/formatcheck/rules.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Describe the rules configured for repositories
    Rules {
        /// Repositories (`org/repo`)
        #[arg(required = true)]
        repos: Vec<String>,
    },

    /// Check that the rule file compiles
    Validate,

    /// Check one webhook payload and update its labels on GitHub
    #[cfg(feature = "github")]
    Handle(commands::HandleArgs),

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };
    let config = cli.config.as_deref();

    match cli.command {
        Some(Command::Rules { repos }) => commands::rules(config, &repos, output_mode),
        Some(Command::Validate) => commands::validate(config, output_mode),
        #[cfg(feature = "github")]
        Some(Command::Handle(args)) => commands::handle(config, &args, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("formatcheck v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("formatcheck v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'formatcheck --help' for usage");
                println!("Run 'formatcheck validate' to check your rule file");
            }
            Ok(())
        },
    }
}
