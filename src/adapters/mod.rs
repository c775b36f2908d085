//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `toml/` - `formatcheck.toml` rule file parsing
//! - `github/` - Webhook payloads and the REST API tracker
//! - `dry_run` - Tracker wrapper that records writes instead of performing them

pub mod dry_run;
pub mod github;
pub mod toml;

pub use dry_run::{DryRunTracker, RecordedWrite};
