//! Core domain logic for formatcheck
//!
//! This module contains the rule engine with no I/O dependencies.
//! All tracker interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Rule, RuleBook, CheckableItem, Event, LabelPlan)
//! - `services/` - Evaluation and reconciliation
//! - `ports/` - Trait definitions for external dependencies
//! - `error` - Per-event errors

pub mod error;
pub mod models;
pub mod ports;
pub mod services;
