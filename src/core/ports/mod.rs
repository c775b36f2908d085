//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundary between the rule engine and the
//! issue tracker it reconciles labels against.
//!
//! Implementations live in the `adapters` module.

mod tracker;

#[cfg(test)]
pub use tracker::MockIssueTracker;
pub use tracker::{IssueTracker, TrackedIssue};
