//! Business logic services
//!
//! Pure orchestration logic that operates on domain models. Only the
//! validator and dispatcher talk to the outside world, and only through the
//! [`IssueTracker`](crate::core::ports::IssueTracker) port.
//!
//! - [`applicability`] - Whether a rule applies, and whether it is bypassed
//! - [`extractor`] - Which texts a rule checks
//! - [`matcher`] - Match a pattern against one text
//! - [`validator`] - Resolve captured issue numbers
//! - [`evaluator`] - One rule against one item
//! - [`reconciler`] - Evaluations to label changes
//! - [`dispatcher`] - Event entry points
//! - [`help`] - Rule descriptions

pub mod applicability;
pub mod dispatcher;
pub mod evaluator;
pub mod extractor;
pub mod help;
pub mod matcher;
pub mod reconciler;
pub mod validator;

pub use applicability::{bypass, is_applicable};
pub use dispatcher::Dispatcher;
pub use evaluator::evaluate;
pub use extractor::{Corpus, CorpusSource, corpora};
pub use help::{describe_rule, repo_help};
pub use matcher::{MatchOutcome, match_corpus};
pub use reconciler::{COMMENT_MARKER, comment_body, reconcile};
pub use validator::CrossReferenceValidator;
