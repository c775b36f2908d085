//! TOML rule files
//!
//! - [`parser`] - Read, deserialize and compile `formatcheck.toml` files

pub mod parser;

pub use parser::{RuleFile, load_file, load_rulebook, parse_str};
