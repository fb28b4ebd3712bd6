//! Parsing of user-supplied rule files.
//!
//! This module reads rule tables from TOML or JSON5 files into the same
//! typed tables the built-in rules use.

pub mod rule_file;

// Re-export commonly used functions
pub use rule_file::{load_rule_file, parse_rule_str, RuleFormat};
