//! CLI command handlers for Hyperlayer.
//!
//! This module provides headless, scriptable access to generation,
//! validation and configuration.

pub mod common;
pub mod config;
pub mod generate;
pub mod list;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use generate::GenerateArgs;
pub use list::ListArgs;
pub use validate::ValidateArgs;
