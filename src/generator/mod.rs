//! Configuration generation.
//!
//! This module compiles rule tables into engine manipulators, assembles the
//! `karabiner.json` document and writes it to disk.

pub mod actions;
pub mod document;
pub mod hyper;
pub mod sublayer;
pub mod validator;

// Re-export generator entry points
pub use document::{build_document, render_document, write_document};
pub use sublayer::{compile_layers, idle_conditions, sublayer_variable};
pub use validator::{TableValidator, ValidationReport};
