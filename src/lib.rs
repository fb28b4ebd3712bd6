//! Hyperlayer Library
//!
//! This library turns a declarative table of hyper-key sublayers into a
//! Karabiner-Elements configuration document. It provides the rule file
//! parser, the built-in rule table, the manipulator generator and the
//! headless CLI commands.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod generator;
pub mod models;
pub mod parser;
pub mod rules;
