//! Data models for sublayer tables and the generated engine configuration.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are plain values and independent of generation and I/O.

pub mod action;
pub mod document;
pub mod key;
pub mod manipulator;
pub mod sublayer;

// Re-export all model types
pub use action::{Action, ActionKind};
pub use document::{
    ComplexModifications, GlobalSettings, KarabinerDocument, Profile, ProfileSettings,
};
pub use key::KeyCode;
pub use manipulator::{
    ComplexRule, Condition, ConditionType, FromEvent, FromModifiers, Manipulator,
    ManipulatorType, SetVariable, ToEvent,
};
pub use sublayer::{hyper_modifiers, HyperKey, LayerEntry, LayerTable, RuleTable, Sublayer};
