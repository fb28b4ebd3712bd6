//! Karabiner-Elements rule objects.
//!
//! These types mirror the engine's `complex_modifications` schema field for
//! field. Optional parts are skipped when empty so the rendered JSON only
//! contains what the engine needs.

use crate::models::key::KeyCode;
use serde::{Deserialize, Serialize};

/// Manipulator type. The generator only emits `basic` manipulators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ManipulatorType {
    /// Plain from/to remapping
    #[default]
    Basic,
}

/// Modifier requirements on the `from` side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FromModifiers {
    /// Modifiers that must be held for the rule to match
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mandatory: Vec<KeyCode>,
    /// Modifiers that may be held (`"any"` allows everything)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<KeyCode>,
}

/// The key event a manipulator matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromEvent {
    /// Key that triggers the rule
    pub key_code: KeyCode,
    /// Modifier requirements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<FromModifiers>,
}

impl FromEvent {
    /// Matches a bare key with no modifier requirements.
    pub fn key(key_code: KeyCode) -> Self {
        Self {
            key_code,
            modifiers: None,
        }
    }

    /// Matches a key only while all `mandatory` modifiers are held.
    pub fn with_mandatory(key_code: KeyCode, mandatory: Vec<KeyCode>) -> Self {
        Self {
            key_code,
            modifiers: Some(FromModifiers {
                mandatory,
                optional: Vec::new(),
            }),
        }
    }

    /// Matches a key regardless of which modifiers are held.
    pub fn with_any_modifiers(key_code: KeyCode) -> Self {
        Self {
            key_code,
            modifiers: Some(FromModifiers {
                mandatory: Vec::new(),
                optional: vec![KeyCode::any()],
            }),
        }
    }

    /// Returns the mandatory modifiers (empty when none are required).
    #[must_use]
    pub fn mandatory_modifiers(&self) -> &[KeyCode] {
        self.modifiers
            .as_ref()
            .map_or(&[][..], |m| m.mandatory.as_slice())
    }
}

/// Variable assignment performed by a `to` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetVariable {
    /// Variable name
    pub name: String,
    /// New value
    pub value: i64,
}

/// One output event of a manipulator.
///
/// The engine distinguishes events by which field is present, so this
/// serializes untagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToEvent {
    /// Emit a key
    Key {
        /// Key to emit
        key_code: KeyCode,
        /// Modifiers held while emitting
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        modifiers: Vec<KeyCode>,
    },
    /// Run a shell command
    Shell {
        /// Command line passed to `/bin/sh`
        shell_command: String,
    },
    /// Set an engine variable
    Variable {
        /// Assignment to perform
        set_variable: SetVariable,
    },
}

impl ToEvent {
    /// Emits a key without modifiers.
    pub fn key(key_code: KeyCode) -> Self {
        Self::Key {
            key_code,
            modifiers: Vec::new(),
        }
    }

    /// Runs a shell command.
    pub fn shell(command: impl Into<String>) -> Self {
        Self::Shell {
            shell_command: command.into(),
        }
    }

    /// Sets `name` to `value`.
    pub fn set_variable(name: impl Into<String>, value: i64) -> Self {
        Self::Variable {
            set_variable: SetVariable {
                name: name.into(),
                value,
            },
        }
    }
}

/// Condition kinds used by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    /// Matches when a variable equals the given value
    VariableIf,
}

/// Guard condition on a manipulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Condition kind
    #[serde(rename = "type")]
    pub kind: ConditionType,
    /// Variable name
    pub name: String,
    /// Required value
    pub value: i64,
}

impl Condition {
    /// Requires variable `name` to equal `value`.
    pub fn variable_if(name: impl Into<String>, value: i64) -> Self {
        Self {
            kind: ConditionType::VariableIf,
            name: name.into(),
            value,
        }
    }
}

/// Primitive rule: a single from/to mapping with optional guards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manipulator {
    /// Human-readable label (shown in the engine's UI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Manipulator type (always `basic`)
    #[serde(rename = "type", default)]
    pub kind: ManipulatorType,
    /// Matched key event
    pub from: FromEvent,
    /// Events fired on key down
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<ToEvent>,
    /// Events fired when the key is tapped without another key
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_if_alone: Vec<ToEvent>,
    /// Events fired on key up
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_after_key_up: Vec<ToEvent>,
    /// Guards that must all hold for the rule to fire
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
}

impl Manipulator {
    /// Creates a basic manipulator with no outputs yet.
    pub fn new(from: FromEvent) -> Self {
        Self {
            description: None,
            kind: ManipulatorType::Basic,
            from,
            to: Vec::new(),
            to_if_alone: Vec::new(),
            to_after_key_up: Vec::new(),
            conditions: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the key-down events.
    pub fn with_to(mut self, to: Vec<ToEvent>) -> Self {
        self.to = to;
        self
    }

    /// Sets the tap-alone events.
    pub fn with_to_if_alone(mut self, to_if_alone: Vec<ToEvent>) -> Self {
        self.to_if_alone = to_if_alone;
        self
    }

    /// Sets the key-up events.
    pub fn with_to_after_key_up(mut self, to_after_key_up: Vec<ToEvent>) -> Self {
        self.to_after_key_up = to_after_key_up;
        self
    }

    /// Sets the guard conditions.
    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    /// Checks whether this manipulator requires the variable `name` to be `value`.
    #[must_use]
    pub fn requires(&self, name: &str, value: i64) -> bool {
        self.conditions
            .iter()
            .any(|c| c.name == name && c.value == value)
    }
}

/// A described group of manipulators (one entry in `complex_modifications.rules`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexRule {
    /// Group label
    pub description: String,
    /// Manipulators in evaluation order
    pub manipulators: Vec<Manipulator>,
}

impl ComplexRule {
    /// Creates a rule group.
    pub fn new(description: impl Into<String>, manipulators: Vec<Manipulator>) -> Self {
        Self {
            description: description.into(),
            manipulators,
        }
    }
}
