//! Rule table validation before generation.
//!
//! The typed table already rejects malformed keys and duplicates. This
//! module catches combinations that compile fine but misbehave at runtime,
//! like a base rule that fires together with a sublayer binding.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use crate::generator::sublayer::sublayer_variable;
use crate::models::{KeyCode, Manipulator, RuleTable};
use std::collections::BTreeSet;

/// Validation result with specific errors and warnings.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Critical errors that prevent generation
    pub errors: Vec<ValidationError>,
    /// Non-critical warnings
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates a new empty validation report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Formats the report as a user-friendly error message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("❌ {} validation errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("\n⚠️  {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Type of validation error
    pub kind: ValidationErrorKind,
    /// Trigger key involved, if any
    pub trigger: Option<KeyCode>,
    /// Human-readable error message
    pub message: String,
    /// Optional suggestion for fixing the error
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            trigger: None,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Sets the trigger key context.
    #[must_use]
    pub fn with_trigger(mut self, trigger: &KeyCode) -> Self {
        self.trigger = Some(trigger.clone());
        self
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(trigger) = &self.trigger {
            write!(f, "[Hyper+{}] {}: {}", trigger, self.kind, self.message)?;
        } else {
            write!(f, "{}: {}", self.kind, self.message)?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    → {suggestion}")?;
        }

        Ok(())
    }
}

/// Types of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The hyper key itself is used as a trigger key
    HyperKeyConflict,
    /// A trigger key is one of the hyper chord's own modifiers
    ModifierTrigger,
    /// A base rule on the hyper chord shadows a trigger key
    TriggerShadowed,
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HyperKeyConflict => write!(f, "Hyper Key Conflict"),
            Self::ModifierTrigger => write!(f, "Modifier Trigger"),
            Self::TriggerShadowed => write!(f, "Trigger Shadowed"),
        }
    }
}

/// Validation warning (non-blocking).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Warning message
    pub message: String,
}

impl ValidationWarning {
    /// Creates a new validation warning
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Rule table validator.
pub struct TableValidator<'a> {
    table: &'a RuleTable,
}

impl<'a> TableValidator<'a> {
    /// Creates a new table validator.
    #[must_use]
    pub const fn new(table: &'a RuleTable) -> Self {
        Self { table }
    }

    /// Validates the table for generation.
    ///
    /// Checks:
    /// - The hyper key and its modifiers are not used as trigger keys
    /// - Base rules on the hyper chord don't shadow trigger keys
    /// - Base rules sharing a key with a sublayer binding are guarded
    /// - Sublayers are not empty
    /// - No binding uses the hyper key itself
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        self.validate_triggers(&mut report);
        for manipulator in &self.table.base {
            self.validate_base_rule(&mut report, manipulator);
        }
        self.validate_sublayers(&mut report);

        report
    }

    fn validate_triggers(&self, report: &mut ValidationReport) {
        let hyper = &self.table.hyper;

        for (trigger, _) in self.table.layers.iter() {
            if *trigger == hyper.from {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::HyperKeyConflict,
                        format!("'{trigger}' is the hyper key and cannot also be a trigger"),
                    )
                    .with_trigger(trigger)
                    .with_suggestion("Pick a different trigger key or move the hyper key"),
                );
            }

            if hyper.modifiers.contains(trigger) {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::ModifierTrigger,
                        format!(
                            "'{trigger}' is part of the hyper chord and can never be pressed \
                             on top of it"
                        ),
                    )
                    .with_trigger(trigger),
                );
            }
        }
    }

    fn validate_base_rule(&self, report: &mut ValidationReport, manipulator: &Manipulator) {
        let hyper = &self.table.hyper;
        let key = &manipulator.from.key_code;
        let on_hyper_chord =
            same_modifiers(manipulator.from.mandatory_modifiers(), &hyper.modifiers);

        if on_hyper_chord && self.table.layers.get(key.as_str()).is_some() {
            report.add_error(
                ValidationError::new(
                    ValidationErrorKind::TriggerShadowed,
                    format!("A base rule also maps hyper+{key}"),
                )
                .with_trigger(key)
                .with_suggestion("Remove the base rule or the trigger entry"),
            );
        }

        for (trigger, sublayer) in self.table.layers.sublayers() {
            if sublayer.get(key.as_str()).is_none() {
                continue;
            }
            let variable = sublayer_variable(trigger);
            if !manipulator.requires(&variable, 0) {
                report.add_warning(ValidationWarning::new(format!(
                    "Base rule on '{key}' also fires while sublayer '{trigger}' is held; \
                     guard it with {variable} == 0"
                )));
            }
        }
    }

    fn validate_sublayers(&self, report: &mut ValidationReport) {
        let hyper_key = &self.table.hyper.from;

        for (trigger, sublayer) in self.table.layers.sublayers() {
            if sublayer.is_empty() {
                report.add_warning(ValidationWarning::new(format!(
                    "Sublayer '{trigger}' has no bindings"
                )));
            }

            if sublayer.get(hyper_key.as_str()).is_some() {
                report.add_warning(ValidationWarning::new(format!(
                    "Sublayer '{trigger}' binds the hyper key '{hyper_key}', which is never \
                     delivered while the hyper key is held"
                )));
            }
        }
    }
}

/// Modifier lists are unordered in the engine, so compare them as sets.
fn same_modifiers(a: &[KeyCode], b: &[KeyCode]) -> bool {
    a.iter().collect::<BTreeSet<_>>() == b.iter().collect::<BTreeSet<_>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::sublayer::idle_conditions;
    use crate::models::{hyper_modifiers, Action, FromEvent, LayerTable, Sublayer, ToEvent};

    fn key(code: &str) -> KeyCode {
        KeyCode::new(code).unwrap()
    }

    fn window_table() -> LayerTable {
        LayerTable::new()
            .sublayer(
                "w",
                Sublayer::new()
                    .with(
                        "u",
                        Action::command("Window: Navigate to Down", "yabai -m window --focus south")
                            .unwrap(),
                    )
                    .unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn test_clean_table_is_valid() {
        let report = TableValidator::new(&RuleTable::new(window_table())).validate();
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_hyper_key_as_trigger_is_error() {
        let table = LayerTable::new()
            .sublayer(
                "caps_lock",
                Sublayer::new().with("a", Action::key("b").unwrap()).unwrap(),
            )
            .unwrap();
        let report = TableValidator::new(&RuleTable::new(table)).validate();
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].kind, ValidationErrorKind::HyperKeyConflict);
        assert!(report.format_message().contains("Hyper Key Conflict"));
    }

    #[test]
    fn test_modifier_trigger_is_error() {
        let table = LayerTable::new()
            .direct("left_shift", Action::key("a").unwrap())
            .unwrap();
        let report = TableValidator::new(&RuleTable::new(table)).validate();
        assert_eq!(report.errors[0].kind, ValidationErrorKind::ModifierTrigger);
    }

    #[test]
    fn test_base_rule_shadowing_trigger_is_error() {
        let mut table = RuleTable::new(window_table());
        table.base.push(
            Manipulator::new(FromEvent::with_mandatory(key("w"), hyper_modifiers()))
                .with_to(vec![ToEvent::key(key("page_up"))]),
        );
        let report = TableValidator::new(&table).validate();
        assert_eq!(report.errors[0].kind, ValidationErrorKind::TriggerShadowed);
        assert_eq!(report.errors[0].trigger, Some(key("w")));
    }

    #[test]
    fn test_base_rule_shadowing_detects_reordered_chord() {
        let mut reordered = hyper_modifiers();
        reordered.reverse();

        let mut table = RuleTable::new(window_table());
        table.base.push(
            Manipulator::new(FromEvent::with_mandatory(key("w"), reordered))
                .with_to(vec![ToEvent::key(key("page_up"))]),
        );
        let report = TableValidator::new(&table).validate();
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].kind, ValidationErrorKind::TriggerShadowed);

        // A subset of the chord is a different shortcut
        let mut table = RuleTable::new(window_table());
        table.base.push(
            Manipulator::new(FromEvent::with_mandatory(key("w"), vec![key("left_command")]))
                .with_to(vec![ToEvent::key(key("page_up"))]),
        );
        assert!(TableValidator::new(&table).validate().is_valid());
    }

    #[test]
    fn test_unguarded_base_rule_warns_and_guard_fixes_it() {
        let base = Manipulator::new(FromEvent::with_mandatory(key("u"), hyper_modifiers()))
            .with_description("Page up")
            .with_to(vec![ToEvent::key(key("page_up"))]);

        let mut table = RuleTable::new(window_table());
        table.base.push(base.clone());
        let report = TableValidator::new(&table).validate();
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("hyper_sublayer_w == 0"));

        table.base = vec![base.with_conditions(idle_conditions(&table.layers))];
        let report = TableValidator::new(&table).validate();
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_empty_sublayer_and_hyper_binding_warn() {
        let table = LayerTable::new()
            .sublayer("x", Sublayer::new())
            .unwrap()
            .sublayer(
                "y",
                Sublayer::new()
                    .with("caps_lock", Action::key("a").unwrap())
                    .unwrap(),
            )
            .unwrap();
        let report = TableValidator::new(&RuleTable::new(table)).validate();
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 2);
        assert!(report.warnings[0].message.contains("'x' has no bindings"));
    }
}
