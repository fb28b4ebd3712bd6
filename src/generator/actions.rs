//! Action normalization.
//!
//! Turns [`Action`] values into the `to` events the engine executes and
//! derives the label used for the owning manipulator. Everything here is a
//! pure string transform; no command is ever run.

use crate::constants::OPEN_COMMAND;
use crate::models::{Action, ActionKind, KeyCode, ToEvent};

/// Quotes a string for `/bin/sh` using single quotes.
///
/// Embedded single quotes are closed, escaped and reopened (`'\''`).
#[must_use]
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Builds the command that launches (or focuses) an application.
///
/// # Examples
///
/// ```
/// use hyperlayer::generator::actions::app_command;
///
/// assert_eq!(app_command("Google Chrome"), "open -a 'Google Chrome.app'");
/// ```
#[must_use]
pub fn app_command(name: &str) -> String {
    format!("{OPEN_COMMAND} -a {}", shell_quote(&format!("{name}.app")))
}

/// Builds the command that opens a URI or path.
#[must_use]
pub fn open_command(target: &str) -> String {
    format!("{OPEN_COMMAND} {target}")
}

/// Converts an action into engine events.
#[must_use]
pub fn to_events(action: &Action) -> Vec<ToEvent> {
    match &action.kind {
        ActionKind::Key {
            key_code,
            modifiers,
        } => vec![ToEvent::Key {
            key_code: key_code.clone(),
            modifiers: modifiers.clone(),
        }],
        ActionKind::App { name } => vec![ToEvent::shell(app_command(name))],
        ActionKind::Command { command } => vec![ToEvent::shell(command.clone())],
        ActionKind::Open { targets } => targets
            .iter()
            .map(|target| ToEvent::shell(open_command(target)))
            .collect(),
    }
}

/// Returns the human-readable label for an action.
///
/// An explicit description is used verbatim; otherwise the label is derived
/// from what the action does.
#[must_use]
pub fn describe(action: &Action) -> String {
    if let Some(description) = &action.description {
        return description.clone();
    }

    match &action.kind {
        ActionKind::Key {
            key_code,
            modifiers,
        } => format!("Send {}", key_combo(key_code, modifiers)),
        ActionKind::App { name } => format!("Open -a {}", shell_quote(&format!("{name}.app"))),
        ActionKind::Command { command } => format!("Run {command}"),
        ActionKind::Open { targets } => format!("Open {}", targets.join(" & ")),
    }
}

fn key_combo(key_code: &KeyCode, modifiers: &[KeyCode]) -> String {
    modifiers
        .iter()
        .chain(std::iter::once(key_code))
        .map(KeyCode::as_str)
        .collect::<Vec<_>>()
        .join("+")
}
