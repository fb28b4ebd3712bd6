//! Actions a sublayer key can trigger.

use crate::models::key::{key_codes, KeyCode};
use anyhow::Result;

/// What an action does when its key fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Emit a key, optionally with modifiers held.
    Key {
        /// Key to emit
        key_code: KeyCode,
        /// Modifiers held while emitting (may be empty)
        modifiers: Vec<KeyCode>,
    },
    /// Launch (or focus) an application by name.
    App {
        /// Application name without the `.app` suffix (e.g. "Google Chrome")
        name: String,
    },
    /// Run a shell command verbatim.
    Command {
        /// Command line, passed through unmodified
        command: String,
    },
    /// Open one or more URIs or paths.
    Open {
        /// Targets handed to `open`, one shell action each
        targets: Vec<String>,
    },
}

/// A sublayer action with an optional human-readable description.
///
/// Constructors validate their inputs, so an `Action` that exists can always
/// be turned into engine events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The behavior of this action
    pub kind: ActionKind,
    /// Label used verbatim for the owning rule (derived when absent)
    pub description: Option<String>,
}

impl Action {
    fn from_kind(kind: ActionKind) -> Self {
        Self {
            kind,
            description: None,
        }
    }

    /// Emits a single key.
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperlayer::models::Action;
    ///
    /// let action = Action::key("volume_increment").unwrap();
    /// assert!(action.description.is_none());
    /// ```
    pub fn key(key_code: &str) -> Result<Self> {
        Ok(Self::from_kind(ActionKind::Key {
            key_code: KeyCode::new(key_code)?,
            modifiers: Vec::new(),
        }))
    }

    /// Emits a key with modifiers held.
    pub fn key_with_modifiers(key_code: &str, modifiers: &[&str]) -> Result<Self> {
        Ok(Self::from_kind(ActionKind::Key {
            key_code: KeyCode::new(key_code)?,
            modifiers: key_codes(modifiers.iter().copied())?,
        }))
    }

    /// Launches an application by name.
    pub fn app(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            anyhow::bail!("Application name cannot be empty");
        }
        Ok(Self::from_kind(ActionKind::App { name }))
    }

    /// Runs a shell command with a description.
    ///
    /// The command is not escaped; the caller owns its correctness.
    pub fn command(description: impl Into<String>, command: impl Into<String>) -> Result<Self> {
        let command = command.into();
        if command.trim().is_empty() {
            anyhow::bail!("Shell command cannot be empty");
        }
        Ok(Self::from_kind(ActionKind::Command { command }).with_description(description))
    }

    /// Runs a shell command without a description.
    pub fn shell(command: impl Into<String>) -> Result<Self> {
        let command = command.into();
        if command.trim().is_empty() {
            anyhow::bail!("Shell command cannot be empty");
        }
        Ok(Self::from_kind(ActionKind::Command { command }))
    }

    /// Opens a single URI or path.
    pub fn open(target: impl Into<String>) -> Result<Self> {
        Self::open_all([target.into()])
    }

    /// Opens several URIs or paths at once.
    pub fn open_all<I, S>(targets: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets: Vec<String> = targets.into_iter().map(Into::into).collect();
        if targets.is_empty() {
            anyhow::bail!("Open action needs at least one target");
        }
        if let Some(blank) = targets.iter().find(|t| t.trim().is_empty()) {
            anyhow::bail!("Open target cannot be empty (got {:?})", blank);
        }
        Ok(Self::from_kind(ActionKind::Open { targets }))
    }

    /// Sets the description for this action.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
