//! Key identifiers understood by the remapping engine.

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Karabiner key codes are lowercase words joined by underscores
/// (e.g. "`caps_lock`", "`return_or_enter`", "f13").
static KEY_CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(_[a-z0-9]+)*$").expect("valid key code regex"));

/// A validated key identifier.
///
/// Used for trigger keys, sublayer leaf keys, emitted keys and modifiers.
///
/// # Validation
///
/// - Must be non-empty
/// - Lowercase ASCII letters, digits and single underscores only
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct KeyCode(String);

impl KeyCode {
    /// Creates a key code, rejecting identifiers the engine would not accept.
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperlayer::models::KeyCode;
    ///
    /// assert!(KeyCode::new("return_or_enter").is_ok());
    /// assert!(KeyCode::new("Return").is_err());
    /// ```
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        if !Self::is_valid(&code) {
            anyhow::bail!(
                "Invalid key code '{}': expected lowercase words joined by underscores",
                code
            );
        }
        Ok(Self(code))
    }

    /// Checks whether a string is a well-formed key code.
    #[must_use]
    pub fn is_valid(code: &str) -> bool {
        KEY_CODE_PATTERN.is_match(code)
    }

    /// The `"any"` wildcard accepted in `modifiers.optional`.
    pub(crate) fn any() -> Self {
        Self("any".to_string())
    }

    /// Returns the key code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KeyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for KeyCode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for KeyCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Parses a list of modifier names into key codes.
pub fn key_codes<I, S>(codes: I) -> Result<Vec<KeyCode>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    codes.into_iter().map(KeyCode::new).collect()
}
