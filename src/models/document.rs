//! Top-level `karabiner.json` document.

use crate::constants::DEFAULT_PROFILE_NAME;
use crate::models::manipulator::ComplexRule;
use serde::{Deserialize, Serialize};

/// Global engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Show the engine icon in the macOS menu bar
    pub show_in_menu_bar: bool,
}

/// Container for the generated rule groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ComplexModifications {
    /// Rule groups in output order
    pub rules: Vec<ComplexRule>,
}

/// One engine profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile name shown in the engine's UI
    pub name: String,
    /// Complex modification rules
    pub complex_modifications: ComplexModifications,
}

/// The complete generated configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KarabinerDocument {
    /// Global settings
    pub global: GlobalSettings,
    /// Profiles (the generator writes exactly one)
    pub profiles: Vec<Profile>,
}

/// Settings for the single generated profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSettings {
    /// Profile name
    pub name: String,
    /// Whether the menu bar icon is shown
    pub show_in_menu_bar: bool,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROFILE_NAME.to_string(),
            show_in_menu_bar: true,
        }
    }
}

impl KarabinerDocument {
    /// Wraps rule groups into a single-profile document.
    pub fn new(rules: Vec<ComplexRule>, settings: &ProfileSettings) -> Self {
        Self {
            global: GlobalSettings {
                show_in_menu_bar: settings.show_in_menu_bar,
            },
            profiles: vec![Profile {
                name: settings.name.clone(),
                complex_modifications: ComplexModifications { rules },
            }],
        }
    }

    /// Rule groups of the first profile.
    #[must_use]
    pub fn rules(&self) -> &[ComplexRule] {
        self.profiles
            .first()
            .map_or(&[][..], |p| p.complex_modifications.rules.as_slice())
    }
}
