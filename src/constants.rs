//! Application-wide constants.
//!
//! This module defines the application name plus the fixed strings of the
//! Karabiner-Elements schema that the generator relies on.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Hyperlayer";

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "HYPERLAYER_CONFIG_DIR";

/// File name written when no output path is configured.
pub const DEFAULT_OUTPUT_FILE: &str = "karabiner.json";

/// Profile name used when the config does not set one.
pub const DEFAULT_PROFILE_NAME: &str = "Default";

/// Prefix of every layer-active variable (`hyper_sublayer_<trigger>`).
pub const SUBLAYER_VARIABLE_PREFIX: &str = "hyper_sublayer_";

/// Modifiers emitted together by the hyper key.
///
/// Order matches the `mandatory` list the engine sees on hyper-chord rules.
pub const HYPER_MODIFIERS: [&str; 4] = [
    "left_command",
    "left_control",
    "left_shift",
    "left_option",
];

/// Key used as the hyper key when nothing else is configured.
pub const DEFAULT_HYPER_FROM: &str = "caps_lock";

/// Key emitted when the hyper key is tapped alone.
pub const DEFAULT_HYPER_ALONE: &str = "escape";

/// Command used to open URIs, paths and applications on macOS.
pub const OPEN_COMMAND: &str = "open";
