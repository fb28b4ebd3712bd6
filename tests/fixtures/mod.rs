//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use hyperlayer::models::{Action, LayerTable, RuleTable, Sublayer};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Small rule file covering every action kind and a direct entry.
pub const BASIC_RULES_TOML: &str = r#"
[hyper]
from = "caps_lock"
alone = "escape"

[layers.o]
g = { app = "Google Chrome" }
e = { key = "spacebar", modifiers = ["right_control", "right_command"], description = "Emoji picker" }

[layers.w]
h = { command = "yabai -m window --focus west", description = "Window: Navigate to Left" }

[layers.s]
u = { key = "volume_increment" }

[layers]
q = { open = ["raycast://confetti", "https://example.com"] }
"#;

/// Same table as [`BASIC_RULES_TOML`] in JSON5.
pub const BASIC_RULES_JSON5: &str = r#"{
  // hyper key on caps lock
  hyper: { from: "caps_lock", alone: "escape" },
  layers: {
    o: {
      g: { app: "Google Chrome" },
      e: { key: "spacebar", modifiers: ["right_control", "right_command"], description: "Emoji picker" },
    },
    w: {
      h: { command: "yabai -m window --focus west", description: "Window: Navigate to Left" },
    },
    s: {
      u: { key: "volume_increment" },
    },
    q: { open: ["raycast://confetti", "https://example.com"] },
  },
}"#;

/// Rule file the validator rejects: the hyper key is also a trigger.
pub const CONFLICTING_RULES_TOML: &str = r#"
[hyper]
from = "caps_lock"

[layers.caps_lock]
g = { app = "Google Chrome" }
"#;

/// Rule file that validates with a warning (empty sublayer).
pub const EMPTY_SUBLAYER_TOML: &str = r"
[layers.x]
";

/// Typed counterpart of [`BASIC_RULES_TOML`].
pub fn basic_table() -> RuleTable {
    let layers = LayerTable::new()
        .sublayer(
            "o",
            Sublayer::new()
                .with("g", Action::app("Google Chrome").unwrap())
                .unwrap()
                .with(
                    "e",
                    Action::key_with_modifiers("spacebar", &["right_control", "right_command"])
                        .unwrap()
                        .with_description("Emoji picker"),
                )
                .unwrap(),
        )
        .unwrap()
        .sublayer(
            "w",
            Sublayer::new()
                .with(
                    "h",
                    Action::command("Window: Navigate to Left", "yabai -m window --focus west")
                        .unwrap(),
                )
                .unwrap(),
        )
        .unwrap()
        .sublayer(
            "s",
            Sublayer::new()
                .with("u", Action::key("volume_increment").unwrap())
                .unwrap(),
        )
        .unwrap()
        .direct(
            "q",
            Action::open_all(["raycast://confetti", "https://example.com"]).unwrap(),
        )
        .unwrap();

    RuleTable::new(layers)
}

/// Writes `content` to `name` inside `dir` and returns the path.
pub fn write_rule_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write rule file");
    path
}

/// Temp directory holding a rule file and an isolated config directory.
pub struct TestWorkspace {
    pub dir: TempDir,
    pub config_dir: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config_dir = dir.path().join("config");
        Self { dir, config_dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a rule file into the workspace.
    pub fn rules(&self, name: &str, content: &str) -> PathBuf {
        write_rule_file(self.path(), name, content)
    }

    /// Command for the built binary with the config directory isolated and
    /// the working directory inside the workspace.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(hyperlayer_bin());
        cmd.env("HYPERLAYER_CONFIG_DIR", &self.config_dir);
        cmd.env_remove("RUST_LOG");
        cmd.current_dir(self.path());
        cmd.args(args);
        cmd
    }
}

/// Path to the hyperlayer binary
pub fn hyperlayer_bin() -> &'static str {
    env!("CARGO_BIN_EXE_hyperlayer")
}

/// Parses stdout of a finished command as JSON.
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("Invalid JSON output ({e}): {stdout}"))
}
