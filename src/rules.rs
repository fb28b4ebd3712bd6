//! Built-in rule table.
//!
//! Used when no rule file is given. Sublayers:
//!
//! - `o` open applications
//! - `w` window management via yabai
//! - `s` system (volume, brightness, lock)
//! - `v` movement (vim-style arrows on the left hand)
//! - `c` music
//! - `r` Raycast

use crate::generator::sublayer::idle_conditions;
use crate::models::{
    hyper_modifiers, Action, FromEvent, KeyCode, LayerTable, Manipulator, RuleTable, Sublayer,
    ToEvent,
};
use anyhow::Result;

const YABAI: &str = "/opt/homebrew/bin/yabai";

/// Builds the built-in rule table.
pub fn default_table() -> Result<RuleTable> {
    let layers = default_layers()?;
    let base = base_rules(&layers)?;

    Ok(RuleTable {
        base,
        ..RuleTable::new(layers)
    })
}

fn default_layers() -> Result<LayerTable> {
    LayerTable::new()
        .sublayer("o", open_layer()?)?
        .sublayer("w", window_layer()?)?
        .sublayer("s", system_layer()?)?
        .sublayer("v", move_layer()?)?
        .sublayer("c", music_layer()?)?
        .sublayer("r", raycast_layer()?)
}

fn open_layer() -> Result<Sublayer> {
    Sublayer::new()
        .with("g", Action::app("Google Chrome")?)?
        .with("v", Action::app("Visual Studio Code")?)?
        .with("n", Action::app("Notion")?)?
        .with("t", Action::app("Alacritty")?)?
        .with("s", Action::app("Spotify")?)?
        .with("f", Action::app("Figma")?)?
        .with("a", Action::app("Arc")?)?
        // Emoji picker
        .with(
            "e",
            Action::key_with_modifiers("spacebar", &["right_control", "right_command"])?,
        )?
        .with("m", Action::app("Google Meet")?)
}

fn yabai(description: &str, args: &[&str]) -> Result<Action> {
    let command = args
        .iter()
        .map(|a| format!("{YABAI} -m {a}"))
        .collect::<Vec<_>>()
        .join("; ");
    Action::command(description, command)
}

fn window_layer() -> Result<Sublayer> {
    Sublayer::new()
        .with("y", yabai("Window: Navigate to Left", &["window --focus west"])?)?
        .with("u", yabai("Window: Navigate to Down", &["window --focus south"])?)?
        .with("i", yabai("Window: Navigate to Up", &["window --focus north"])?)?
        .with("o", yabai("Window: Navigate to Right", &["window --focus east"])?)?
        .with("h", yabai("Window: Move Left", &["window --warp west"])?)?
        .with("j", yabai("Window: Move Down", &["window --warp south"])?)?
        .with("k", yabai("Window: Move Up", &["window --warp north"])?)?
        .with("l", yabai("Window: Move Right", &["window --warp east"])?)?
        .with(
            "n",
            yabai(
                "Window: Resize Left",
                &["window --resize left:-50:0", "window --resize right:-50:0"],
            )?,
        )?
        .with(
            "m",
            yabai(
                "Window: Resize Down",
                &["window --resize bottom:0:50", "window --resize top:0:50"],
            )?,
        )?
        .with(
            "comma",
            yabai(
                "Window: Resize Up",
                &["window --resize top:0:-50", "window --resize bottom:0:-50"],
            )?,
        )?
        .with(
            "period",
            yabai(
                "Window: Resize Right",
                &["window --resize right:50:0", "window --resize left:50:0"],
            )?,
        )?
        .with(
            "spacebar",
            yabai(
                "Window: Toggle Float/Unfloat",
                &["window --toggle float", "window --toggle border"],
            )?,
        )?
        .with(
            "return_or_enter",
            yabai("Window: Full Screen", &["window --toggle zoom-fullscreen"])?,
        )?
        .with("e", yabai("Window: Equal size", &["space --balance"])?)?
        .with("r", yabai("Window: Rotate", &["space --rotate 90"])?)
}

fn system_layer() -> Result<Sublayer> {
    Sublayer::new()
        .with("u", Action::key("volume_increment")?)?
        .with("j", Action::key("volume_decrement")?)?
        .with("i", Action::key("display_brightness_increment")?)?
        .with("k", Action::key("display_brightness_decrement")?)?
        // Lock screen
        .with(
            "l",
            Action::key_with_modifiers("q", &["right_control", "right_command"])?,
        )
}

fn move_layer() -> Result<Sublayer> {
    Sublayer::new()
        .with("h", Action::key("left_arrow")?)?
        .with("j", Action::key("down_arrow")?)?
        .with("k", Action::key("up_arrow")?)?
        .with("l", Action::key("right_arrow")?)?
        .with("u", Action::key("page_down")?)?
        .with("i", Action::key("page_up")?)
}

fn music_layer() -> Result<Sublayer> {
    Sublayer::new()
        .with("p", Action::key("play_or_pause")?)?
        .with("n", Action::key("fastforward")?)?
        .with("b", Action::key("rewind")?)
}

fn raycast_layer() -> Result<Sublayer> {
    Sublayer::new()
        .with("e", Action::open("raycast://extensions/FezVrasta/emoji/emoji")?)?
        .with(
            "h",
            Action::open("raycast://extensions/raycast/clipboard-history/clipboard-history")?,
        )?
        .with("p", Action::open("raycast://confetti")?)?
        .with("v", Action::open("raycast://extensions/jomifepe/bitwarden/search")?)
}

/// Hyper-chord paging and shift-tap word navigation.
///
/// Everything that shares a key with a sublayer binding is guarded so it
/// stays quiet while a sublayer is held.
fn base_rules(layers: &LayerTable) -> Result<Vec<Manipulator>> {
    let key = |code: &str| KeyCode::new(code);
    let idle = idle_conditions(layers);

    let word_jump =
        |shift: &str, arrow: &str, option: &str, description: &str| -> Result<Manipulator> {
            Ok(Manipulator::new(FromEvent::key(key(shift)?))
                .with_description(description)
                .with_to(vec![ToEvent::key(key(shift)?)])
                .with_to_if_alone(vec![ToEvent::Key {
                    key_code: key(arrow)?,
                    modifiers: vec![key(option)?],
                }])
                .with_conditions(idle.clone()))
        };

    Ok(vec![
        Manipulator::new(FromEvent::with_mandatory(key("d")?, hyper_modifiers()))
            .with_description("Page down")
            .with_to(vec![ToEvent::key(key("page_down")?)]),
        Manipulator::new(FromEvent::with_mandatory(key("u")?, hyper_modifiers()))
            .with_description("Page up")
            .with_to(vec![ToEvent::key(key("page_up")?)])
            .with_conditions(idle.clone()),
        word_jump(
            "left_shift",
            "left_arrow",
            "left_option",
            "Shift left move to prev word",
        )?,
        word_jump(
            "right_shift",
            "right_arrow",
            "right_option",
            "Shift right move to next word",
        )?,
    ])
}
