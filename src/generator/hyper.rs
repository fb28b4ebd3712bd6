//! The hyper key itself.

use crate::models::{ComplexRule, FromEvent, HyperKey, KeyCode, Manipulator, ToEvent};

/// Group label of the hyper key rule.
pub const HYPER_GROUP_DESCRIPTION: &str = "Hyper Key (⌃⌥⇧⌘)";

/// Builds the manipulator that turns the hyper key into the modifier chord.
///
/// The chord is emitted as its last modifier with the rest attached, which is
/// how the engine expects a multi-modifier key press.
#[must_use]
pub fn hyper_manipulator(hyper: &HyperKey) -> Manipulator {
    let mut held: Vec<KeyCode> = hyper.modifiers.clone();
    let emitted = match held.iter().position(|m| m.as_str() == "left_shift") {
        Some(idx) => held.remove(idx),
        None => held.pop().unwrap_or_else(|| hyper.from.clone()),
    };

    let mut manipulator = Manipulator::new(FromEvent::key(hyper.from.clone()))
        .with_description(format!("{} -> Hyper Key", title_case(hyper.from.as_str())))
        .with_to(vec![ToEvent::Key {
            key_code: emitted,
            modifiers: held,
        }]);

    if let Some(alone) = &hyper.alone {
        manipulator = manipulator.with_to_if_alone(vec![ToEvent::key(alone.clone())]);
    }

    manipulator
}

/// Builds the hyper key group, followed by any base manipulators.
#[must_use]
pub fn hyper_rule(hyper: &HyperKey, base: &[Manipulator]) -> ComplexRule {
    let mut manipulators = Vec::with_capacity(base.len() + 1);
    manipulators.push(hyper_manipulator(hyper));
    manipulators.extend(base.iter().cloned());
    ComplexRule::new(HYPER_GROUP_DESCRIPTION, manipulators)
}

/// "caps_lock" -> "Caps Lock"
fn title_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
