//! Sublayer compilation.
//!
//! Each sublayer trigger `k` becomes:
//!
//! - one activation manipulator on hyper + `k` that sets
//!   `hyper_sublayer_k` to 1 while held and back to 0 on release, guarded
//!   so it only fires when every other sublayer variable is 0, and
//! - one dispatch manipulator per leaf key, guarded by
//!   `hyper_sublayer_k == 1`.
//!
//! The guards keep at most one sublayer active at a time, so the same leaf
//! key can be reused across sublayers.

use crate::constants::SUBLAYER_VARIABLE_PREFIX;
use crate::generator::actions;
use crate::models::{
    Action, ComplexRule, Condition, FromEvent, KeyCode, LayerEntry, LayerTable, Manipulator,
    Sublayer, ToEvent,
};
use tracing::debug;

/// Name of the layer-active variable for `trigger`.
#[must_use]
pub fn sublayer_variable(trigger: &KeyCode) -> String {
    format!("{SUBLAYER_VARIABLE_PREFIX}{trigger}")
}

/// Conditions requiring every sublayer of `table` to be inactive.
///
/// Base rules that share keys with sublayer leaves use these so they stay
/// quiet while a sublayer is held.
#[must_use]
pub fn idle_conditions(table: &LayerTable) -> Vec<Condition> {
    table
        .sublayers()
        .map(|(trigger, _)| Condition::variable_if(sublayer_variable(trigger), 0))
        .collect()
}

/// Compiles the layer table into rule groups, one per trigger key, in table order.
#[must_use]
pub fn compile_layers(table: &LayerTable, hyper_modifiers: &[KeyCode]) -> Vec<ComplexRule> {
    let variables: Vec<String> = table
        .sublayers()
        .map(|(trigger, _)| sublayer_variable(trigger))
        .collect();

    table
        .iter()
        .map(|(trigger, entry)| match entry {
            LayerEntry::Sublayer(sublayer) => {
                compile_sublayer(trigger, sublayer, &variables, hyper_modifiers)
            }
            LayerEntry::Direct(action) => compile_direct(trigger, action, hyper_modifiers),
        })
        .collect()
}

/// Compiles a single sublayer into its activation and dispatch manipulators.
///
/// `all_variables` lists every sublayer variable in the table; the
/// trigger's own variable is excluded from its activation guards.
#[must_use]
pub fn compile_sublayer(
    trigger: &KeyCode,
    sublayer: &Sublayer,
    all_variables: &[String],
    hyper_modifiers: &[KeyCode],
) -> ComplexRule {
    let variable = sublayer_variable(trigger);
    debug!(
        trigger = %trigger,
        bindings = sublayer.len(),
        "compiling sublayer"
    );

    let mut manipulators = Vec::with_capacity(sublayer.len() + 1);
    manipulators.push(activation_manipulator(
        trigger,
        &variable,
        all_variables,
        hyper_modifiers,
    ));
    manipulators.extend(
        sublayer
            .iter()
            .map(|(key, action)| dispatch_manipulator(key, action, &variable)),
    );

    ComplexRule::new(format!("Hyper Key sublayer \"{trigger}\""), manipulators)
}

/// Hyper + `trigger` toggles `variable` for as long as the key is held.
fn activation_manipulator(
    trigger: &KeyCode,
    variable: &str,
    all_variables: &[String],
    hyper_modifiers: &[KeyCode],
) -> Manipulator {
    let guards = all_variables
        .iter()
        .filter(|other| other.as_str() != variable)
        .map(|other| Condition::variable_if(other.clone(), 0))
        .collect();

    Manipulator::new(FromEvent::with_mandatory(
        trigger.clone(),
        hyper_modifiers.to_vec(),
    ))
    .with_description(format!("Toggle Hyper sublayer {trigger}"))
    .with_to(vec![ToEvent::set_variable(variable, 1)])
    .with_to_after_key_up(vec![ToEvent::set_variable(variable, 0)])
    .with_conditions(guards)
}

/// `key` fires `action` while `variable` is set.
///
/// The hyper modifiers are still physically held, so any modifier is allowed.
fn dispatch_manipulator(key: &KeyCode, action: &Action, variable: &str) -> Manipulator {
    Manipulator::new(FromEvent::with_any_modifiers(key.clone()))
        .with_description(actions::describe(action))
        .with_to(actions::to_events(action))
        .with_conditions(vec![Condition::variable_if(variable, 1)])
}

/// Hyper + `trigger` fires `action` directly, without a sublayer.
fn compile_direct(trigger: &KeyCode, action: &Action, hyper_modifiers: &[KeyCode]) -> ComplexRule {
    debug!(trigger = %trigger, "compiling direct hyper shortcut");
    let manipulator = Manipulator::new(FromEvent::with_mandatory(
        trigger.clone(),
        hyper_modifiers.to_vec(),
    ))
    .with_description(actions::describe(action))
    .with_to(actions::to_events(action));

    ComplexRule::new(format!("Hyper Key + {trigger}"), vec![manipulator])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::hyper_modifiers;

    fn key(code: &str) -> KeyCode {
        KeyCode::new(code).unwrap()
    }

    fn two_layer_table() -> LayerTable {
        LayerTable::new()
            .sublayer(
                "w",
                Sublayer::new()
                    .with(
                        "h",
                        Action::command("Window: Move Left", "yabai -m window --warp west")
                            .unwrap(),
                    )
                    .unwrap(),
            )
            .unwrap()
            .sublayer(
                "s",
                Sublayer::new()
                    .with("u", Action::key("volume_increment").unwrap())
                    .unwrap()
                    .with("j", Action::key("volume_decrement").unwrap())
                    .unwrap(),
            )
            .unwrap()
    }

    #[test]
    fn test_variable_name() {
        assert_eq!(sublayer_variable(&key("o")), "hyper_sublayer_o");
    }

    #[test]
    fn test_one_group_per_trigger_in_order() {
        let rules = compile_layers(&two_layer_table(), &hyper_modifiers());
        let descriptions: Vec<&str> = rules.iter().map(|r| r.description.as_str()).collect();
        assert_eq!(
            descriptions,
            ["Hyper Key sublayer \"w\"", "Hyper Key sublayer \"s\""]
        );
        assert_eq!(rules[0].manipulators.len(), 2);
        assert_eq!(rules[1].manipulators.len(), 3);
    }

    #[test]
    fn test_activation_sets_and_clears_flag() {
        let rules = compile_layers(&two_layer_table(), &hyper_modifiers());
        let activation = &rules[0].manipulators[0];

        assert_eq!(activation.from.key_code.as_str(), "w");
        assert_eq!(activation.from.mandatory_modifiers(), hyper_modifiers().as_slice());
        assert_eq!(activation.to, vec![ToEvent::set_variable("hyper_sublayer_w", 1)]);
        assert_eq!(
            activation.to_after_key_up,
            vec![ToEvent::set_variable("hyper_sublayer_w", 0)]
        );
        assert!(activation.to_if_alone.is_empty());
    }

    #[test]
    fn test_activation_guards_exclude_own_flag() {
        let rules = compile_layers(&two_layer_table(), &hyper_modifiers());
        let w = &rules[0].manipulators[0];
        let s = &rules[1].manipulators[0];

        assert_eq!(w.conditions, vec![Condition::variable_if("hyper_sublayer_s", 0)]);
        assert_eq!(s.conditions, vec![Condition::variable_if("hyper_sublayer_w", 0)]);
    }

    #[test]
    fn test_dispatch_guarded_by_own_flag() {
        let rules = compile_layers(&two_layer_table(), &hyper_modifiers());
        let dispatch = &rules[1].manipulators[1];

        assert_eq!(dispatch.from.key_code.as_str(), "u");
        assert!(dispatch.from.mandatory_modifiers().is_empty());
        assert_eq!(
            dispatch.conditions,
            vec![Condition::variable_if("hyper_sublayer_s", 1)]
        );
        assert_eq!(dispatch.to, vec![ToEvent::key(key("volume_increment"))]);
        assert_eq!(dispatch.description.as_deref(), Some("Send volume_increment"));
    }

    #[test]
    fn test_empty_sublayer_emits_only_activation() {
        let table = LayerTable::new().sublayer("x", Sublayer::new()).unwrap();
        let rules = compile_layers(&table, &hyper_modifiers());
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].manipulators.len(), 1);
        // Only sublayer: nothing else to guard against
        assert!(rules[0].manipulators[0].conditions.is_empty());
    }

    #[test]
    fn test_shared_leaf_keys_across_sublayers() {
        let table = LayerTable::new()
            .sublayer("v", Sublayer::new().with("j", Action::key("down_arrow").unwrap()).unwrap())
            .unwrap()
            .sublayer(
                "s",
                Sublayer::new()
                    .with("j", Action::key("volume_decrement").unwrap())
                    .unwrap(),
            )
            .unwrap();
        let rules = compile_layers(&table, &hyper_modifiers());
        let j_rules: Vec<&Manipulator> = rules
            .iter()
            .flat_map(|r| r.manipulators.iter())
            .filter(|m| m.from.key_code.as_str() == "j")
            .collect();
        assert_eq!(j_rules.len(), 2);
        assert!(j_rules[0].requires("hyper_sublayer_v", 1));
        assert!(j_rules[1].requires("hyper_sublayer_s", 1));
    }

    #[test]
    fn test_direct_entry_has_no_flag() {
        let table = LayerTable::new()
            .sublayer("o", Sublayer::new())
            .unwrap()
            .direct("q", Action::open("raycast://confetti").unwrap())
            .unwrap();
        let rules = compile_layers(&table, &hyper_modifiers());

        assert_eq!(rules[1].description, "Hyper Key + q");
        let direct = &rules[1].manipulators[0];
        assert_eq!(direct.from.mandatory_modifiers().len(), 4);
        assert!(direct.conditions.is_empty());
        assert_eq!(direct.to, vec![ToEvent::shell("open raycast://confetti")]);

        // The direct entry owns no variable, so nothing guards against it
        assert!(rules[0].manipulators[0].conditions.is_empty());
    }

    #[test]
    fn test_idle_conditions_cover_every_sublayer() {
        let conditions = idle_conditions(&two_layer_table());
        assert_eq!(
            conditions,
            vec![
                Condition::variable_if("hyper_sublayer_w", 0),
                Condition::variable_if("hyper_sublayer_s", 0),
            ]
        );
    }
}
