//! Library-level tests for rule compilation and document output.

use hyperlayer::generator::{build_document, render_document, write_document, TableValidator};
use hyperlayer::models::{Action, LayerTable, ProfileSettings, RuleTable, Sublayer};
use hyperlayer::parser::{load_rule_file, parse_rule_str, RuleFormat};
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

fn render(table: &RuleTable) -> Value {
    let document = build_document(table, &ProfileSettings::default());
    serde_json::from_str(&render_document(&document).unwrap()).unwrap()
}

fn rules(document: &Value) -> &Vec<Value> {
    document["profiles"][0]["complex_modifications"]["rules"]
        .as_array()
        .expect("rules array")
}

fn group<'a>(document: &'a Value, description: &str) -> &'a Value {
    rules(document)
        .iter()
        .find(|r| r["description"] == description)
        .unwrap_or_else(|| panic!("missing group {description}"))
}

#[test]
fn test_document_shape() {
    let document = render(&basic_table());

    assert_eq!(document["global"], json!({ "show_in_menu_bar": true }));
    assert_eq!(document["profiles"].as_array().unwrap().len(), 1);
    assert_eq!(document["profiles"][0]["name"], "Default");

    // hyper group, o, w, s, q
    let descriptions: Vec<&str> = rules(&document)
        .iter()
        .map(|r| r["description"].as_str().unwrap())
        .collect();
    assert_eq!(
        descriptions,
        vec![
            "Hyper Key (⌃⌥⇧⌘)",
            "Hyper Key sublayer \"o\"",
            "Hyper Key sublayer \"w\"",
            "Hyper Key sublayer \"s\"",
            "Hyper Key + q",
        ]
    );

    for rule in rules(&document) {
        for manipulator in rule["manipulators"].as_array().unwrap() {
            assert_eq!(manipulator["type"], "basic");
            assert!(manipulator["from"]["key_code"].is_string());
            // Optional fields are omitted, never null
            for (field, value) in manipulator.as_object().unwrap() {
                assert!(!value.is_null(), "{field} serialized as null");
            }
        }
    }
}

#[test]
fn test_app_binding_dispatch() {
    let table = RuleTable::new(
        LayerTable::new()
            .sublayer(
                "o",
                Sublayer::new()
                    .with("g", Action::app("Google Chrome").unwrap())
                    .unwrap(),
            )
            .unwrap(),
    );

    let document = render(&table);
    let manipulators = group(&document, "Hyper Key sublayer \"o\"")["manipulators"]
        .as_array()
        .unwrap();
    assert_eq!(manipulators.len(), 2);

    let dispatch = &manipulators[1];
    assert_eq!(dispatch["description"], "Open -a 'Google Chrome.app'");
    assert_eq!(
        dispatch["from"],
        json!({ "key_code": "g", "modifiers": { "optional": ["any"] } })
    );
    assert_eq!(
        dispatch["to"],
        json!([{ "shell_command": "open -a 'Google Chrome.app'" }])
    );
    assert_eq!(
        dispatch["conditions"],
        json!([{ "type": "variable_if", "name": "hyper_sublayer_o", "value": 1 }])
    );
}

#[test]
fn test_activation_guards_cross_reference() {
    let table = RuleTable::new(
        LayerTable::new()
            .sublayer(
                "w",
                Sublayer::new()
                    .with("h", Action::shell("yabai -m window --focus west").unwrap())
                    .unwrap(),
            )
            .unwrap()
            .sublayer(
                "s",
                Sublayer::new()
                    .with("u", Action::key("volume_increment").unwrap())
                    .unwrap(),
            )
            .unwrap(),
    );

    let document = render(&table);

    let w_activation = &group(&document, "Hyper Key sublayer \"w\"")["manipulators"][0];
    assert_eq!(
        w_activation["from"],
        json!({
            "key_code": "w",
            "modifiers": {
                "mandatory": ["left_command", "left_control", "left_shift", "left_option"]
            }
        })
    );
    assert_eq!(
        w_activation["to"],
        json!([{ "set_variable": { "name": "hyper_sublayer_w", "value": 1 } }])
    );
    assert_eq!(
        w_activation["to_after_key_up"],
        json!([{ "set_variable": { "name": "hyper_sublayer_w", "value": 0 } }])
    );
    assert_eq!(
        w_activation["conditions"],
        json!([{ "type": "variable_if", "name": "hyper_sublayer_s", "value": 0 }])
    );

    let s_activation = &group(&document, "Hyper Key sublayer \"s\"")["manipulators"][0];
    assert_eq!(
        s_activation["conditions"],
        json!([{ "type": "variable_if", "name": "hyper_sublayer_w", "value": 0 }])
    );
}

#[test]
fn test_empty_sublayer_has_only_activation() {
    let table = RuleTable::new(LayerTable::new().sublayer("x", Sublayer::new()).unwrap());

    let document = render(&table);
    let manipulators = group(&document, "Hyper Key sublayer \"x\"")["manipulators"]
        .as_array()
        .unwrap();
    assert_eq!(manipulators.len(), 1);
    assert_eq!(
        manipulators[0]["to"],
        json!([{ "set_variable": { "name": "hyper_sublayer_x", "value": 1 } }])
    );
    // Only sublayer in the table: nothing to guard against
    assert!(manipulators[0].get("conditions").is_none());
}

#[test]
fn test_direct_entry_owns_no_variable() {
    let document = render(&basic_table());

    let direct = group(&document, "Hyper Key + q")["manipulators"]
        .as_array()
        .unwrap();
    assert_eq!(direct.len(), 1);
    assert_eq!(
        direct[0]["to"],
        json!([
            { "shell_command": "open raycast://confetti" },
            { "shell_command": "open https://example.com" }
        ])
    );

    let rendered = serde_json::to_string(&document).unwrap();
    assert!(!rendered.contains("hyper_sublayer_q"));
}

#[test]
fn test_generation_is_deterministic() {
    let table = hyperlayer::rules::default_table().unwrap();
    let settings = ProfileSettings::default();

    let first = render_document(&build_document(&table, &settings)).unwrap();
    let second = render_document(&build_document(&table, &settings)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_built_in_rules_validate_clean() {
    let table = hyperlayer::rules::default_table().unwrap();
    let report = TableValidator::new(&table).validate();
    assert!(report.is_valid(), "{}", report.format_message());
    assert!(report.warnings.is_empty(), "{}", report.format_message());
}

#[test]
fn test_rule_files_match_typed_table() {
    let toml_table = parse_rule_str(BASIC_RULES_TOML, RuleFormat::Toml).unwrap();
    let json_table = parse_rule_str(BASIC_RULES_JSON5, RuleFormat::Json5).unwrap();

    assert_eq!(toml_table, basic_table());
    assert_eq!(json_table, basic_table());
}

#[test]
fn test_load_and_write_round_trip_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let rules_path = write_rule_file(temp_dir.path(), "rules.toml", BASIC_RULES_TOML);
    let output = temp_dir.path().join("nested").join("karabiner.json");

    let table = load_rule_file(&rules_path).unwrap();
    let document = build_document(&table, &ProfileSettings::default());
    write_document(&document, &output).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, render_document(&document).unwrap());
    assert!(!output.with_extension("json.tmp").exists());
}
