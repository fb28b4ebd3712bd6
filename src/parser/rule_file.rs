//! Rule file parsing.
//!
//! Rule tables can be written in TOML or JSON5 so they can change without
//! rebuilding the binary.
//!
//! # File Format
//!
//! ```toml
//! [hyper]
//! from = "caps_lock"
//! alone = "escape"      # "" disables the tap action
//!
//! [layers.o]
//! g = { app = "Google Chrome" }
//! e = { key = "spacebar", modifiers = ["right_control", "right_command"] }
//!
//! [layers.r]
//! p = { open = "raycast://confetti" }
//!
//! [layers.w]
//! h = { command = "yabai -m window --warp west", description = "Window: Move Left" }
//!
//! [layers]
//! q = { open = ["raycast://confetti", "https://example.com"] }  # direct hyper+q
//! ```
//!
//! Entries keep their document order. Each action names exactly one of
//! `app`, `command`, `open` or `key`; `modifiers` is only valid with `key`.
//! Raw base manipulators can be listed under `[[base]]` using the engine's
//! own field names.

use crate::models::{Action, HyperKey, LayerEntry, LayerTable, Manipulator, RuleTable, Sublayer};
use anyhow::{Context, Result};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use tracing::debug;

/// Fields that select what an action does.
const ACTION_KINDS: [&str; 4] = ["app", "command", "open", "key"];

/// Every field an action table may contain.
const ACTION_FIELDS: [&str; 6] = ["app", "command", "open", "key", "modifiers", "description"];

/// Order-preserving table that rejects duplicate keys.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OrderedMap<V>(Vec<(String, V)>);

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<V> OrderedMap<V> {
    fn get(&self, key: &str) -> Option<&V> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}

struct OrderedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries: Vec<(String, V)> = Vec::new();
        while let Some(key) = access.next_key::<String>()? {
            if entries.iter().any(|(k, _)| *k == key) {
                return Err(de::Error::custom(format!("duplicate key '{key}'")));
            }
            let value = access.next_value()?;
            entries.push((key, value));
        }
        Ok(OrderedMap(entries))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Untyped value of the `layers` section.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    List(Vec<String>),
    Table(OrderedMap<Node>),
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, a list of strings or a table")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Node, E> {
        Ok(Node::Text(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Node, E> {
        Ok(Node::Text(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Node, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = access.next_element::<String>()? {
            items.push(item);
        }
        Ok(Node::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, access: A) -> Result<Node, A::Error> {
        OrderedMapVisitor(PhantomData).visit_map(access).map(Node::Table)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct HyperSpec {
    from: Option<String>,
    alone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleFile {
    #[serde(default)]
    hyper: Option<HyperSpec>,
    #[serde(default)]
    base: Vec<Manipulator>,
    #[serde(default)]
    layers: OrderedMap<Node>,
}

/// Supported rule file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    /// `.toml`
    Toml,
    /// `.json` / `.json5` (comments and trailing commas allowed)
    Json5,
}

impl RuleFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json" | "json5") => Ok(Self::Json5),
            _ => anyhow::bail!(
                "Unsupported rule file '{}': expected a .toml, .json or .json5 file",
                path.display()
            ),
        }
    }
}

/// Loads a rule table from a file.
pub fn load_rule_file(path: &Path) -> Result<RuleTable> {
    let format = RuleFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read rule file: {}", path.display()))?;

    let table = parse_rule_str(&content, format)
        .context(format!("Failed to parse rule file: {}", path.display()))?;

    debug!(
        path = %path.display(),
        triggers = table.layers.len(),
        base = table.base.len(),
        "loaded rule file"
    );
    Ok(table)
}

/// Parses rule file content in the given format.
pub fn parse_rule_str(content: &str, format: RuleFormat) -> Result<RuleTable> {
    let file: RuleFile = match format {
        RuleFormat::Toml => toml::from_str(content)?,
        RuleFormat::Json5 => json5::from_str(content)?,
    };

    let hyper = match file.hyper {
        Some(spec) => {
            let defaults = HyperKey::default();
            let from = spec.from.unwrap_or_else(|| defaults.from.to_string());
            let alone = match spec.alone {
                Some(alone) if alone.is_empty() => None,
                Some(alone) => Some(alone),
                None => defaults.alone.map(|k| k.to_string()),
            };
            HyperKey::new(&from, alone.as_deref()).context("Invalid [hyper] section")?
        }
        None => HyperKey::default(),
    };

    let mut layers = LayerTable::new();
    for (trigger, node) in &file.layers.0 {
        let entry = layer_entry(trigger, node)?;
        layers
            .insert(trigger, entry)
            .context(format!("Invalid trigger key 'layers.{trigger}'"))?;
    }

    Ok(RuleTable {
        hyper,
        base: file.base,
        layers,
    })
}

fn layer_entry(trigger: &str, node: &Node) -> Result<LayerEntry> {
    let Node::Table(table) = node else {
        anyhow::bail!("layers.{trigger}: expected a table of bindings or an action");
    };

    if is_action_table(table) {
        return Ok(LayerEntry::Direct(action_from_table(
            table,
            &format!("layers.{trigger}"),
        )?));
    }

    let mut sublayer = Sublayer::new();
    for (leaf, value) in &table.0 {
        let path = format!("layers.{trigger}.{leaf}");
        let Node::Table(spec) = value else {
            anyhow::bail!("{path}: expected an action table like {{ app = \"Name\" }}");
        };
        let action = action_from_table(spec, &path)?;
        sublayer
            .bind(leaf, action)
            .context(format!("{path}: invalid binding"))?;
    }
    Ok(LayerEntry::Sublayer(sublayer))
}

/// A table is a direct action when one of its action fields holds a plain value.
///
/// Sublayer bindings are always tables, so `o = { key = { ... } }` is still
/// read as a sublayer binding the `key` key.
fn is_action_table(table: &OrderedMap<Node>) -> bool {
    ACTION_KINDS
        .iter()
        .any(|kind| matches!(table.get(kind), Some(Node::Text(_) | Node::List(_))))
}

fn action_from_table(table: &OrderedMap<Node>, path: &str) -> Result<Action> {
    if let Some((unknown, _)) = table
        .0
        .iter()
        .find(|(k, _)| !ACTION_FIELDS.contains(&k.as_str()))
    {
        anyhow::bail!(
            "{path}: unknown field '{unknown}' (expected one of {})",
            ACTION_FIELDS.join(", ")
        );
    }

    let kinds: Vec<&str> = ACTION_KINDS
        .iter()
        .copied()
        .filter(|kind| table.get(kind).is_some())
        .collect();
    let [kind] = kinds.as_slice() else {
        anyhow::bail!(
            "{path}: expected exactly one of {} (found {})",
            ACTION_KINDS.join(", "),
            if kinds.is_empty() {
                "none".to_string()
            } else {
                kinds.join(", ")
            }
        );
    };

    let modifiers = match table.get("modifiers") {
        None => Vec::new(),
        Some(_) if *kind != "key" => {
            anyhow::bail!("{path}: 'modifiers' is only allowed together with 'key'")
        }
        Some(node) => string_list(node, &format!("{path}.modifiers"))?,
    };

    let action = match *kind {
        "app" => Action::app(text(table, "app", path)?),
        "command" => Action::shell(text(table, "command", path)?),
        "open" => {
            let targets = table
                .get("open")
                .map(|node| string_list(node, &format!("{path}.open")))
                .transpose()?
                .unwrap_or_default();
            Action::open_all(targets)
        }
        _ => {
            let key = text(table, "key", path)?;
            let modifiers: Vec<&str> = modifiers.iter().map(String::as_str).collect();
            Action::key_with_modifiers(&key, &modifiers)
        }
    }
    .context(format!("{path}: invalid action"))?;

    match table.get("description") {
        None => Ok(action),
        Some(Node::Text(description)) => Ok(action.with_description(description.clone())),
        Some(_) => anyhow::bail!("{path}.description: expected a string"),
    }
}

fn text(table: &OrderedMap<Node>, field: &str, path: &str) -> Result<String> {
    match table.get(field) {
        Some(Node::Text(value)) => Ok(value.clone()),
        _ => anyhow::bail!("{path}.{field}: expected a string"),
    }
}

fn string_list(node: &Node, path: &str) -> Result<Vec<String>> {
    match node {
        Node::Text(value) => Ok(vec![value.clone()]),
        Node::List(values) => Ok(values.clone()),
        Node::Table(_) => anyhow::bail!("{path}: expected a string or a list of strings"),
    }
}
