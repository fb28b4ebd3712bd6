//! Sublayer tables: trigger keys fanning out into leaf actions.
//!
//! Both levels are ordered and reject duplicate keys, so the generated
//! output follows definition order and a key can never be silently
//! shadowed by a later definition.

use crate::constants::{DEFAULT_HYPER_ALONE, DEFAULT_HYPER_FROM, HYPER_MODIFIERS};
use crate::models::action::Action;
use crate::models::key::KeyCode;
use crate::models::manipulator::Manipulator;
use anyhow::Result;

/// Ordered mapping of leaf key to action, active while its trigger is held.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sublayer {
    bindings: Vec<(KeyCode, Action)>,
}

impl Sublayer {
    /// Creates an empty sublayer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` to `action`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is malformed or already bound in this sublayer.
    pub fn bind(&mut self, key: &str, action: Action) -> Result<()> {
        let key = KeyCode::new(key)?;
        if self.get(key.as_str()).is_some() {
            anyhow::bail!("Key '{}' is bound twice in the same sublayer", key);
        }
        self.bindings.push((key, action));
        Ok(())
    }

    /// Builder form of [`Sublayer::bind`].
    pub fn with(mut self, key: &str, action: Action) -> Result<Self> {
        self.bind(key, action)?;
        Ok(self)
    }

    /// Looks up the action bound to `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Action> {
        self.bindings
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, action)| action)
    }

    /// Iterates bindings in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyCode, &Action)> {
        self.bindings.iter().map(|(k, a)| (k, a))
    }

    /// Number of bound keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if no key is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// What a trigger key does when pressed with the hyper chord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerEntry {
    /// Hold to activate a sublayer
    Sublayer(Sublayer),
    /// Fire a single action immediately
    Direct(Action),
}

/// Ordered mapping of trigger key to layer entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayerTable {
    entries: Vec<(KeyCode, LayerEntry)>,
}

impl LayerTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry for `trigger`.
    ///
    /// # Errors
    ///
    /// Returns an error if the trigger is malformed or already defined.
    pub fn insert(&mut self, trigger: &str, entry: LayerEntry) -> Result<()> {
        let trigger = KeyCode::new(trigger)?;
        if self.get(trigger.as_str()).is_some() {
            anyhow::bail!("Trigger key '{}' is defined twice", trigger);
        }
        self.entries.push((trigger, entry));
        Ok(())
    }

    /// Builder form adding a sublayer.
    pub fn sublayer(mut self, trigger: &str, sublayer: Sublayer) -> Result<Self> {
        self.insert(trigger, LayerEntry::Sublayer(sublayer))?;
        Ok(self)
    }

    /// Builder form adding a direct hyper shortcut.
    pub fn direct(mut self, trigger: &str, action: Action) -> Result<Self> {
        self.insert(trigger, LayerEntry::Direct(action))?;
        Ok(self)
    }

    /// Looks up the entry for `trigger`.
    #[must_use]
    pub fn get(&self, trigger: &str) -> Option<&LayerEntry> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == trigger)
            .map(|(_, entry)| entry)
    }

    /// Iterates entries in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&KeyCode, &LayerEntry)> {
        self.entries.iter().map(|(k, e)| (k, e))
    }

    /// Iterates only the sublayer entries, in definition order.
    pub fn sublayers(&self) -> impl Iterator<Item = (&KeyCode, &Sublayer)> {
        self.entries.iter().filter_map(|(k, e)| match e {
            LayerEntry::Sublayer(s) => Some((k, s)),
            LayerEntry::Direct(_) => None,
        })
    }

    /// Number of trigger keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no trigger is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Physical key acting as the hyper key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HyperKey {
    /// Key remapped to the hyper chord
    pub from: KeyCode,
    /// Key emitted when tapped alone (none disables tap behavior)
    pub alone: Option<KeyCode>,
    /// Modifiers the hyper chord consists of
    pub modifiers: Vec<KeyCode>,
}

impl HyperKey {
    /// Creates a hyper key on `from` using the standard four-modifier chord.
    pub fn new(from: &str, alone: Option<&str>) -> Result<Self> {
        Ok(Self {
            from: KeyCode::new(from)?,
            alone: alone.map(KeyCode::new).transpose()?,
            modifiers: hyper_modifiers(),
        })
    }
}

impl Default for HyperKey {
    fn default() -> Self {
        Self {
            from: KeyCode::new(DEFAULT_HYPER_FROM)
                .unwrap_or_else(|_| unreachable!("default hyper key is valid")),
            alone: KeyCode::new(DEFAULT_HYPER_ALONE).ok(),
            modifiers: hyper_modifiers(),
        }
    }
}

/// The hyper chord as key codes.
#[must_use]
pub fn hyper_modifiers() -> Vec<KeyCode> {
    HYPER_MODIFIERS
        .iter()
        .filter_map(|m| KeyCode::new(*m).ok())
        .collect()
}

/// Everything needed to generate a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleTable {
    /// Hyper key definition
    pub hyper: HyperKey,
    /// Extra manipulators appended to the hyper key group
    pub base: Vec<Manipulator>,
    /// Trigger key table
    pub layers: LayerTable,
}

impl RuleTable {
    /// Creates a rule table with the default hyper key and the given layers.
    #[must_use]
    pub fn new(layers: LayerTable) -> Self {
        Self {
            layers,
            ..Self::default()
        }
    }
}
