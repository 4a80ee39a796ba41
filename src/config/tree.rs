//! Path-addressed configuration tree.
//!
//! Keys containing `.` are interpreted as paths through nested trees, so
//! `tree.get("server.tls.cert")` walks three levels deep.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::ser::{Serialize, Serializer};

use super::value::Value;
use super::ConfigError;

/// Separator between path segments.
pub const DELIMITER: char = '.';

/// A string-keyed mapping whose nested mappings are themselves trees.
///
/// Top-level keys iterate in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DottedTree {
    entries: IndexMap<String, Value>,
}

impl DottedTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` at `key`, creating missing intermediate trees.
    ///
    /// Fails with [`ConfigError::PathConflict`] if a segment of the path
    /// already holds something other than a tree.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
        let value = value.into();
        match key.split_once(DELIMITER) {
            None => {
                self.entries.insert(key.to_string(), value);
                Ok(())
            }
            Some((head, rest)) => {
                let target = self
                    .entries
                    .entry(head.to_string())
                    .or_insert_with(|| Value::Tree(DottedTree::new()));
                match target {
                    Value::Tree(child) => child.set(rest, value),
                    other => Err(conflict("set", rest, head, other)),
                }
            }
        }
    }

    /// Returns the value at `key`.
    ///
    /// A missing segment yields [`ConfigError::KeyNotFound`]; descending
    /// through a non-tree value yields [`ConfigError::PathConflict`].
    pub fn get(&self, key: &str) -> Result<&Value, ConfigError> {
        match key.split_once(DELIMITER) {
            None => self
                .entries
                .get(key)
                .ok_or_else(|| ConfigError::KeyNotFound(key.to_string())),
            Some((head, rest)) => {
                let target = self
                    .entries
                    .get(head)
                    .ok_or_else(|| ConfigError::KeyNotFound(head.to_string()))?;
                match target {
                    Value::Tree(child) => child.get(rest),
                    other => Err(conflict("get", rest, head, other)),
                }
            }
        }
    }

    /// Mutable counterpart of [`get`](Self::get).
    pub fn get_mut(&mut self, key: &str) -> Result<&mut Value, ConfigError> {
        match key.split_once(DELIMITER) {
            None => self
                .entries
                .get_mut(key)
                .ok_or_else(|| ConfigError::KeyNotFound(key.to_string())),
            Some((head, rest)) => {
                let target = self
                    .entries
                    .get_mut(head)
                    .ok_or_else(|| ConfigError::KeyNotFound(head.to_string()))?;
                match target {
                    Value::Tree(child) => child.get_mut(rest),
                    other => Err(conflict("get", rest, head, other)),
                }
            }
        }
    }

    /// Like [`get`](Self::get), but returns `None` where `get` would fail.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        match key.split_once(DELIMITER) {
            None => self.entries.get(key),
            Some((head, rest)) => match self.entries.get(head)? {
                Value::Tree(child) => child.lookup(rest),
                _ => None,
            },
        }
    }

    /// Returns `true` if `key` resolves to a value.
    ///
    /// Never fails: a missing segment or a non-tree value partway through
    /// the path both count as absent.
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Returns the value at `key`, first storing `default` there if absent.
    pub fn set_default(
        &mut self,
        key: &str,
        default: impl Into<Value>,
    ) -> Result<&mut Value, ConfigError> {
        if !self.contains(key) {
            self.set(key, default)?;
        }
        self.get_mut(key)
    }

    /// Removes and returns the value at `key`, if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        match key.split_once(DELIMITER) {
            None => self.entries.shift_remove(key),
            Some((head, rest)) => match self.entries.get_mut(head)? {
                Value::Tree(child) => child.remove(rest),
                _ => None,
            },
        }
    }

    /// Deserializes the value at `key` into a typed structure.
    pub fn extract<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        self.get(key)?.deserialize_into()
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Top-level keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Top-level entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Converts back into a plain JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    /// Converts a TOML table found at `path` (empty for the document root).
    pub(crate) fn from_toml(path: &str, table: toml::Table) -> Result<Self, ConfigError> {
        let mut tree = DottedTree::new();
        for (key, value) in table {
            let child = if path.is_empty() {
                key.clone()
            } else {
                format!("{path}{DELIMITER}{key}")
            };
            tree.set(&key, Value::from_toml(&child, value)?)?;
        }
        Ok(tree)
    }

    /// Direct access to the top-level entries, bypassing path splitting.
    pub(crate) fn entries_mut(&mut self) -> &mut IndexMap<String, Value> {
        &mut self.entries
    }
}

fn conflict(action: &'static str, rest: &str, key: &str, found: &Value) -> ConfigError {
    ConfigError::PathConflict {
        action,
        rest: rest.to_string(),
        key: key.to_string(),
        found: found.to_string(),
    }
}

impl IntoIterator for DottedTree {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Every key goes through [`DottedTree::set`], so dotted source keys are
/// expanded into nested trees.
impl TryFrom<serde_json::Map<String, serde_json::Value>> for DottedTree {
    type Error = ConfigError;

    fn try_from(map: serde_json::Map<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut tree = DottedTree::new();
        for (key, value) in map {
            tree.set(&key, Value::try_from(value)?)?;
        }
        Ok(tree)
    }
}

impl TryFrom<toml::Table> for DottedTree {
    type Error = ConfigError;

    fn try_from(table: toml::Table) -> Result<Self, Self::Error> {
        DottedTree::from_toml("", table)
    }
}

impl Serialize for DottedTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter())
    }
}
