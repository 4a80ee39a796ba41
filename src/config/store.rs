//! The merged configuration store.

use serde::de::DeserializeOwned;

use super::builder::ConfigStoreBuilder;
use super::merge::merge;
use super::parse::{parse_json, parse_toml};
use super::tree::DottedTree;
use super::value::Value;
use super::ConfigError;

/// A primary configuration tree with an optional plugin configuration
/// merged over it.
///
/// Plugin values win on conflict. Accessors read from the merged tree and
/// treat absent and falsy values alike.
///
/// ## Example
///
/// ```
/// use dotted_conf::ConfigStore;
///
/// let mut store = ConfigStore::from_json(r#"{"plugin": {"class": "a.B", "kargs": {"n": 1}}}"#)?;
/// store.add_plugin_configuration(r#"{"plugin": {"kargs": {"n": 2}}}"#)?;
///
/// assert_eq!(store.plugin_class()?.as_str(), Some("a.B"));
/// assert_eq!(store.get("plugin.kargs.n")?.as_i64(), Some(2));
/// # Ok::<(), dotted_conf::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    root: DottedTree,
    plugin: DottedTree,
}

impl ConfigStore {
    /// Creates a new builder for loading a store from several sources.
    pub fn builder() -> ConfigStoreBuilder {
        ConfigStoreBuilder::default()
    }

    /// Parses the primary configuration from JSON text.
    pub fn from_json(conf: &str) -> Result<Self, ConfigError> {
        parse_json(conf, "configuration").map(Self::from_tree)
    }

    /// Parses the primary configuration from TOML text.
    pub fn from_toml(conf: &str) -> Result<Self, ConfigError> {
        parse_toml(conf, "configuration").map(Self::from_tree)
    }

    /// Wraps an already built tree as the primary configuration.
    pub fn from_tree(root: DottedTree) -> Self {
        Self {
            root,
            plugin: DottedTree::new(),
        }
    }

    /// Parses a plugin configuration from JSON text and merges it over the
    /// current root.
    ///
    /// Calling this again merges onto the already merged root, so overrides
    /// from earlier plugin configurations persist unless overridden again.
    pub fn add_plugin_configuration(&mut self, conf: &str) -> Result<(), ConfigError> {
        let plugin = parse_json(conf, "plugin configuration")?;
        self.add_plugin_tree(plugin);
        Ok(())
    }

    /// Merges an already parsed plugin tree over the current root.
    pub fn add_plugin_tree(&mut self, plugin: DottedTree) {
        tracing::info!(keys = plugin.len(), "merging plugin configuration");
        self.root = merge(&self.root, &plugin);
        self.plugin = plugin;
    }

    /// The merged configuration tree.
    pub fn root(&self) -> &DottedTree {
        &self.root
    }

    /// The most recently added plugin configuration, before merging.
    pub fn plugin_conf(&self) -> &DottedTree {
        &self.plugin
    }

    /// Reads a dotted path from the merged tree. See [`DottedTree::get`].
    pub fn get(&self, key: &str) -> Result<&Value, ConfigError> {
        self.root.get(key)
    }

    /// See [`DottedTree::contains`].
    pub fn contains(&self, key: &str) -> bool {
        self.root.contains(key)
    }

    /// The `monitors` section; absent or falsy is an error.
    pub fn monitors(&self) -> Result<&Value, ConfigError> {
        required(self.root.lookup("monitors"), "No monitors to attach")
    }

    /// The `loggers` section; absent or falsy is an error.
    pub fn loggers(&self) -> Result<&Value, ConfigError> {
        required(self.root.lookup("loggers"), "No loggers to attach")
    }

    /// The `plugin` section, exactly as stored.
    pub fn plugin_root(&self) -> Result<&Value, ConfigError> {
        required(self.root.lookup("plugin"), "Malformed plugin structure")
    }

    /// `plugin.class`. A `plugin` section that is not a tree has no class.
    pub fn plugin_class(&self) -> Result<&Value, ConfigError> {
        self.plugin_entry("class", "Plugin class is not defined")
    }

    /// `plugin.kargs`. A `plugin` section that is not a tree has no kargs.
    pub fn plugin_kargs(&self) -> Result<&Value, ConfigError> {
        self.plugin_entry("kargs", "Plugin kargs is not defined")
    }

    /// Deserializes `plugin.kargs` into a typed structure.
    pub fn plugin_kargs_as<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        self.plugin_kargs()?.deserialize_into()
    }

    fn plugin_entry(&self, key: &str, message: &'static str) -> Result<&Value, ConfigError> {
        let plugin = self.plugin_root()?;
        required(plugin.as_tree().and_then(|tree| tree.lookup(key)), message)
    }
}

fn required<'a>(value: Option<&'a Value>, message: &'static str) -> Result<&'a Value, ConfigError> {
    value
        .filter(|v| v.is_truthy())
        .ok_or(ConfigError::MissingSection(message))
}
