use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::file::read_config_text;
use super::merge::deep_merge;
use super::parse::Format;
use super::store::ConfigStore;
use super::tree::DottedTree;
use super::vars::set_conf_vars;
use super::ConfigError;

/// A configuration source in the loading pipeline.
#[derive(Debug)]
enum Source {
    Text { text: String, format: Format },
    File { path: PathBuf, required: bool },
}

/// Builder for loading a [`ConfigStore`] from text and files.
///
/// Primary sources are merged in registration order, with later sources
/// overriding earlier ones. Plugin sources are then merged over the result
/// one after another, as with [`ConfigStore::add_plugin_configuration`].
///
/// ## Placeholders
///
/// When variables are supplied with [`with_vars`](Self::with_vars), every
/// source text has its `@name@` placeholders substituted before parsing.
/// An undefined placeholder fails the build.
///
/// ## Example
///
/// ```no_run
/// use dotted_conf::ConfigStore;
///
/// let store = ConfigStore::builder()
///     .with_vars([("HOST", "localhost")])
///     .with_file("conf/quokka.json", true)
///     .with_plugin_file("conf/plugin.json", false)
///     .build()?;
///
/// let class = store.plugin_class()?;
/// # Ok::<(), dotted_conf::ConfigError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfigStoreBuilder {
    sources: Vec<Source>,
    plugins: Vec<Source>,
    vars: Option<HashMap<String, String>>,
}

impl ConfigStoreBuilder {
    /// Sets the placeholder variables substituted into every source.
    pub fn with_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars = Some(
            vars.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Adds JSON text as a primary source.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.sources.push(Source::Text {
            text: text.into(),
            format: Format::Json,
        });
        self
    }

    /// Adds TOML text as a primary source.
    pub fn with_toml_text(mut self, text: impl Into<String>) -> Self {
        self.sources.push(Source::Text {
            text: text.into(),
            format: Format::Toml,
        });
        self
    }

    /// Adds a file as a primary source. `.toml` files are parsed as TOML,
    /// everything else as JSON.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.sources.push(Source::File {
            path: path.as_ref().to_path_buf(),
            required,
        });
        self
    }

    /// Adds JSON text as a plugin source.
    pub fn with_plugin_text(mut self, text: impl Into<String>) -> Self {
        self.plugins.push(Source::Text {
            text: text.into(),
            format: Format::Json,
        });
        self
    }

    /// Adds a file as a plugin source.
    pub fn with_plugin_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.plugins.push(Source::File {
            path: path.as_ref().to_path_buf(),
            required,
        });
        self
    }

    /// Loads, substitutes, parses and merges every source.
    pub fn build(self) -> Result<ConfigStore, ConfigError> {
        let mut root = DottedTree::new();
        for source in &self.sources {
            if let Some(tree) = self.load(source, "configuration")? {
                deep_merge(&mut root, tree);
            }
        }

        let mut store = ConfigStore::from_tree(root);
        for source in &self.plugins {
            if let Some(tree) = self.load(source, "plugin configuration")? {
                store.add_plugin_tree(tree);
            }
        }

        Ok(store)
    }

    fn load(&self, source: &Source, what: &'static str) -> Result<Option<DottedTree>, ConfigError> {
        let (text, format) = match source {
            Source::Text { text, format } => (text.clone(), *format),
            Source::File { path, required } => match read_config_text(path, *required)? {
                Some(text) => (text, Format::from_path(path)),
                None => return Ok(None),
            },
        };

        let text = match &self.vars {
            Some(vars) => set_conf_vars(&text, vars)?,
            None => text,
        };

        format.parse(&text, what).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_later_sources_override_earlier() {
        let store = ConfigStore::builder()
            .with_text(r#"{"a": {"x": 1, "y": 1}, "b": 1}"#)
            .with_text(r#"{"a": {"y": 2}}"#)
            .build()
            .unwrap();
        assert_eq!(store.root().to_json(), json!({"a": {"x": 1, "y": 2}, "b": 1}));
        assert!(store.plugin_conf().is_empty());
    }

    #[test]
    fn test_plugin_sources_merge_last() {
        let store = ConfigStore::builder()
            .with_plugin_text(r#"{"plugin": {"class": "override.Plugin"}}"#)
            .with_text(r#"{"plugin": {"class": "base.Plugin", "kargs": {"n": 1}}}"#)
            .build()
            .unwrap();
        assert_eq!(store.plugin_class().unwrap().as_str(), Some("override.Plugin"));
        assert_eq!(store.plugin_kargs().unwrap().to_json(), json!({"n": 1}));
    }

    #[test]
    fn test_vars_are_substituted() {
        let store = ConfigStore::builder()
            .with_vars([("HOST", "db.local"), ("PORT", "5432")])
            .with_text(r#"{"db": {"host": "@HOST@", "port": @PORT@}}"#)
            .build()
            .unwrap();
        assert_eq!(store.get("db.host").unwrap().as_str(), Some("db.local"));
        assert_eq!(store.get("db.port").unwrap().as_i64(), Some(5432));
    }

    #[test]
    fn test_undefined_var_fails_build() {
        let result = ConfigStore::builder()
            .with_vars(HashMap::<String, String>::new())
            .with_text(r#"{"host": "@HOST@"}"#)
            .build();
        assert!(matches!(result, Err(ConfigError::UndefinedVariable(name)) if name == "HOST"));
    }

    #[test]
    fn test_text_is_left_alone_without_vars() {
        let store = ConfigStore::builder()
            .with_text(r#"{"contact": "@admin@"}"#)
            .build()
            .unwrap();
        assert_eq!(store.get("contact").unwrap().as_str(), Some("@admin@"));
    }

    #[test]
    fn test_files_by_extension() {
        let json = temp_file(".json", r#"{"monitors": ["cpu"], "plugin": {"class": "a.B"}}"#);
        let toml = temp_file(
            ".toml",
            r#"
            [plugin.kargs]
            path = "@DATA@"
            "#,
        );

        let store = ConfigStore::builder()
            .with_vars([("DATA", "/var/lib/data")])
            .with_file(json.path(), true)
            .with_plugin_file(toml.path(), true)
            .build()
            .unwrap();

        assert_eq!(store.monitors().unwrap().to_json(), json!(["cpu"]));
        assert_eq!(store.plugin_class().unwrap().as_str(), Some("a.B"));
        assert_eq!(
            store.plugin_kargs().unwrap().to_json(),
            json!({"path": "/var/lib/data"})
        );
    }

    #[test]
    fn test_required_file_missing() {
        let result = ConfigStore::builder()
            .with_file("/nonexistent/path/config.json", true)
            .build();
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_optional_files_missing() {
        let store = ConfigStore::builder()
            .with_toml_text("loggers = [\"stdout\"]")
            .with_file("/nonexistent/path/config.json", false)
            .with_plugin_file("/nonexistent/path/plugin.json", false)
            .build()
            .unwrap();
        assert_eq!(store.loggers().unwrap().to_json(), json!(["stdout"]));
    }

    #[test]
    fn test_plugin_parse_error_is_labelled() {
        let result = ConfigStore::builder()
            .with_text("{}")
            .with_plugin_text("{")
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::Parse { what: "plugin configuration", .. })
        ));
    }
}
