use std::path::Path;

use super::tree::DottedTree;
use super::ConfigError;

/// Text format of a configuration document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Json,
    Toml,
}

impl Format {
    /// Picks the format from a file extension; anything but `.toml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Json,
        }
    }

    /// Parses `text` into a tree. `what` names the document in errors.
    pub fn parse(self, text: &str, what: &'static str) -> Result<DottedTree, ConfigError> {
        match self {
            Format::Json => parse_json(text, what),
            Format::Toml => parse_toml(text, what),
        }
    }
}

/// Parses a JSON document whose top level is an object.
pub fn parse_json(text: &str, what: &'static str) -> Result<DottedTree, ConfigError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|source| ConfigError::Parse { what, source })?;
    tracing::debug!(what, "parsed JSON document");

    match value {
        serde_json::Value::Object(map) => DottedTree::try_from(map),
        _ => Err(ConfigError::NotAnObject { what }),
    }
}

/// Parses a TOML document. Non-finite floats are rejected.
pub fn parse_toml(text: &str, what: &'static str) -> Result<DottedTree, ConfigError> {
    let table: toml::Table =
        toml::from_str(text).map_err(|source| ConfigError::TomlParse { what, source })?;
    tracing::debug!(what, "parsed TOML document");

    DottedTree::try_from(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_object() {
        let tree = parse_json(r#"{"a": {"b": [1, 2]}, "c": "d"}"#, "configuration").unwrap();
        assert_eq!(tree.get("a.b").unwrap().as_array().unwrap().len(), 2);
        assert_eq!(tree.get("c").unwrap().as_str(), Some("d"));
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_json("{\"a\": ", "configuration").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { what: "configuration", .. }));
        assert!(err.to_string().starts_with("unable to parse configuration: "));
    }

    #[test]
    fn test_parse_non_object_json() {
        let err = parse_json("[1, 2]", "plugin configuration").unwrap_err();
        assert!(matches!(err, ConfigError::NotAnObject { what: "plugin configuration" }));
    }

    #[test]
    fn test_parse_toml() {
        let tree = parse_toml(
            r#"
            [plugin]
            class = "demo.Plugin"
            [plugin.kargs]
            retries = 3
            "#,
            "configuration",
        )
        .unwrap();
        assert_eq!(tree.get("plugin.class").unwrap().as_str(), Some("demo.Plugin"));
        assert_eq!(tree.get("plugin.kargs.retries").unwrap().as_i64(), Some(3));
    }

    #[test]
    fn test_parse_malformed_toml() {
        let err = parse_toml("key = ", "configuration").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse { .. }));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("conf/app.toml")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("conf/app.TOML")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("conf/app.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("conf/app")), Format::Json);
    }
}
