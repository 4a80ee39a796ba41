use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("unable to parse {what}: {source}")]
    Parse {
        what: &'static str,
        source: serde_json::Error,
    },

    #[error("unable to parse {what}: {source}")]
    TomlParse {
        what: &'static str,
        source: toml::de::Error,
    },

    #[error("unable to parse {what}: top-level value is not an object")]
    NotAnObject { what: &'static str },

    #[error("can not {action} \"{rest}\" in \"{key}\" ({found})")]
    PathConflict {
        action: &'static str,
        rest: String,
        key: String,
        found: String,
    },

    #[error("number is not finite: {0}")]
    NonFiniteNumber(f64),

    #[error("unsupported value for '{key}': {value}")]
    UnsupportedValue { key: String, value: String },

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("{0}")]
    MissingSection(&'static str),

    #[error("undefined variable @{0}@ in configuration")]
    UndefinedVariable(String),

    #[error("required config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] serde_json::Error),
}
