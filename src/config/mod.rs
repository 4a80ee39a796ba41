//! Configuration loading and management.

mod builder;
mod error;
mod file;
mod merge;
mod parse;
mod store;
mod tree;
mod value;
mod vars;

pub use builder::ConfigStoreBuilder;
pub use error::ConfigError;
pub use merge::merge;
pub use parse::{parse_json, parse_toml, Format};
pub use store::ConfigStore;
pub use tree::{DottedTree, DELIMITER};
pub use value::Value;
pub use vars::{list_conf_vars, set_conf_vars};
