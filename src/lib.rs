pub mod config;

pub use config::{
    list_conf_vars, merge, set_conf_vars, ConfigError, ConfigStore, ConfigStoreBuilder,
    DottedTree, Format, Value,
};
