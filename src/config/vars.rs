//! `@name@` placeholder substitution over raw configuration text.
//!
//! Substitution runs before parsing, so placeholders may stand in for any
//! fragment of the document. There is no escaping and no nesting.

use std::collections::HashMap;
use std::hash::BuildHasher;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::ConfigError;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("@(.*?)@").expect("placeholder pattern is valid"));

/// Replaces every `@name@` in `conf` with `vars[name]`.
///
/// All placeholders must be defined: the first undefined one is logged and
/// returned as [`ConfigError::UndefinedVariable`], and no partially
/// substituted text is produced.
pub fn set_conf_vars<S: BuildHasher>(
    conf: &str,
    vars: &HashMap<String, String, S>,
) -> Result<String, ConfigError> {
    if let Some(name) = list_conf_vars(conf)
        .into_iter()
        .find(|name| !vars.contains_key(name))
    {
        tracing::error!(variable = %name, "undefined variable @{name}@ in configuration");
        return Err(ConfigError::UndefinedVariable(name));
    }

    let substituted = PLACEHOLDER.replace_all(conf, |caps: &Captures<'_>| {
        vars.get(&caps[1]).map_or("", String::as_str)
    });
    Ok(substituted.into_owned())
}

/// Lists placeholder names in order of appearance, duplicates included.
pub fn list_conf_vars(conf: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(conf)
        .map(|caps| caps[1].to_string())
        .collect()
}
