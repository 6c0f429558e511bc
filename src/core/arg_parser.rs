// src/core/arg_parser.rs

use crate::constants::BUILTIN_PREFIX;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while classifying raw command-line tokens.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgError {
    /// A flag without `=value`.
    #[error("Argument '{0}' has no value (expected '-key=value').")]
    MissingValue(String),
    /// A flag such as `-=value`.
    #[error("Argument '{0}' has an empty key.")]
    EmptyKey(String),
}

/// Parameter values supplied up front with `-key=value`.
///
/// Keys are lower-cased so they line up with derived shortcuts and names.
/// An empty value (`-env=`) counts as not supplied, so the parameter is
/// still prompted for. The session only ever reads from this map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    values: HashMap<String, String>,
}

impl CliArgs {
    /// Looks up a value by key (case-insensitive).
    pub fn get(&self, key: &str) -> Option<&str> {
        if key.is_empty() {
            return None;
        }
        self.values
            .get(&key.to_lowercase())
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Number of supplied values.
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CliArgs {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into().to_lowercase(), v.into()))
                .collect(),
        }
    }
}

/// What the user asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `clide @name [args...]`
    Builtin {
        /// Builtin name without the `@`.
        name: String,
        /// Everything after the builtin token, untouched.
        args: Vec<String>,
    },
    /// `clide [steps...] [-key=value...]`
    Session {
        /// Lower-cased path steps, in order.
        steps: Vec<String>,
        /// Pre-supplied parameter values.
        cli_args: CliArgs,
    },
}

/// Classifies the raw arguments.
///
/// # Logic:
/// - A first token starting with `@` selects a builtin; the rest is passed on.
/// - Any token starting with `-` must be `-key=value` (or `--key=value`).
/// - Everything else is a path step.
pub fn parse_invocation(raw: &[String]) -> Result<Invocation, ArgError> {
    if let Some(first) = raw.first() {
        if let Some(name) = first.strip_prefix(BUILTIN_PREFIX) {
            return Ok(Invocation::Builtin {
                name: name.to_lowercase(),
                args: raw.iter().skip(1).cloned().collect(),
            });
        }
    }

    let mut steps = Vec::new();
    let mut values = HashMap::new();

    for token in raw {
        if let Some(flag) = token.strip_prefix('-') {
            let flag = flag.strip_prefix('-').unwrap_or(flag);
            let (key, value) = flag
                .split_once('=')
                .ok_or_else(|| ArgError::MissingValue(token.clone()))?;
            if key.is_empty() {
                return Err(ArgError::EmptyKey(token.clone()));
            }
            values.insert(key.to_lowercase(), value.to_string());
        } else {
            steps.push(token.to_lowercase());
        }
    }

    let cli_args = CliArgs { values };
    log::debug!("Parsed steps {:?} with {} preset value(s)", steps, cli_args.len());
    Ok(Invocation::Session { steps, cli_args })
}
