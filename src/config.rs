//! Runtime configuration.
//!
//! Values come from an optional YAML file, then environment variables:
//!
//! | Variable                                  | Field                      |
//! |-------------------------------------------|----------------------------|
//! | `REGISTRY_IDGEN_STORE`                    | `store`                    |
//! | `REGISTRY_IDGEN_RETRIEVE_DEPTH`           | `retrieve_depth`           |
//! | `REGISTRY_IDGEN_PERSIST_ON_WRITE_FAILURE` | `persist_on_write_failure` |
//! | `REGISTRY_IDGEN_LOG`                      | `log_filter`               |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::modifier::ModifierOptions;

/// Environment variable naming the default store file.
pub const ENV_STORE: &str = "REGISTRY_IDGEN_STORE";
/// Environment variable overriding the retrieve depth.
pub const ENV_RETRIEVE_DEPTH: &str = "REGISTRY_IDGEN_RETRIEVE_DEPTH";
/// Environment variable overriding the persist-on-write-failure switch.
pub const ENV_PERSIST_ON_WRITE_FAILURE: &str = "REGISTRY_IDGEN_PERSIST_ON_WRITE_FAILURE";
/// Environment variable overriding the log filter.
pub const ENV_LOG: &str = "REGISTRY_IDGEN_LOG";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// File path.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid YAML for [`ModifierConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// YAML error.
        #[source]
        source: serde_yaml::Error,
    },
    /// An environment variable holds an unusable value.
    #[error("invalid value {value:?} for {var}: expected {expected}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Value found.
        value: String,
        /// Description of accepted values.
        expected: &'static str,
    },
}

/// Configuration for the modifier and the command-line host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModifierConfig {
    /// Depth used when re-retrieving a created object.
    pub retrieve_depth: u32,
    /// Save the retrieved copy even if writing the identifier failed.
    pub persist_on_write_failure: bool,
    /// Default store file for commands that take `--store`.
    pub store: Option<PathBuf>,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ModifierConfig {
    fn default() -> Self {
        let options = ModifierOptions::default();
        Self {
            retrieve_depth: options.retrieve_depth,
            persist_on_write_failure: options.persist_on_write_failure,
            store: None,
            log_filter: "info".to_string(),
        }
    }
}

impl ModifierConfig {
    /// Loads configuration from `path` (if given) and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, or
    /// an environment override is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(|var| std::env::var(var).ok())
    }

    /// Parses a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        serde_yaml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Applies overrides looked up through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] for malformed values.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(store) = lookup(ENV_STORE).filter(|s| !s.is_empty()) {
            self.store = Some(PathBuf::from(store));
        }
        if let Some(value) = lookup(ENV_RETRIEVE_DEPTH) {
            self.retrieve_depth = value
                .trim()
                .parse()
                .ok()
                .filter(|depth| *depth >= 1)
                .ok_or(ConfigError::InvalidEnv {
                    var: ENV_RETRIEVE_DEPTH,
                    value,
                    expected: "a positive integer",
                })?;
        }
        if let Some(value) = lookup(ENV_PERSIST_ON_WRITE_FAILURE) {
            self.persist_on_write_failure = parse_bool(&value).ok_or(ConfigError::InvalidEnv {
                var: ENV_PERSIST_ON_WRITE_FAILURE,
                value,
                expected: "true or false",
            })?;
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|s| !s.is_empty()) {
            self.log_filter = filter;
        }
        Ok(self)
    }

    /// Options handed to the modifier.
    #[must_use]
    pub fn modifier_options(&self) -> ModifierOptions {
        ModifierOptions {
            retrieve_depth: self.retrieve_depth,
            persist_on_write_failure: self.persist_on_write_failure,
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
