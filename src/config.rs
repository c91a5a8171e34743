//! Configuration file support for Statline.
//!
//! This module provides functionality to load configuration from TOML files
//! and merge it with host-supplied overrides. Host overrides take precedence
//! over config file values, which take precedence over defaults.
//!
//! Validation happens here, before the checker core runs: the core itself
//! assumes it always receives an already-validated configuration.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file names to search for.
const DEFAULT_CONFIG_FILES: &[&str] = &["Statline.toml", ".statline.toml", "statline.toml"];

/// A value that can be merged with an overriding value of the same type.
pub trait Mergeable: Sized {
    /// Merges this value with another, with `other` taking precedence.
    #[must_use]
    fn merge(&self, other: &Self) -> Self;
}

/// Main configuration structure representing a Statline configuration file.
///
/// Configuration uses a merge strategy where:
/// 1. Host overrides (highest priority)
/// 2. Config file values
/// 3. Default values (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
#[derive(Default)]
pub struct StatlineConfig {
    /// Options for the max-statements-per-line rule.
    #[serde(default)]
    pub max_statements_per_line: MaxStatementsPerLineOptions,
}

impl StatlineConfig {
    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for invalid TOML, unknown fields, or values
    /// of the wrong type (including negative maxima, which fail to parse
    /// into the unsigned option field).
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: StatlineConfig = toml::from_str(content)?;
        Ok(config)
    }
}

impl Mergeable for StatlineConfig {
    fn merge(&self, other: &Self) -> Self {
        Self {
            max_statements_per_line: self
                .max_statements_per_line
                .merge(&other.max_statements_per_line),
        }
    }
}

/// Raw, partially-specified options for the max-statements-per-line rule.
///
/// `None` means "not configured"; resolution applies the default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct MaxStatementsPerLineOptions {
    /// Maximum number of statements allowed on one line. Non-negative;
    /// defaults to 1 when absent.
    pub max: Option<u64>,
}

impl MaxStatementsPerLineOptions {
    /// Resolves the options into a validated configuration, applying the
    /// default of 1 for an absent `max`.
    pub fn resolve(&self) -> MaxStatementsPerLineConfig {
        MaxStatementsPerLineConfig {
            max: self.max.unwrap_or(1) as usize,
        }
    }
}

impl Mergeable for MaxStatementsPerLineOptions {
    fn merge(&self, other: &Self) -> Self {
        Self {
            max: other.max.or(self.max),
        }
    }
}

/// Validated configuration for the max-statements-per-line rule.
///
/// The checker core consumes this record and may assume it is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxStatementsPerLineConfig {
    /// The threshold above which a line's statement count is a violation.
    pub max: usize,
}

impl Default for MaxStatementsPerLineConfig {
    fn default() -> Self {
        MaxStatementsPerLineConfig { max: 1 }
    }
}

/// Load configuration from a specific file path.
///
/// # Errors
///
/// Returns an `IoError` when the file cannot be read and a `ConfigError`
/// when it is not valid TOML or contains unknown fields.
///
/// # Returns
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_config_from_path(path: &Path) -> Result<Option<StatlineConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let config = StatlineConfig::from_toml_str(&content)?;

    Ok(Some(config))
}

/// Discover and load configuration starting from `dir`.
///
/// Searches `dir` and its ancestors for the default config file names:
/// `Statline.toml`, `.statline.toml`, `statline.toml`.
///
/// # Errors
///
/// Propagates read and parse errors from [`load_config_from_path`].
///
/// # Returns
///
/// Returns `Some((path, config))` for the first config file found, or
/// `None` when no ancestor directory holds one.
pub fn discover_and_load_config(dir: &Path) -> Result<Option<(PathBuf, StatlineConfig)>> {
    let mut current_dir = dir.to_path_buf();

    loop {
        for config_name in DEFAULT_CONFIG_FILES {
            let config_path = current_dir.join(config_name);
            if let Some(config) = load_config_from_path(&config_path)? {
                return Ok(Some((config_path, config)));
            }
        }
        if !current_dir.pop() {
            return Ok(None);
        }
    }
}
