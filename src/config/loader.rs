//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the hour
//! computation configuration from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::HoursConfig;

/// Environment variable overriding [`HoursConfig::margin_days`].
pub const MARGIN_DAYS_ENV: &str = "PUNCH_HOURS_MARGIN_DAYS";

/// Environment variable overriding [`HoursConfig::rounding_minutes`].
pub const ROUNDING_MINUTES_ENV: &str = "PUNCH_HOURS_ROUNDING_MINUTES";

const CONFIG_FILE: &str = "hours.yaml";

/// Loads and provides access to the hour computation configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── hours.yaml   # baselines, windows, rounding, margin
/// ```
///
/// # Example
///
/// ```no_run
/// use punch_hours::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?.with_env_overrides()?;
/// println!("Margin: {} days", loader.config().margin_days);
/// # Ok::<(), punch_hours::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: HoursConfig,
}

impl ConfigLoader {
    /// Loads configuration from `<path>/hours.yaml`.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing ([`EngineError::ConfigNotFound`])
    /// - The file contains invalid YAML ([`EngineError::ConfigParseError`])
    /// - The values fail validation ([`EngineError::InvalidConfig`])
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let file_path = path.as_ref().join(CONFIG_FILE);
        let path_str = file_path.display().to_string();

        let content = fs::read_to_string(&file_path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content, path_str)
    }

    /// Parses configuration from an in-memory YAML document.
    ///
    /// # Example
    ///
    /// ```
    /// use punch_hours::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::from_yaml_str("margin_days: 2\n").unwrap();
    /// assert_eq!(loader.config().margin_days, 2);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> EngineResult<Self> {
        Self::parse(yaml, "<inline>".to_string())
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: HoursConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Applies `PUNCH_HOURS_MARGIN_DAYS` and `PUNCH_HOURS_ROUNDING_MINUTES`
    /// from the process environment when they are set.
    pub fn with_env_overrides(self) -> EngineResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides<F>(mut self, lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(margin) = parse_override(&lookup, MARGIN_DAYS_ENV)? {
            self.config.margin_days = margin;
        }
        if let Some(rounding) = parse_override(&lookup, ROUNDING_MINUTES_ENV)? {
            self.config.rounding_minutes = rounding;
        }
        self.config.validate()?;
        Ok(self)
    }

    fn parse(content: &str, path: String) -> EngineResult<Self> {
        let config: HoursConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path,
                message: e.to_string(),
            })?;
        Self::from_config(config)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &HoursConfig {
        &self.config
    }
}

fn parse_override<F>(lookup: &F, key: &str) -> EngineResult<Option<u32>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u32>()
        .map(Some)
        .map_err(|e| EngineError::InvalidConfig {
            field: key.to_string(),
            message: format!("'{}' is not a non-negative integer: {}", trimmed, e),
        })
}
