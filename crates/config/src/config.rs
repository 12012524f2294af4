//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates every
//! section of the sprintboard configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{ChooserSettings, DailyWorkSettings, TableSettings};
use crate::cache::CacheConfig;
use crate::error::Result;
use crate::logging::LogConfig;
use crate::persistence::{find_config_file, read_config_file, write_config_file};
use crate::server::ServerConfig;

/// The main configuration struct for the sprintboard application.
///
/// Every section is optional in the file and falls back to its defaults.
///
/// # Examples
///
/// ```
/// use sprintboard_config::{CacheConfig, Config, ServerConfig};
///
/// let config = Config::default();
/// assert!(config.server.base_url.is_none());
///
/// let config = Config {
///     server: ServerConfig::with_base_url("https://tracker.example.com"),
///     cache: CacheConfig::with_ttl(60),
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Backlog server connection.
    #[serde(default)]
    pub server: ServerConfig,

    /// Sub-backlog cache.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Table layout.
    #[serde(default)]
    pub table: TableSettings,

    /// Initial backlog chooser selection.
    #[serde(default)]
    pub chooser: ChooserSettings,

    /// Daily-work view.
    #[serde(default)]
    pub daily_work: DailyWorkSettings,

    /// Log output.
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Creates a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the first file found in the default
    /// locations, or returns the defaults when there is none.
    ///
    /// See [`crate::persistence`] for the search order.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be read,
    /// parsed, or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sprintboard_config::Config;
    ///
    /// # fn example() -> sprintboard_config::Result<()> {
    /// let config = Config::load()?;
    /// println!("Cache ttl: {}s", config.cache.ttl_secs);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns the first validation error encountered.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprintboard_config::{Config, TableSettings};
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.table = TableSettings { border_per_column: 12.0 };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.cache.validate()?;
        self.table.validate()?;
        self.log.validate()?;
        Ok(())
    }

    /// Returns `true` when a backlog server is configured; otherwise the
    /// application runs on demo data.
    #[must_use]
    pub fn has_server(&self) -> bool {
        self.server.base_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use sprintboard_protocol::DailyWorkViewType;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::new();
        assert!(!config.has_server());
        assert_eq!(config.cache, CacheConfig::default());
        assert!(config.chooser.selected_products.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn validate_reports_cache_error() {
        let config = Config {
            cache: CacheConfig::with_ttl(u64::MAX),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCacheTtl { .. })
        ));
    }

    #[test]
    fn load_from_json5_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sprintboard.json5");
        std::fs::write(
            &path,
            r#"
            {
                server: { base_url: "https://tracker.example.com", timeout_secs: 5 },
                cache: { ttl_secs: 30 },
                chooser: { selected_products: [1], selected_projects: [11, 12] },
                daily_work: { view_type: "my_work" },
            }
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.has_server());
        assert_eq!(config.server.timeout_secs, 5);
        assert_eq!(config.cache.ttl_secs, 30);
        assert_eq!(config.chooser.selected_projects, vec![11, 12]);
        assert_eq!(config.daily_work.view_type, DailyWorkViewType::MyWork);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn load_from_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sprintboard.json");
        std::fs::write(&path, r#"{"table": {"border_per_column": -1}}"#).unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidBorder { .. })
        ));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut original = Config::default();
        original.chooser.selected_iterations = vec![111];
        original.table.border_per_column = 1.0;

        original.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), original);
    }

    #[test]
    fn unset_base_url_is_not_serialized() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(!json.contains("base_url"));
    }
}
