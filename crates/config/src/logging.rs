//! Log output settings.
//!
//! The terminal belongs to the UI while the application runs, so log events
//! go to a file. `RUST_LOG` overrides the configured level.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::persistence::default_log_file;

/// Level used when none is configured.
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Where and how verbosely to log.
///
/// # Examples
///
/// ```
/// use sprintboard_config::LogConfig;
///
/// let log = LogConfig::default();
/// assert_eq!(log.level, "info");
/// assert!(log.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive, such as `"debug"` or `"sprintboard=trace"`.
    #[serde(default = "default_level")]
    pub level: String,

    /// Log file; defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

impl LogConfig {
    /// Returns the configured log file, or the platform default.
    ///
    /// # Errors
    ///
    /// Returns an error if no file is configured and the platform data
    /// directory cannot be determined.
    pub fn file_path(&self) -> Result<PathBuf> {
        match &self.file {
            Some(path) => Ok(path.clone()),
            None => default_log_file(),
        }
    }

    /// Validates the log level.
    ///
    /// Plain levels are checked against the known names. Directives with a
    /// target (`crate=level`) are accepted as long as every level part is
    /// known.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogLevel`] for an unknown level.
    pub fn validate(&self) -> Result<()> {
        let valid = !self.level.trim().is_empty()
            && self.level.split(',').all(|directive| {
                let level = directive.rsplit('=').next().unwrap_or_default();
                LEVELS.contains(&level.trim().to_ascii_lowercase().as_str())
            });
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidLogLevel(self.level.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_levels_and_directives() {
        for level in ["debug", "WARN", "sprintboard_tui=trace", "info,reqwest=warn"] {
            let log = LogConfig {
                level: level.to_string(),
                file: None,
            };
            assert!(log.validate().is_ok(), "{level} should be valid");
        }
    }

    #[test]
    fn rejects_unknown_level() {
        let log = LogConfig {
            level: "loud".to_string(),
            file: None,
        };
        assert!(matches!(log.validate(), Err(ConfigError::InvalidLogLevel(_))));
    }

    #[test]
    fn configured_file_wins() {
        let log = LogConfig {
            file: Some(PathBuf::from("/tmp/board.log")),
            ..LogConfig::default()
        };
        assert_eq!(log.file_path().unwrap(), PathBuf::from("/tmp/board.log"));
    }
}
