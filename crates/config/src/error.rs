//! Error types for configuration operations.

use std::path::PathBuf;

/// Errors that can occur while loading, validating, or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a configuration file.
    #[error("failed to write config file at {path}: {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON5 configuration.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// Failed to serialize configuration to JSON.
    #[error("failed to serialize config: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// Invalid server settings.
    #[error("invalid server settings: {reason}")]
    InvalidServer {
        /// Why the settings were rejected.
        reason: String,
    },

    /// Invalid cache time-to-live.
    #[error("invalid cache ttl: {reason}")]
    InvalidCacheTtl {
        /// Why the value was rejected.
        reason: String,
    },

    /// Border allowance outside the supported range.
    #[error("invalid border_per_column {value}: must be between {min} and {max}")]
    InvalidBorder {
        /// The configured value.
        value: f64,
        /// Smallest accepted value.
        min: f64,
        /// Largest accepted value.
        max: f64,
    },

    /// Unknown log level.
    #[error("invalid log level {0:?}")]
    InvalidLogLevel(String),

    /// Failed to determine the platform config or data directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
