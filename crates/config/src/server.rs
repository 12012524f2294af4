//! Backlog server connection settings.
//!
//! When no base URL is configured, the application runs against built-in demo
//! data instead of a server.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default path of the product list endpoint.
pub const DEFAULT_PRODUCTS_PATH: &str = "getProductJSON.action";

/// Default path of the sub-backlog endpoint.
pub const DEFAULT_SUB_BACKLOGS_PATH: &str = "ajax/retrieveSubBacklogs.action";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the backlog server.
///
/// # Examples
///
/// ```
/// use sprintboard_config::ServerConfig;
///
/// let server = ServerConfig::with_base_url("https://tracker.example.com/");
/// assert_eq!(
///     server.products_url().as_deref(),
///     Some("https://tracker.example.com/getProductJSON.action")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the server; `None` selects the demo data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Path of the product list endpoint, relative to the base URL.
    #[serde(default = "default_products_path")]
    pub products_path: String,

    /// Path of the sub-backlog endpoint, relative to the base URL.
    #[serde(default = "default_sub_backlogs_path")]
    pub sub_backlogs_path: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_products_path() -> String {
    DEFAULT_PRODUCTS_PATH.to_string()
}

fn default_sub_backlogs_path() -> String {
    DEFAULT_SUB_BACKLOGS_PATH.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            products_path: default_products_path(),
            sub_backlogs_path: default_sub_backlogs_path(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Creates settings for the given base URL with default endpoints.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            ..Self::default()
        }
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the full product list URL, if a server is configured.
    #[must_use]
    pub fn products_url(&self) -> Option<String> {
        self.endpoint(&self.products_path)
    }

    /// Returns the full sub-backlog URL, if a server is configured.
    #[must_use]
    pub fn sub_backlogs_url(&self) -> Option<String> {
        self.endpoint(&self.sub_backlogs_path)
    }

    /// Validates the server settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an `http`/`https` URL or the
    /// timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base_url
            && !(base_url.starts_with("http://") || base_url.starts_with("https://"))
        {
            return Err(ConfigError::InvalidServer {
                reason: format!("base URL {base_url:?} must start with http:// or https://"),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidServer {
                reason: "timeout must be at least one second".to_string(),
            });
        }
        Ok(())
    }

    fn endpoint(&self, path: &str) -> Option<String> {
        let base = self.base_url.as_deref()?;
        Some(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_server() {
        let server = ServerConfig::default();
        assert!(server.base_url.is_none());
        assert!(server.products_url().is_none());
        assert!(server.validate().is_ok());
    }

    #[test]
    fn endpoint_joins_slashes() {
        let mut server = ServerConfig::with_base_url("http://localhost:8080/tracker");
        server.sub_backlogs_path = "/ajax/subs.action".to_string();
        assert_eq!(
            server.sub_backlogs_url().as_deref(),
            Some("http://localhost:8080/tracker/ajax/subs.action")
        );
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let server = ServerConfig::with_base_url("ftp://tracker");
        assert!(server.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let server = ServerConfig {
            timeout_secs: 0,
            ..ServerConfig::default()
        };
        assert!(server.validate().is_err());
    }
}
