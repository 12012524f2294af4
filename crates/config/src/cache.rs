//! Sub-backlog cache configuration.
//!
//! The backlog chooser caches the sub-backlogs of every parent it looks up.
//! Entries older than the configured time-to-live are fetched again, so
//! backlogs created on the server eventually show up without a restart.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default cache time-to-live (5 minutes).
pub const DEFAULT_CACHE_TTL: u64 = 300;

/// Maximum allowed cache time-to-live (1 day).
pub const MAX_CACHE_TTL: u64 = 86_400;

/// Configuration for the sub-backlog cache.
///
/// A time-to-live of zero disables caching.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use sprintboard_config::CacheConfig;
///
/// let config = CacheConfig::default();
/// assert_eq!(config.ttl(), Duration::from_secs(300));
///
/// let config = CacheConfig::with_ttl(0);
/// assert!(!config.is_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Seconds a cached sub-backlog list stays fresh.
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
}

fn default_ttl() -> u64 {
    DEFAULT_CACHE_TTL
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: DEFAULT_CACHE_TTL,
        }
    }
}

impl CacheConfig {
    /// Creates a cache configuration with the given time-to-live.
    #[must_use]
    pub fn with_ttl(ttl_secs: u64) -> Self {
        Self { ttl_secs }
    }

    /// Returns the time-to-live as a [`Duration`].
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Returns `true` unless caching is disabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.ttl_secs > 0
    }

    /// Validates the cache configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the time-to-live exceeds [`MAX_CACHE_TTL`].
    pub fn validate(&self) -> Result<()> {
        if self.ttl_secs > MAX_CACHE_TTL {
            return Err(ConfigError::InvalidCacheTtl {
                reason: format!(
                    "ttl {} exceeds maximum of {} seconds",
                    self.ttl_secs, MAX_CACHE_TTL
                ),
            });
        }
        Ok(())
    }
}
