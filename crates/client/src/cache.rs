//! Time-to-live cache of sub-backlog lists.
//!
//! Entries are keyed by parent backlog id. An entry older than the cache's
//! time-to-live is treated as missing; a zero time-to-live disables caching.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sprintboard_protocol::{BacklogId, BacklogSummary};
use tracing::debug;

/// A cached sub-backlog list with the time it was fetched.
#[derive(Debug, Clone)]
pub struct CachedBacklogs {
    /// The cached children.
    pub backlogs: Vec<BacklogSummary>,
    /// When the children were fetched.
    pub cached_at: DateTime<Utc>,
}

impl CachedBacklogs {
    /// Wraps a freshly fetched list.
    #[must_use]
    pub fn new(backlogs: Vec<BacklogSummary>) -> Self {
        Self {
            backlogs,
            cached_at: Utc::now(),
        }
    }

    /// Returns the age of the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprintboard_client::CachedBacklogs;
    ///
    /// let cached = CachedBacklogs::new(vec![]);
    /// assert!(cached.age().as_secs() < 1);
    /// ```
    #[must_use]
    pub fn age(&self) -> Duration {
        // Clock skew can put cached_at in the future.
        Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    /// Returns whether the entry is older than the given maximum age.
    #[must_use]
    pub fn is_older_than(&self, max_age: Duration) -> bool {
        self.age() > max_age
    }
}

/// Sub-backlog lists keyed by parent id.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use sprintboard_client::SubBacklogCache;
/// use sprintboard_protocol::BacklogSummary;
///
/// let mut cache = SubBacklogCache::new(Duration::from_secs(60));
/// cache.insert(1, vec![BacklogSummary::new(11, "Checkout")]);
/// assert_eq!(cache.get(1).map(|b| b.len()), Some(1));
///
/// cache.invalidate(1);
/// assert!(cache.get(1).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct SubBacklogCache {
    ttl: Duration,
    entries: HashMap<BacklogId, CachedBacklogs>,
}

impl SubBacklogCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Returns the time-to-live.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the fresh children of a parent, if cached.
    #[must_use]
    pub fn get(&self, parent: BacklogId) -> Option<&[BacklogSummary]> {
        let entry = self.entries.get(&parent)?;
        if entry.is_older_than(self.ttl) {
            debug!(parent, age_secs = entry.age().as_secs(), "cache entry expired");
            return None;
        }
        Some(&entry.backlogs)
    }

    /// Stores the children of a parent. Does nothing when caching is
    /// disabled.
    pub fn insert(&mut self, parent: BacklogId, backlogs: Vec<BacklogSummary>) {
        if self.ttl.is_zero() {
            return;
        }
        self.entries.insert(parent, CachedBacklogs::new(backlogs));
    }

    /// Drops the entry of one parent. Returns `true` if it was cached.
    pub fn invalidate(&mut self, parent: BacklogId) -> bool {
        self.entries.remove(&parent).is_some()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of stored entries, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn children() -> Vec<BacklogSummary> {
        vec![BacklogSummary::new(11, "A"), BacklogSummary::new(12, "B")]
    }

    #[test]
    fn fresh_entry_is_returned() {
        let mut cache = SubBacklogCache::new(Duration::from_secs(60));
        cache.insert(1, children());
        assert_eq!(cache.get(1).map(<[_]>::len), Some(2));
        assert!(cache.get(2).is_none());
    }

    #[test]
    fn expired_entry_is_ignored() {
        let mut cache = SubBacklogCache::new(Duration::from_secs(60));
        cache.entries.insert(
            1,
            CachedBacklogs {
                backlogs: children(),
                cached_at: Utc::now() - chrono::Duration::seconds(120),
            },
        );
        assert!(cache.get(1).is_none());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_ttl_disables_caching() {
        let mut cache = SubBacklogCache::new(Duration::ZERO);
        cache.insert(1, children());
        assert!(cache.is_empty());
    }

    #[test]
    fn invalidate_and_clear() {
        let mut cache = SubBacklogCache::new(Duration::from_secs(60));
        cache.insert(1, children());
        cache.insert(2, children());

        assert!(cache.invalidate(1));
        assert!(!cache.invalidate(1));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn future_timestamp_has_zero_age() {
        let cached = CachedBacklogs {
            backlogs: vec![],
            cached_at: Utc::now() + chrono::Duration::seconds(30),
        };
        assert_eq!(cached.age(), Duration::ZERO);
    }
}
