//! Answers chooser fetch requests through the sub-backlog cache.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use sprintboard_protocol::{BacklogId, BacklogSummary, FetchRequest, FetchResponse};
use tracing::{debug, instrument};

use crate::cache::SubBacklogCache;
use crate::error::Result;
use crate::source::BacklogSource;

/// Resolves [`FetchRequest`]s against a [`BacklogSource`].
///
/// Product lists are always fetched. Sub-backlog lists are served from the
/// cache while fresh. The cache lock is never held across an await, so a
/// lookup can be shared between concurrently spawned fetches.
#[derive(Clone)]
pub struct BacklogLookup {
    source: Arc<dyn BacklogSource>,
    cache: Arc<Mutex<SubBacklogCache>>,
}

impl std::fmt::Debug for BacklogLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BacklogLookup")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl BacklogLookup {
    /// Creates a lookup with an empty cache.
    #[must_use]
    pub fn new(source: impl BacklogSource + 'static, ttl: Duration) -> Self {
        Self {
            source: Arc::new(source),
            cache: Arc::new(Mutex::new(SubBacklogCache::new(ttl))),
        }
    }

    /// Resolves a request, echoing its token in the response.
    ///
    /// Sub-backlogs are returned in parent order; children shared by several
    /// parents appear once per parent.
    ///
    /// # Errors
    ///
    /// Returns the first source error encountered.
    #[instrument(
        skip(self),
        fields(level = ?request.token().level, generation = request.token().generation)
    )]
    pub async fn fulfil(&self, request: &FetchRequest) -> Result<FetchResponse> {
        let backlogs = match request {
            FetchRequest::Products { .. } => self.source.products().await?,
            FetchRequest::SubBacklogs { parents, .. } => {
                let mut backlogs = Vec::new();
                for &parent in parents {
                    backlogs.extend(self.sub_backlogs(parent).await?);
                }
                backlogs
            }
        };
        debug!(count = backlogs.len(), "request fulfilled");
        Ok(FetchResponse::new(request, backlogs))
    }

    /// Returns the children of one parent, from the cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns the source error on a cache miss that fails to fetch.
    pub async fn sub_backlogs(&self, parent: BacklogId) -> Result<Vec<BacklogSummary>> {
        let cached = self.lock_cache().get(parent).map(<[_]>::to_vec);
        if let Some(cached) = cached {
            debug!(parent, "sub-backlog cache hit");
            return Ok(cached);
        }

        let children = self.source.sub_backlogs(parent).await?;
        self.lock_cache().insert(parent, children.clone());
        Ok(children)
    }

    /// Drops the cached children of one parent.
    pub fn invalidate(&self, parent: BacklogId) -> bool {
        self.lock_cache().invalidate(parent)
    }

    /// Drops every cached entry.
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    fn lock_cache(&self) -> MutexGuard<'_, SubBacklogCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use sprintboard_protocol::{BacklogLevel, FetchToken};

    use super::*;
    use crate::error::Error;
    use crate::source::StaticBacklogSource;

    /// Counts sub-backlog calls made to the wrapped source.
    struct Counting {
        inner: StaticBacklogSource,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl BacklogSource for Counting {
        async fn products(&self) -> Result<Vec<BacklogSummary>> {
            self.inner.products().await
        }

        async fn sub_backlogs(&self, parent: BacklogId) -> Result<Vec<BacklogSummary>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.sub_backlogs(parent).await
        }
    }

    struct Failing;

    #[async_trait]
    impl BacklogSource for Failing {
        async fn products(&self) -> Result<Vec<BacklogSummary>> {
            Err(Error::NotConfigured)
        }

        async fn sub_backlogs(&self, _parent: BacklogId) -> Result<Vec<BacklogSummary>> {
            Err(Error::NotConfigured)
        }
    }

    fn counting(ttl: Duration) -> (BacklogLookup, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Counting {
            inner: StaticBacklogSource::demo(),
            calls: Arc::clone(&calls),
        };
        (BacklogLookup::new(source, ttl), calls)
    }

    fn sub_request(parents: Vec<BacklogId>) -> FetchRequest {
        FetchRequest::SubBacklogs {
            token: FetchToken {
                level: BacklogLevel::Project,
                generation: 7,
            },
            parents,
        }
    }

    #[tokio::test]
    async fn sub_backlogs_follow_parent_order() {
        let (lookup, _) = counting(Duration::from_secs(60));
        let response = lookup.fulfil(&sub_request(vec![2, 1])).await.unwrap();

        let ids: Vec<_> = response.backlogs.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![21, 11, 12]);
        assert_eq!(response.token.generation, 7);
    }

    #[tokio::test]
    async fn repeated_lookup_hits_cache() {
        let (lookup, calls) = counting(Duration::from_secs(60));
        lookup.fulfil(&sub_request(vec![1])).await.unwrap();
        lookup.fulfil(&sub_request(vec![1])).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(lookup.invalidate(1));
        lookup.fulfil(&sub_request(vec![1])).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn disabled_cache_always_fetches() {
        let (lookup, calls) = counting(Duration::ZERO);
        lookup.fulfil(&sub_request(vec![1, 2])).await.unwrap();
        lookup.fulfil(&sub_request(vec![1, 2])).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn source_errors_propagate() {
        let lookup = BacklogLookup::new(Failing, Duration::from_secs(60));
        let request = FetchRequest::Products {
            token: FetchToken {
                level: BacklogLevel::Product,
                generation: 1,
            },
        };
        assert!(lookup.fulfil(&request).await.is_err());
    }
}
