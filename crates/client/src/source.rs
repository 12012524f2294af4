//! The seam between backlog lookups and wherever backlogs are stored.

use std::collections::HashMap;

use async_trait::async_trait;
use sprintboard_protocol::dummy::{dummy_products, dummy_sub_backlogs};
use sprintboard_protocol::{BacklogId, BacklogSummary};

use crate::error::Result;

/// A store of the product → project → iteration hierarchy.
#[async_trait]
pub trait BacklogSource: Send + Sync {
    /// Returns every product.
    async fn products(&self) -> Result<Vec<BacklogSummary>>;

    /// Returns the direct children of a backlog. Unknown parents have none.
    async fn sub_backlogs(&self, parent: BacklogId) -> Result<Vec<BacklogSummary>>;
}

/// An in-memory backlog hierarchy.
///
/// # Examples
///
/// ```
/// use sprintboard_client::{BacklogSource, StaticBacklogSource};
/// use sprintboard_protocol::BacklogSummary;
///
/// # async fn example() -> sprintboard_client::Result<()> {
/// let source = StaticBacklogSource::new(vec![BacklogSummary::new(1, "Web")])
///     .with_children(1, vec![BacklogSummary::new(10, "Checkout")]);
/// assert_eq!(source.sub_backlogs(1).await?.len(), 1);
/// assert!(source.sub_backlogs(10).await?.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticBacklogSource {
    products: Vec<BacklogSummary>,
    children: HashMap<BacklogId, Vec<BacklogSummary>>,
}

impl StaticBacklogSource {
    /// Creates a source with the given products and no sub-backlogs.
    #[must_use]
    pub fn new(products: Vec<BacklogSummary>) -> Self {
        Self {
            products,
            children: HashMap::new(),
        }
    }

    /// Creates a source holding the demo hierarchy.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            products: dummy_products(),
            children: dummy_sub_backlogs().into_iter().collect(),
        }
    }

    /// Sets the children of a backlog.
    #[must_use]
    pub fn with_children(mut self, parent: BacklogId, children: Vec<BacklogSummary>) -> Self {
        self.children.insert(parent, children);
        self
    }
}

#[async_trait]
impl BacklogSource for StaticBacklogSource {
    async fn products(&self) -> Result<Vec<BacklogSummary>> {
        Ok(self.products.clone())
    }

    async fn sub_backlogs(&self, parent: BacklogId) -> Result<Vec<BacklogSummary>> {
        Ok(self.children.get(&parent).cloned().unwrap_or_default())
    }
}
