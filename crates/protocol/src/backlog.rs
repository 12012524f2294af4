//! Backlog types for the cascading backlog chooser.
//!
//! Backlogs form a three-level hierarchy: products contain projects, and
//! projects contain iterations. The server exposes every level as a flat list
//! of `{id, name}` summaries.

use serde::{Deserialize, Serialize};

use crate::identity::{IdentityHash, RowModel};

/// Server-side identifier of a backlog.
///
/// Real backlog ids are strictly positive; non-positive values are reserved
/// for chooser sentinels.
pub type BacklogId = u64;

/// A backlog as returned by the product and sub-backlog endpoints.
///
/// # Examples
///
/// ```
/// use sprintboard_protocol::BacklogSummary;
///
/// let json = r#"{"id": 3, "name": "Website"}"#;
/// let backlog: BacklogSummary = serde_json::from_str(json).unwrap();
/// assert_eq!(backlog, BacklogSummary::new(3, "Website"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BacklogSummary {
    /// Server-side identifier.
    pub id: BacklogId,
    /// Display name.
    pub name: String,
}

impl BacklogSummary {
    /// Creates a backlog summary.
    #[must_use]
    pub fn new(id: BacklogId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl RowModel for BacklogSummary {
    fn identity_hash(&self) -> IdentityHash {
        IdentityHash::of("backlog", self.id)
    }
}

/// A level of the backlog hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacklogLevel {
    /// Top-level products.
    Product,
    /// Projects under a product.
    Project,
    /// Iterations under a project.
    Iteration,
}

impl BacklogLevel {
    /// All levels, top-down.
    pub const ALL: [Self; 3] = [Self::Product, Self::Project, Self::Iteration];

    /// Returns the level whose entries are children of this level's entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprintboard_protocol::BacklogLevel;
    ///
    /// assert_eq!(BacklogLevel::Product.child(), Some(BacklogLevel::Project));
    /// assert_eq!(BacklogLevel::Iteration.child(), None);
    /// ```
    #[must_use]
    pub const fn child(self) -> Option<Self> {
        match self {
            Self::Product => Some(Self::Project),
            Self::Project => Some(Self::Iteration),
            Self::Iteration => None,
        }
    }

    /// Returns the human-readable plural name of the level.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Product => "Products",
            Self::Project => "Projects",
            Self::Iteration => "Iterations",
        }
    }

    /// Returns the form parameter name used when submitting a selection.
    #[must_use]
    pub const fn parameter_name(self) -> &'static str {
        match self {
            Self::Product => "productIds",
            Self::Project => "projectIds",
            Self::Iteration => "iterationIds",
        }
    }

    /// Returns the position of the level in [`BacklogLevel::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Product => 0,
            Self::Project => 1,
            Self::Iteration => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backlog_identity_uses_id_only() {
        let before = BacklogSummary::new(5, "Old name");
        let after = BacklogSummary::new(5, "New name");
        assert_eq!(before.identity_hash(), after.identity_hash());
    }

    #[test]
    fn level_index_matches_all() {
        for (idx, level) in BacklogLevel::ALL.iter().enumerate() {
            assert_eq!(level.index(), idx);
        }
    }

    #[test]
    fn level_parameter_names() {
        assert_eq!(BacklogLevel::Product.parameter_name(), "productIds");
        assert_eq!(BacklogLevel::Project.parameter_name(), "projectIds");
        assert_eq!(BacklogLevel::Iteration.parameter_name(), "iterationIds");
    }

    #[test]
    fn backlog_list_deserializes() {
        let json = r#"[{"id": 1, "name": "A"}, {"id": 2, "name": "B"}]"#;
        let list: Vec<BacklogSummary> = serde_json::from_str(json).expect("deserialize");
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].name, "B");
    }
}
