//! Identity hashes for models rendered as table rows.
//!
//! A table reconciles its rows against a freshly fetched model sequence by
//! comparing identity hashes: two models with the same identity hash are the
//! same entity, even when their other fields changed between fetches.

use std::hash::{DefaultHasher, Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A stable value identifying one entity across fetch and render cycles.
///
/// # Examples
///
/// ```
/// use sprintboard_protocol::IdentityHash;
///
/// assert_eq!(IdentityHash::of("task", 7), IdentityHash::of("task", 7));
/// assert_ne!(IdentityHash::of("task", 7), IdentityHash::of("backlog", 7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdentityHash(u64);

impl IdentityHash {
    /// Derives the identity hash of an entity from its kind and numeric id.
    ///
    /// The kind keeps entities of different types with the same id apart.
    #[must_use]
    pub fn of(kind: &str, id: u64) -> Self {
        let mut hasher = DefaultHasher::new();
        kind.hash(&mut hasher);
        id.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Wraps a raw hash value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw hash value.
    #[must_use]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

/// A domain object that can back a table row.
pub trait RowModel {
    /// Returns the identity hash used to match this model across renders.
    fn identity_hash(&self) -> IdentityHash;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_deterministic() {
        let first = IdentityHash::of("task", 42);
        let second = IdentityHash::of("task", 42);
        assert_eq!(first, second);
    }

    #[test]
    fn identity_separates_ids_and_kinds() {
        assert_ne!(IdentityHash::of("task", 1), IdentityHash::of("task", 2));
        assert_ne!(IdentityHash::of("task", 1), IdentityHash::of("story", 1));
    }

    #[test]
    fn raw_roundtrip() {
        let hash = IdentityHash::from_raw(99);
        assert_eq!(hash.as_raw(), 99);
    }
}
