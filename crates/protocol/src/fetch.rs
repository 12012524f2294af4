//! Backlog fetch requests exchanged between the chooser and its fetcher.
//!
//! The chooser never performs I/O itself. Each user action that needs data
//! yields a [`FetchRequest`]; the application runs it asynchronously and feeds
//! the [`FetchResponse`] back. Every request carries a [`FetchToken`] naming
//! the list it populates and a generation counter, so a response that was
//! overtaken by a newer request for the same list can be recognised and
//! dropped.

use serde::{Deserialize, Serialize};

use crate::backlog::{BacklogId, BacklogLevel, BacklogSummary};

/// Identifies the list a fetch populates and which request generation it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchToken {
    /// The list the fetched backlogs populate.
    pub level: BacklogLevel,
    /// Request generation for that list.
    pub generation: u64,
}

/// A backlog lookup the chooser needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchRequest {
    /// Fetch every product.
    Products {
        /// Token to echo in the response.
        token: FetchToken,
    },
    /// Fetch the union of the sub-backlogs of the given parents.
    SubBacklogs {
        /// Token to echo in the response.
        token: FetchToken,
        /// Parent backlog ids, in selection order.
        parents: Vec<BacklogId>,
    },
}

impl FetchRequest {
    /// Returns the request token.
    #[must_use]
    pub const fn token(&self) -> FetchToken {
        match self {
            Self::Products { token } | Self::SubBacklogs { token, .. } => *token,
        }
    }
}

/// The result of a [`FetchRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResponse {
    /// Token of the request this answers.
    pub token: FetchToken,
    /// Fetched backlogs, in parent order for sub-backlog lookups.
    pub backlogs: Vec<BacklogSummary>,
}

impl FetchResponse {
    /// Creates a response for a request.
    #[must_use]
    pub fn new(request: &FetchRequest, backlogs: Vec<BacklogSummary>) -> Self {
        Self {
            token: request.token(),
            backlogs,
        }
    }
}
