//! Backlog server client for sprintboard.
//!
//! This crate fetches the product → project → iteration hierarchy the backlog
//! chooser walks, and caches sub-backlog lists so re-opening a branch of the
//! hierarchy does not hit the server again.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - [`BacklogSource`]: The async seam between the chooser and a backlog store
//! - [`HttpBacklogSource`]: A source backed by the tracker's JSON endpoints
//! - [`StaticBacklogSource`]: An in-memory source for demos and tests
//! - [`SubBacklogCache`]: Time-to-live cache of sub-backlog lists
//! - [`BacklogLookup`]: Answers chooser [`FetchRequest`]s through the cache
//! - [`Error`]: Error types for fetch operations
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use sprintboard_client::{BacklogLookup, StaticBacklogSource};
//! use sprintboard_protocol::{BacklogLevel, FetchRequest, FetchToken};
//!
//! # async fn example() -> sprintboard_client::Result<()> {
//! let lookup = BacklogLookup::new(StaticBacklogSource::demo(), Duration::from_secs(300));
//! let request = FetchRequest::Products {
//!     token: FetchToken { level: BacklogLevel::Product, generation: 1 },
//! };
//! let response = lookup.fulfil(&request).await?;
//! assert_eq!(response.backlogs.len(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! [`FetchRequest`]: sprintboard_protocol::FetchRequest

pub mod cache;
pub mod error;
pub mod http;
pub mod lookup;
pub mod source;

pub use cache::{CachedBacklogs, SubBacklogCache};
pub use error::{Error, Result};
pub use http::HttpBacklogSource;
pub use lookup::BacklogLookup;
pub use source::{BacklogSource, StaticBacklogSource};
