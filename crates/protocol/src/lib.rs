//! Shared protocol types for the sprintboard application.
//!
//! This crate defines the core types used across all sprintboard components,
//! including backlogs, tasks, the daily-work queue, model events, chooser
//! fetch requests, and TUI messages.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`identity`]: Identity hashes and the [`RowModel`] contract
//! - [`backlog`]: Backlog summaries and hierarchy levels
//! - [`task`]: Task identifiers, states, and the `Task` struct
//! - [`daily_work`]: The ranked daily-work queue and rank positions
//! - [`event`]: Listener registries for model and view events
//! - [`fetch`]: Generation-tokened backlog fetch requests and responses
//! - [`message`]: TUI event messages
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! Ranking a task in the daily-work queue:
//!
//! ```
//! use sprintboard_protocol::{DailyWork, RankPosition, Task};
//!
//! let mut work = DailyWork::new(1);
//! work.push(Task::new(10, "Write release notes"));
//! work.push(Task::new(11, "Fix flaky test"));
//!
//! work.rank_under(11, RankPosition::First).unwrap();
//! assert_eq!(work.tasks()[0].id, 11);
//! ```

pub mod backlog;
pub mod daily_work;
pub mod dummy;
pub mod error;
pub mod event;
pub mod fetch;
pub mod identity;
pub mod message;
pub mod task;

// Re-export primary types at crate root for convenience
pub use backlog::{BacklogId, BacklogLevel, BacklogSummary};
pub use daily_work::{Container, DailyWork, DailyWorkViewType, RankPosition, UserId};
pub use error::{ProtocolError, Result};
pub use event::{Delivery, EventBus, EventChannel, ListenerId, ModelEvent};
pub use fetch::{FetchRequest, FetchResponse, FetchToken};
pub use identity::{IdentityHash, RowModel};
pub use message::Message;
pub use task::{Task, TaskClass, TaskId, TaskState, format_effort};
