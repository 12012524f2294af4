//! Terminal UI for the sprintboard application.
//!
//! This crate provides a Ratatui-based terminal interface for a user's daily
//! work: a sortable, rankable task table, a details popup, and a cascading
//! product, project, and iteration chooser.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`table`]: The dynamic table view, its column widths, rows, sorting, and
//!   the vertical label/value table
//! - [`controller`]: Row controllers for task rows and the commands they emit
//! - [`chooser`]: The backlog chooser state machine
//! - [`app`]: Main application struct and run loop
//! - [`state`]: Application state management
//! - [`widgets`]: Rendering functions
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`event`]: Event handling and key mappings
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use sprintboard_client::{BacklogLookup, StaticBacklogSource};
//! use sprintboard_config::Config;
//! use sprintboard_protocol::dummy::dummy_daily_work;
//! use sprintboard_tui::{App, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let lookup = BacklogLookup::new(StaticBacklogSource::demo(), Duration::from_secs(300));
//!     let mut app = App::new(dummy_daily_work(), &Config::default(), lookup);
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod chooser;
pub mod controller;
pub mod event;
pub mod layout;
pub mod state;
pub mod table;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::App;
pub use state::{AppState, Focus};
