//! Widget components for the sprintboard TUI.
//!
//! This module provides reusable rendering functions for the daily-work
//! screen, organized into focused submodules for each visual component.
//!
//! # Overview
//!
//! The widget system follows a functional rendering approach where each widget
//! is a pure function that renders state to a buffer. This enables easy testing
//! and composition.
//!
//! # Modules
//!
//! - [`table`]: Renders a [`TableView`](crate::table::TableView) with its
//!   caption, header, pinned rows, and action menus
//! - [`vertical`]: Renders the label/value details popup
//! - [`chooser`]: Renders the product, project, and iteration lists
//! - [`status_bar`]: Renders the footer with keybinding hints
//! - [`help`]: Renders the help overlay
//!
//! # Example
//!
//! ```
//! use ratatui::buffer::Buffer;
//! use ratatui::layout::Rect;
//! use sprintboard_config::ChooserSettings;
//! use sprintboard_protocol::dummy::dummy_daily_work;
//! use sprintboard_tui::AppState;
//! use sprintboard_tui::widgets::{self, TableCursor};
//!
//! let state = AppState::new(dummy_daily_work(), &ChooserSettings::default(), 0.4);
//!
//! let area = Rect::new(0, 0, 100, 20);
//! let mut buf = Buffer::empty(area);
//!
//! widgets::render_table(&state.table, &TableCursor::default(), area, &mut buf);
//! ```

pub mod chooser;
pub mod help;
pub mod status_bar;
pub mod table;
pub mod vertical;

// Re-export primary rendering functions for convenience
pub use chooser::render_chooser;
pub use help::render_help_overlay;
pub use status_bar::render_status_bar;
pub use table::{ColumnSpan, TableCursor, column_at, column_spans, render_table, table_inner};
pub use vertical::render_vertical_table;

#[cfg(test)]
mod tests;
