//! Centralized layout measurements for the TUI.
//!
//! Shared row and column counts used by the app frame and the widgets.

/// Height of the title bar in rows.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the status bar in rows.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Width of the backlog chooser pane in columns, borders included.
///
/// The three lists are stacked in it.
pub const CHOOSER_WIDTH: u16 = 30;

/// Height of one chooser list, borders included.
pub const CHOOSER_LIST_HEIGHT: u16 = 8;

/// Minimum terminal height for useful rendering.
///
/// Title bar, status bar, table borders, caption, header, and at least three
/// data rows.
pub const MIN_HEIGHT: u16 = 10;

/// Minimum terminal width for useful rendering.
///
/// The chooser pane plus a task table wide enough for truncated names.
pub const MIN_WIDTH: u16 = 60;

/// Terminal width below which the chooser pane is hidden and the task table
/// takes the whole width.
pub const MIN_WIDTH_WITH_CHOOSER: u16 = MIN_WIDTH + CHOOSER_WIDTH;

/// Percentage of the screen width used by popups (details, help).
pub const POPUP_WIDTH_PERCENT: u16 = 60;

/// Percentage of the screen height used by popups.
pub const POPUP_HEIGHT_PERCENT: u16 = 60;
