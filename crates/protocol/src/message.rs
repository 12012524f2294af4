//! TUI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the TUI input handler and the application state.

use serde::{Deserialize, Serialize};

/// Messages that represent user actions in the TUI.
///
/// These messages are produced by the input handler and consumed by
/// the application state to update the UI.
///
/// # Examples
///
/// ```
/// use sprintboard_protocol::Message;
///
/// let msg = Message::NavigateRight;
/// assert!(matches!(msg, Message::NavigateRight));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Move to the previous column or chooser list.
    NavigateLeft,
    /// Move to the next column or chooser list.
    NavigateRight,
    /// Move the cursor up.
    NavigateUp,
    /// Move the cursor down.
    NavigateDown,
    /// Activate the item under the cursor (open a row's actions, toggle an option).
    Select,
    /// Close the topmost panel.
    Back,
    /// Escape: close menu, popup, or clear selection (contextual).
    Escape,
    /// Quit the application.
    Quit,
    /// Reload the table and retry the chooser's product fetch.
    Refresh,
    /// Toggle help overlay.
    ToggleHelp,
    /// Switch focus between the task table and the backlog chooser.
    ToggleFocus,
    /// Sort the task table by the focused header column.
    SortByColumn,
    /// Move the selected task one position up in the queue.
    MoveRowUp,
    /// Move the selected task one position down in the queue.
    MoveRowDown,
    /// Mouse click at coordinates (column, row).
    ClickAt {
        /// Column (x coordinate) of the click.
        column: u16,
        /// Row (y coordinate) of the click.
        row: u16,
    },
}

impl Message {
    /// Returns `true` if this message is a navigation action.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprintboard_protocol::Message;
    ///
    /// assert!(Message::NavigateLeft.is_navigation());
    /// assert!(Message::NavigateUp.is_navigation());
    /// assert!(!Message::Select.is_navigation());
    /// ```
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NavigateLeft | Self::NavigateRight | Self::NavigateUp | Self::NavigateDown
        )
    }

    /// Returns `true` if this message should terminate the application.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprintboard_protocol::Message;
    ///
    /// assert!(Message::Quit.is_terminating());
    /// assert!(!Message::Back.is_terminating());
    /// ```
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if this message reorders the task queue.
    #[must_use]
    pub fn is_reorder(&self) -> bool {
        matches!(self, Self::MoveRowUp | Self::MoveRowDown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_navigation_detection() {
        assert!(Message::NavigateLeft.is_navigation());
        assert!(Message::NavigateRight.is_navigation());
        assert!(Message::NavigateUp.is_navigation());
        assert!(Message::NavigateDown.is_navigation());
        assert!(!Message::Select.is_navigation());
        assert!(!Message::MoveRowUp.is_navigation());
        assert!(!Message::Quit.is_navigation());
    }

    #[test]
    fn message_terminating_detection() {
        assert!(Message::Quit.is_terminating());
        assert!(!Message::Back.is_terminating());
        assert!(!Message::Select.is_terminating());
    }

    #[test]
    fn message_reorder_detection() {
        assert!(Message::MoveRowUp.is_reorder());
        assert!(Message::MoveRowDown.is_reorder());
        assert!(!Message::SortByColumn.is_reorder());
    }

    #[test]
    fn message_json_format() {
        let json = serde_json::to_string(&Message::SortByColumn).expect("serialize");
        assert_eq!(json, r#""sort_by_column""#);

        let click = Message::ClickAt { column: 1, row: 2 };
        let json = serde_json::to_string(&click).expect("serialize");
        let parsed: Message = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, Message::ClickAt { column: 1, row: 2 });
    }
}
