//! Status bar rendering widget.
//!
//! The footer line: keybinding hints on the left, and on the right either
//! the latest status message or the tooltip of the focused column header.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Hints shown while the task table has focus.
pub const TABLE_HINTS: &[(&str, &str)] = &[
    ("↑↓", "Move"),
    ("Enter", "Actions"),
    ("s", "Sort"),
    ("Tab", "Backlogs"),
    ("?", "Help"),
    ("Ctrl+C", "Quit"),
];

/// Hints shown while the backlog chooser has focus.
pub const CHOOSER_HINTS: &[(&str, &str)] = &[
    ("↑↓", "Move"),
    ("←→", "List"),
    ("Space", "Toggle"),
    ("Tab", "Tasks"),
    ("r", "Reload"),
    ("Ctrl+C", "Quit"),
];

/// Hints shown while the details popup is open.
pub const DETAILS_HINTS: &[(&str, &str)] = &[("Esc", "Close"), ("Ctrl+C", "Quit")];

/// Renders the status bar with keybinding hints.
///
/// A status message takes precedence over the tooltip on the right side.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use sprintboard_tui::widgets::status_bar::{TABLE_HINTS, render_status_bar};
///
/// let area = Rect::new(0, 0, 80, 1);
/// let mut buf = Buffer::empty(area);
///
/// render_status_bar(TABLE_HINTS, Some("Task removed"), None, area, &mut buf);
/// ```
pub fn render_status_bar(
    hints: &[(&str, &str)],
    message: Option<&str>,
    tooltip: Option<&str>,
    area: Rect,
    buf: &mut Buffer,
) {
    let key_style = Style::default().fg(Color::Yellow);
    let text_style = Style::default().fg(Color::White);

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, text) in hints {
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(format!(" {text}  "), text_style));
    }
    Paragraph::new(Line::from(spans)).render(area, buf);

    let right = match (message, tooltip) {
        (Some(message), _) => Some(Span::styled(
            format!(" {message} "),
            Style::default().fg(Color::LightGreen),
        )),
        (None, Some(tooltip)) => Some(Span::styled(
            format!(" {tooltip} "),
            Style::default().fg(Color::DarkGray),
        )),
        (None, None) => None,
    };
    if let Some(right) = right {
        Paragraph::new(Line::from(right).right_aligned()).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::buffer_to_string;

    fn draw(message: Option<&str>, tooltip: Option<&str>) -> String {
        let area = Rect::new(0, 0, 120, 1);
        let mut buf = Buffer::empty(area);
        render_status_bar(TABLE_HINTS, message, tooltip, area, &mut buf);
        buffer_to_string(&buf)
    }

    #[test]
    fn shows_hints() {
        let content = draw(None, None);
        assert!(content.contains("Enter Actions"));
        assert!(content.contains("Ctrl+C Quit"));
    }

    #[test]
    fn message_wins_over_tooltip() {
        let content = draw(Some("Task removed"), Some("Effort left"));
        assert!(content.contains("Task removed"));
        assert!(!content.contains("Effort left"));

        let content = draw(None, Some("Effort left"));
        assert!(content.contains("Effort left"));
    }
}
