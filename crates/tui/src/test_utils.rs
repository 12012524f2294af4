//! Test utilities for the TUI crate.
//!
//! Helpers shared by the widget and app tests.

use ratatui::buffer::Buffer;

/// Converts a ratatui [`Buffer`] to a string representation.
///
/// Each row of the buffer becomes a line of the output, with trailing
/// spaces trimmed so `contains` checks read naturally.
///
/// # Example
///
/// ```ignore
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
///
/// let area = Rect::new(0, 0, 10, 2);
/// let mut buf = Buffer::empty(area);
/// buf.set_string(0, 0, "Hello", ratatui::style::Style::default());
///
/// let output = buffer_to_string(&buf);
/// assert!(output.contains("Hello"));
/// ```
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            if let Some(cell) = buf.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        let trimmed = result.trim_end_matches(' ');
        result.truncate(trimmed.len());
        result.push('\n');
    }
    result
}

/// Returns the line of the rendered buffer that contains `needle`.
#[must_use]
pub(crate) fn line_containing(buf: &Buffer, needle: &str) -> Option<String> {
    buffer_to_string(buf)
        .lines()
        .find(|line| line.contains(needle))
        .map(str::to_string)
}
