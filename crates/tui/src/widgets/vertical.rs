//! Details popup rendering widget.
//!
//! Draws a [`VerticalTableView`] as a centered popup: labels on the left,
//! values on the right, split by the view's percentage widths.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, Widget},
};

use crate::layout::{POPUP_HEIGHT_PERCENT, POPUP_WIDTH_PERCENT};
use crate::table::VerticalTableView;

use super::help::centered_rect;

/// Renders a vertical table as a popup over `area`.
///
/// Nothing is drawn once the model was deleted.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use sprintboard_protocol::Task;
/// use sprintboard_tui::table::{ColumnConfig, VerticalTableView};
/// use sprintboard_tui::widgets::render_vertical_table;
///
/// let columns = vec![Some(ColumnConfig::new("Name").with_value(|t: &Task| t.name.clone()))];
/// let mut details = VerticalTableView::new(Task::new(1, "Deploy"), columns);
/// details.render();
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
/// render_vertical_table(&details, "Task 1", area, &mut buf);
/// ```
pub fn render_vertical_table<M>(
    table: &VerticalTableView<M>,
    title: &str,
    area: Rect,
    buf: &mut Buffer,
) {
    if table.is_removed() {
        return;
    }

    let width = percent_of(area.width, POPUP_WIDTH_PERCENT);
    let rows = u16::try_from(table.rows().len()).unwrap_or(u16::MAX);
    let height = percent_of(area.height, POPUP_HEIGHT_PERCENT).max(rows.saturating_add(3));
    let popup_area = centered_rect(width, height, area);
    Clear.render(popup_area, buf);

    let block = Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(
            Line::from(Span::styled(" Esc close ", Style::default().fg(Color::DarkGray)))
                .right_aligned(),
        )
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup_area);
    block.render(popup_area, buf);

    if table.rows().is_empty() {
        Paragraph::new("No fields").render(inner, buf);
        return;
    }

    let label_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let value_style = Style::default().fg(Color::White);
    let rows = table.rows().iter().map(|row| {
        Row::new(vec![
            Cell::from(Span::styled(row.label.clone(), label_style)),
            Cell::from(Span::styled(row.value.clone(), value_style)),
        ])
    });

    Table::new(
        rows,
        [
            Constraint::Percentage(table.left_width()),
            Constraint::Percentage(table.right_width()),
        ],
    )
    .render(inner, buf);
}

fn percent_of(length: u16, percent: u16) -> u16 {
    let scaled = u32::from(length) * u32::from(percent) / 100;
    u16::try_from(scaled).unwrap_or(u16::MAX)
}
