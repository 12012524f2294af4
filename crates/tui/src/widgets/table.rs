//! Task table rendering widget.
//!
//! Draws a [`TableView`] into a buffer: the caption in the block title, the
//! header line, then the top, middle, and bottom rows. Column positions come
//! from the percentage widths computed by the view, so the header, the rows,
//! and mouse hit-testing ([`column_at`]) always agree.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use sprintboard_protocol::RowModel;

use crate::table::{Caption, ColumnConfig, Row, RowHighlight, TableView};

/// Text shown instead of the header when the table has no rows.
const EMPTY_TEXT: &str = "Nothing to show";

/// Prefix of action menu entries.
const MENU_MARKER: &str = "  ▸ ";

/// What the user is pointing at in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableCursor {
    /// Selected data row.
    pub selected_row: Option<usize>,
    /// Focused header column.
    pub header_column: Option<usize>,
    /// Whether the table has keyboard focus.
    pub focused: bool,
}

/// Horizontal extent of a drawn column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    /// Index of the column in the configuration.
    pub index: usize,
    /// First cell, absolute.
    pub x: u16,
    /// Width in cells.
    pub width: u16,
}

impl ColumnSpan {
    fn contains(&self, x: u16) -> bool {
        x >= self.x && x < self.x + self.width
    }
}

/// Lays out the columns drawn on a row line within `area`.
///
/// Full-width columns and empty slots take no room on the row line.
#[must_use]
pub fn column_spans<M>(
    columns: &[Option<ColumnConfig<M>>],
    border_per_column: f64,
    area: Rect,
) -> Vec<ColumnSpan> {
    let total = f64::from(area.width);
    let to_cells = |percent: f64| (percent * total / 100.0).floor().clamp(0.0, total) as u16;

    let mut spans = Vec::new();
    let mut start = 0.0;
    for (index, column) in columns.iter().enumerate() {
        let Some(column) = column else { continue };
        if column.is_full_width() {
            continue;
        }
        let width = column.width().unwrap_or(0.0);
        let (from, to) = (to_cells(start), to_cells(start + width));
        spans.push(ColumnSpan {
            index,
            x: area.x + from,
            width: to.saturating_sub(from),
        });
        start += width + border_per_column;
    }
    spans
}

/// Returns the area inside the table's border.
#[must_use]
pub fn table_inner(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(area)
}

/// Returns the column whose header is at `(x, y)`, for a table drawn into
/// `area`.
///
/// # Examples
///
/// ```
/// use ratatui::layout::Rect;
/// use sprintboard_protocol::{DailyWork, Task};
/// use sprintboard_tui::table::{ColumnConfig, StaticRow, TableConfig, TableView};
/// use sprintboard_tui::widgets::column_at;
///
/// let config: TableConfig<DailyWork, Task, ()> = TableConfig::new(|_| Box::new(StaticRow))
///     .with_column(ColumnConfig::new("Name").with_min_width(10.0))
///     .with_column(ColumnConfig::new("State").with_min_width(10.0))
///     .with_data_source(|work: &DailyWork| work.tasks().to_vec());
/// let mut work = DailyWork::new(1);
/// work.push(Task::new(1, "Deploy"));
/// let mut table = TableView::new(config, work);
/// table.render();
///
/// let area = Rect::new(0, 0, 102, 10);
/// assert_eq!(column_at(&table, area, 5, 1), Some(0));
/// assert_eq!(column_at(&table, area, 60, 1), Some(1));
/// assert_eq!(column_at(&table, area, 5, 4), None);
/// ```
#[must_use]
pub fn column_at<P, M, C>(table: &TableView<P, M, C>, area: Rect, x: u16, y: u16) -> Option<usize>
where
    M: RowModel + Clone,
{
    if !table.is_header_visible() {
        return None;
    }
    let inner = table_inner(area);
    if y != inner.y || inner.height == 0 {
        return None;
    }
    column_spans(table.config().columns(), table.layout().border_per_column, inner)
        .into_iter()
        .find(|span| span.contains(x))
        .map(|span| span.index)
}

/// Renders a table view.
///
/// The selected data row is drawn reversed while the table is focused, and
/// its action menu, when open, is listed under it. Rows a controller marks
/// [`RowHighlight::NextAssigned`] are tinted. When the rows do not fit, the
/// body scrolls to keep the selected row visible.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use sprintboard_protocol::{DailyWork, Task};
/// use sprintboard_tui::table::{Caption, ColumnConfig, StaticRow, TableConfig, TableView};
/// use sprintboard_tui::widgets::{TableCursor, render_table};
///
/// let config: TableConfig<DailyWork, Task, ()> = TableConfig::new(|_| Box::new(StaticRow))
///     .with_caption(Caption::new("Daily work"))
///     .with_column(ColumnConfig::new("Name").with_value(|t: &Task| t.name.clone()))
///     .with_data_source(|work: &DailyWork| work.tasks().to_vec());
/// let mut work = DailyWork::new(1);
/// work.push(Task::new(1, "Deploy"));
/// let mut table = TableView::new(config, work);
/// table.render();
///
/// let area = Rect::new(0, 0, 40, 6);
/// let mut buf = Buffer::empty(area);
/// render_table(&table, &TableCursor::default(), area, &mut buf);
/// ```
pub fn render_table<P, M, C>(
    table: &TableView<P, M, C>,
    cursor: &TableCursor,
    area: Rect,
    buf: &mut Buffer,
) where
    M: RowModel + Clone,
{
    let block = table_block(table.config().caption(), cursor.focused);
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if !table.is_header_visible() {
        Paragraph::new(EMPTY_TEXT)
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
            .alignment(Alignment::Center)
            .render(inner, buf);
        return;
    }

    let config = table.config();
    let spans = column_spans(config.columns(), table.layout().border_per_column, inner);
    render_header(table, &spans, cursor, Rect { height: 1, ..inner }, buf);

    let body = Rect {
        y: inner.y + 1,
        height: inner.height - 1,
        ..inner
    };
    let (lines, selected_line) = body_lines(table, cursor);
    let offset = selected_line
        .map_or(0, |line| (line + 1).saturating_sub(usize::from(body.height)));

    for (row, line) in (body.y..body.bottom()).zip(lines.iter().skip(offset)) {
        draw_line(line, &spans, body.x, row, body.width, buf);
    }
}

fn table_block(caption: Option<&Caption>, focused: bool) -> Block<'static> {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));

    if let Some(caption) = caption {
        block = block.title_top(Line::from(Span::styled(
            format!(" {} ", caption.title),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )));
        if !caption.actions.is_empty() {
            let hints = format!(" {} ", caption.actions.join(" · "));
            block = block.title_top(
                Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
                    .right_aligned(),
            );
        }
    }
    block
}

fn render_header<P, M, C>(
    table: &TableView<P, M, C>,
    spans: &[ColumnSpan],
    cursor: &TableCursor,
    area: Rect,
    buf: &mut Buffer,
) where
    M: RowModel + Clone,
{
    let sort = table.sort_state();
    for span in spans {
        let Some(column) = table.config().column(span.index) else {
            continue;
        };
        let mut title = column.title().to_string();
        if let Some(indicator) = sort.indicator_for(span.index) {
            title.push(' ');
            title.push_str(indicator);
        }

        let mut style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        if cursor.focused && cursor.header_column == Some(span.index) {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if column.is_sortable() {
            style = style.fg(Color::LightYellow);
        }
        put_cell(&title, span, area.y, style, buf);
    }
}

/// One line of the table body.
enum BodyLine<'a> {
    Cells { cells: &'a [String], style: Style },
    FullWidth { text: &'a str },
    MenuEntry { label: &'static str, highlighted: bool },
}

fn body_lines<'a, P, M, C>(
    table: &'a TableView<P, M, C>,
    cursor: &TableCursor,
) -> (Vec<BodyLine<'a>>, Option<usize>)
where
    M: RowModel + Clone,
{
    let full_width: Vec<usize> = table
        .config()
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, column)| column.as_ref().is_some_and(ColumnConfig::is_full_width))
        .map(|(index, _)| index)
        .collect();

    let mut lines = Vec::new();
    let mut selected_line = None;
    let mut push_row = |row: &'a Row<M, C>,
                        style: Style,
                        selected: bool,
                        lines: &mut Vec<BodyLine<'a>>| {
        if selected {
            selected_line = Some(lines.len());
        }
        lines.push(BodyLine::Cells {
            cells: row.cells(),
            style,
        });
        for &index in &full_width {
            if let Some(text) = row.cells().get(index).filter(|text| !text.is_empty()) {
                lines.push(BodyLine::FullWidth { text });
            }
        }
        if let Some(highlighted) = row.menu() {
            for (index, action) in row.actions().into_iter().enumerate() {
                lines.push(BodyLine::MenuEntry {
                    label: action.label,
                    highlighted: index == highlighted,
                });
            }
        }
    };

    let pinned = Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD);
    for row in table.top_rows() {
        push_row(row, pinned, false, &mut lines);
    }
    for (index, row) in table.middle_rows().iter().enumerate() {
        let selected = cursor.selected_row == Some(index);
        push_row(row, row_style(row.highlight(), selected, cursor.focused), selected, &mut lines);
    }
    for row in table.bottom_rows() {
        push_row(row, pinned, false, &mut lines);
    }
    (lines, selected_line)
}

fn row_style(highlight: RowHighlight, selected: bool, focused: bool) -> Style {
    let mut style = match highlight {
        RowHighlight::Plain => Style::default().fg(Color::White),
        RowHighlight::NextAssigned => Style::default().fg(Color::LightMagenta),
    };
    if selected {
        style = if focused {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style.add_modifier(Modifier::BOLD)
        };
    }
    style
}

fn draw_line(
    line: &BodyLine<'_>,
    spans: &[ColumnSpan],
    x: u16,
    y: u16,
    width: u16,
    buf: &mut Buffer,
) {
    match line {
        BodyLine::Cells { cells, style } => {
            if style.add_modifier.contains(Modifier::REVERSED) {
                buf.set_style(Rect::new(x, y, width, 1), *style);
            }
            for span in spans {
                let text = cells.get(span.index).map_or("", String::as_str);
                put_cell(text, span, y, *style, buf);
            }
        }
        BodyLine::FullWidth { text } => {
            let style = Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC);
            buf.set_stringn(x + 2, y, text, usize::from(width.saturating_sub(2)), style);
        }
        BodyLine::MenuEntry { label, highlighted } => {
            let style = if *highlighted {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Cyan)
            };
            let text = format!("{MENU_MARKER}{label}");
            buf.set_stringn(x, y, text, usize::from(width), style);
        }
    }
}

/// Writes a cell, leaving the last column of the span blank as a separator.
fn put_cell(text: &str, span: &ColumnSpan, y: u16, style: Style, buf: &mut Buffer) {
    let width = usize::from(span.width.saturating_sub(1));
    if width > 0 {
        buf.set_stringn(span.x, y, text, width, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{
        ColumnConfig, MenuAction, RowController, RowPosition, StaticRow, TableConfig,
    };
    use crate::test_utils::{buffer_to_string, line_containing};
    use sprintboard_protocol::{DailyWork, Task, TaskClass};

    struct Menu;

    impl RowController<Task, u64> for Menu {
        fn actions(&self, model: &Task) -> Vec<MenuAction<u64>> {
            vec![MenuAction::new("Details", model.id), MenuAction::new("Delete", model.id)]
        }

        fn highlight(&self, model: &Task) -> RowHighlight {
            if model.task_class == TaskClass::NextAssigned {
                RowHighlight::NextAssigned
            } else {
                RowHighlight::Plain
            }
        }
    }

    fn table(tasks: Vec<Task>) -> TableView<DailyWork, Task, u64> {
        let factory = |_: &Task| Box::new(Menu) as Box<dyn RowController<Task, u64>>;
        let config = TableConfig::new(factory)
            .with_caption(Caption::new("Daily work").with_action("s sort"))
            .with_column(
                ColumnConfig::new("Name")
                    .with_min_width(30.0)
                    .with_value(|t: &Task| t.name.clone())
                    .with_comparator(|a: &Task, b: &Task| a.name.cmp(&b.name))
                    .default_sort(),
            )
            .with_column(
                ColumnConfig::new("Id")
                    .with_min_width(10.0)
                    .with_value(|t: &Task| t.id.to_string()),
            )
            .with_column(
                ColumnConfig::new("Description")
                    .full_width()
                    .with_value(|t: &Task| t.description.clone()),
            )
            .with_data_source(|work: &DailyWork| work.tasks().to_vec());
        let mut work = DailyWork::new(1);
        for task in tasks {
            work.push(task);
        }
        let mut table = TableView::new(config, work);
        table.render();
        table
    }

    fn draw(table: &TableView<DailyWork, Task, u64>, cursor: &TableCursor, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        render_table(table, cursor, area, &mut buf);
        buf
    }

    #[test]
    fn caption_header_and_rows_are_drawn() {
        let table = table(vec![
            Task::new(2, "Write docs").with_description("Cover the config file"),
            Task::new(1, "Add tests"),
        ]);
        let buf = draw(&table, &TableCursor::default(), Rect::new(0, 0, 60, 10));
        let content = buffer_to_string(&buf);

        assert!(content.contains("Daily work"));
        assert!(content.contains("s sort"));
        assert!(content.contains("Name ▲"));
        assert!(content.contains("Cover the config file"));

        // Sorted by name: "Add tests" above "Write docs".
        let add = content.find("Add tests").unwrap();
        let write = content.find("Write docs").unwrap();
        assert!(add < write);
    }

    #[test]
    fn empty_table_hides_header() {
        let table = table(Vec::new());
        let buf = draw(&table, &TableCursor::default(), Rect::new(0, 0, 40, 5));
        let content = buffer_to_string(&buf);
        assert!(content.contains(EMPTY_TEXT));
        assert!(!content.contains("Name"));
    }

    #[test]
    fn open_menu_lists_actions_under_row() {
        let mut table = table(vec![Task::new(1, "Deploy")]);
        table.data_row_at_mut(0).unwrap().open_menu();
        let cursor = TableCursor {
            selected_row: Some(0),
            header_column: None,
            focused: true,
        };
        let buf = draw(&table, &cursor, Rect::new(0, 0, 40, 8));

        assert!(line_containing(&buf, "▸ Details").is_some());
        assert!(line_containing(&buf, "▸ Delete").is_some());
    }

    #[test]
    fn bottom_rows_follow_data_rows() {
        let mut table = table(vec![Task::new(1, "Deploy")]);
        let total = table
            .create_row(Box::new(StaticRow), Task::new(0, "Total"), RowPosition::Bottom)
            .unwrap();
        table.set_row_cells(total, vec!["Total".into(), "1".into(), String::new()]);

        let area = Rect::new(0, 0, 40, 8);
        let content = buffer_to_string(&draw(&table, &TableCursor::default(), area));
        assert!(content.find("Deploy").unwrap() < content.find("Total").unwrap());
    }

    #[test]
    fn body_scrolls_to_selected_row() {
        let tasks = (1..=20).map(|id| Task::new(id, format!("Task {id:02}"))).collect();
        let table = table(tasks);
        let cursor = TableCursor {
            selected_row: Some(19),
            header_column: None,
            focused: true,
        };
        let content = buffer_to_string(&draw(&table, &cursor, Rect::new(0, 0, 40, 8)));
        assert!(content.contains("Task 20"));
        assert!(!content.contains("Task 01"));
    }

    #[test]
    fn column_at_maps_header_clicks() {
        let table = table(vec![Task::new(1, "Deploy")]);
        let area = Rect::new(0, 0, 102, 10);
        let spans = column_spans(table.config().columns(), 0.4, table_inner(area));
        assert_eq!(spans.len(), 2);

        assert_eq!(column_at(&table, area, spans[0].x, 1), Some(0));
        assert_eq!(column_at(&table, area, spans[1].x + 1, 1), Some(1));
        assert_eq!(column_at(&table, area, spans[0].x, 2), None);
        assert_eq!(column_at(&table, area, 0, 1), None);
    }
}
