//! Backlog chooser rendering widget.
//!
//! The three select lists are stacked top to bottom: products, projects,
//! iterations. Hidden lists take no room.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use sprintboard_protocol::BacklogLevel;

use crate::chooser::{BacklogChooser, Choice, SelectList, SelectOption};
use crate::layout::CHOOSER_LIST_HEIGHT;

/// Renders the backlog chooser.
///
/// The list with the chooser's focus gets a highlighted border and cursor
/// while `focused` is set.
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use sprintboard_config::ChooserSettings;
/// use sprintboard_tui::chooser::BacklogChooser;
/// use sprintboard_tui::widgets::render_chooser;
///
/// let chooser = BacklogChooser::new(&ChooserSettings::default());
/// let area = Rect::new(0, 0, 30, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_chooser(&chooser, true, area, &mut buf);
/// ```
pub fn render_chooser(chooser: &BacklogChooser, focused: bool, area: Rect, buf: &mut Buffer) {
    let visible: Vec<BacklogLevel> = BacklogLevel::ALL
        .into_iter()
        .filter(|level| chooser.list(*level).is_visible())
        .collect();
    if visible.is_empty() {
        return;
    }

    let mut constraints: Vec<Constraint> = visible
        .iter()
        .map(|_| Constraint::Length(CHOOSER_LIST_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (level, chunk) in visible.into_iter().zip(chunks.iter()) {
        let active = focused && chooser.focus() == level;
        render_list(chooser.list(level), level, active, *chunk, buf);
    }
}

fn render_list(list: &SelectList, level: BacklogLevel, active: bool, area: Rect, buf: &mut Buffer) {
    let border_color = if active { Color::Cyan } else { Color::DarkGray };
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", level.display_name()),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    block.render(area, buf);

    if list.options().is_empty() {
        Paragraph::new(Span::styled(
            "Loading…",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        ))
        .render(inner, buf);
        return;
    }

    let height = usize::from(inner.height);
    let offset = (list.cursor() + 1).saturating_sub(height);
    let lines: Vec<Line<'_>> = list
        .options()
        .iter()
        .enumerate()
        .skip(offset)
        .take(height)
        .map(|(index, option)| option_line(option, active && index == list.cursor()))
        .collect();
    Paragraph::new(lines).render(inner, buf);
}

fn option_line(option: &SelectOption, under_cursor: bool) -> Line<'_> {
    let mut style = match option.choice {
        Choice::Backlog(_) => Style::default().fg(Color::White),
        Choice::SelectAll => Style::default().fg(Color::LightYellow),
        Choice::NoneFound | Choice::Placeholder => {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC)
        }
    };
    if under_cursor {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let marker = match (option.choice.is_selectable(), option.selected) {
        (false, _) => "    ",
        (true, true) => "[x] ",
        (true, false) => "[ ] ",
    };
    Line::from(vec![
        Span::styled(marker, style),
        Span::styled(option.label.as_str(), style),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chooser::NO_PRODUCTS_LABEL;
    use crate::test_utils::{buffer_to_string, line_containing};
    use sprintboard_config::ChooserSettings;
    use sprintboard_protocol::{BacklogSummary, FetchResponse};

    fn draw(chooser: &BacklogChooser) -> Buffer {
        let area = Rect::new(0, 0, 30, 30);
        let mut buf = Buffer::empty(area);
        render_chooser(chooser, true, area, &mut buf);
        buf
    }

    #[test]
    fn only_products_list_before_selection() {
        let mut chooser = BacklogChooser::new(&ChooserSettings::default());
        let request = chooser.initialize();
        chooser.apply(FetchResponse::new(
            &request,
            vec![
                BacklogSummary::new(1, "Webshop"),
                BacklogSummary::new(2, "Mobile app"),
            ],
        ));

        let buf = draw(&chooser);
        let content = buffer_to_string(&buf);
        assert!(content.contains("Products"));
        assert!(!content.contains("Projects"));
        assert!(line_containing(&buf, "Webshop").unwrap().contains("[ ]"));
    }

    #[test]
    fn selected_options_are_checked() {
        let mut chooser = BacklogChooser::new(&ChooserSettings::default());
        let request = chooser.initialize();
        chooser.apply(FetchResponse::new(&request, vec![BacklogSummary::new(1, "Webshop")]));
        let projects = chooser.toggle(BacklogLevel::Product, 0).unwrap();
        chooser.apply(FetchResponse::new(&projects, vec![BacklogSummary::new(10, "Checkout")]));

        let buf = draw(&chooser);
        assert!(line_containing(&buf, "Webshop").unwrap().contains("[x]"));
        assert!(buffer_to_string(&buf).contains("Projects"));
        assert!(buffer_to_string(&buf).contains("Checkout"));
    }

    #[test]
    fn placeholder_has_no_checkbox() {
        let mut chooser = BacklogChooser::new(&ChooserSettings::default());
        let request = chooser.initialize();
        chooser.apply(FetchResponse::new(&request, Vec::new()));

        let buf = draw(&chooser);
        let line = line_containing(&buf, "There are no").unwrap();
        assert!(!line.contains("[ ]"));
        assert!(NO_PRODUCTS_LABEL.starts_with("There are no"));
    }
}
