//! Layout tests combining several widgets on one screen.

use ratatui::{buffer::Buffer, layout::Rect};
use sprintboard_config::ChooserSettings;
use sprintboard_protocol::dummy::dummy_daily_work;
use sprintboard_protocol::{BacklogLevel, BacklogSummary, FetchResponse, TaskState};

use super::{
    TableCursor, render_chooser, render_help_overlay, render_status_bar, render_table,
    status_bar::TABLE_HINTS,
};
use crate::controller::TaskCommand;
use crate::state::AppState;
use crate::test_utils::{buffer_to_string, line_containing};

fn state() -> AppState {
    AppState::new(dummy_daily_work(), &ChooserSettings::default(), 0.4)
}

fn draw_table(state: &AppState, focused: bool) -> Buffer {
    let area = Rect::new(0, 0, 100, 16);
    let mut buf = Buffer::empty(area);
    let cursor = TableCursor {
        selected_row: state.selected_row,
        header_column: Some(state.header_column),
        focused,
    };
    render_table(&state.table, &cursor, area, &mut buf);
    buf
}

#[test]
fn task_table_shows_every_column_header() {
    let buf = draw_table(&state(), true);
    let header = line_containing(&buf, "Name").unwrap();
    for title in ["# ▲", "State", "EL", "OE"] {
        assert!(header.contains(title), "missing {title} in {header:?}");
    }
    assert!(!header.contains("Description"));
}

#[test]
fn task_rows_show_state_and_effort() {
    let buf = draw_table(&state(), true);
    let row = line_containing(&buf, "Pair on story ranking API").unwrap();
    assert!(row.contains(TaskState::Blocked.display_name()));
    assert!(row.contains("2h"));
}

#[test]
fn description_gets_its_own_line() {
    let buf = draw_table(&state(), true);
    let content = buffer_to_string(&buf);
    let name = content.find("Write migration for iteration dates").unwrap();
    let description = content.find("Backfill missing end dates").unwrap();
    assert!(name < description);
    assert!(line_containing(&buf, "Backfill").unwrap().find("Write migration").is_none());
}

#[test]
fn totals_follow_task_changes() {
    let mut state = state();
    let before = line_containing(&draw_table(&state, true), "Total").unwrap();

    state.execute(TaskCommand::Delete(102));
    let after = line_containing(&draw_table(&state, true), "Total").unwrap();
    assert_ne!(before, after);
}

#[test]
fn chooser_and_status_bar_share_screen() {
    let mut state = state();
    let request = state.chooser.initialize();
    state.chooser.apply(FetchResponse::new(
        &request,
        vec![BacklogSummary::new(1, "Tracker Web")],
    ));

    let area = Rect::new(0, 0, 60, 20);
    let mut buf = Buffer::empty(area);
    render_chooser(&state.chooser, true, Rect::new(0, 0, 30, 19), &mut buf);
    render_status_bar(TABLE_HINTS, None, None, Rect::new(0, 19, 60, 1), &mut buf);

    let content = buffer_to_string(&buf);
    assert!(content.contains(BacklogLevel::Product.display_name()));
    assert!(content.contains("Tracker Web"));
    assert!(content.contains("Ctrl+C Quit"));
}

#[test]
fn help_overlay_covers_table() {
    let area = Rect::new(0, 0, 100, 30);
    let mut buf = Buffer::empty(area);
    let state = state();
    render_table(&state.table, &TableCursor::default(), area, &mut buf);
    render_help_overlay(area, &mut buf);
    assert!(buffer_to_string(&buf).contains("Help"));
}
