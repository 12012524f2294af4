//! Main application struct and run loop.
//!
//! This module provides the `App` struct which orchestrates the TUI
//! application lifecycle: event handling, state updates, backlog fetches,
//! and rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use sprintboard_client::BacklogLookup;
use sprintboard_config::Config;
use sprintboard_protocol::{DailyWork, FetchRequest, FetchResponse, Message};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, trace, warn};

use crate::{
    AppState, Focus,
    event::{event_to_message, poll_event},
    layout::{
        CHOOSER_WIDTH, HEADER_HEIGHT, MIN_HEIGHT, MIN_WIDTH, MIN_WIDTH_WITH_CHOOSER,
        STATUS_BAR_HEIGHT,
    },
    terminal::AppTerminal,
    widgets::{
        TableCursor, column_at, render_chooser, render_help_overlay, render_status_bar,
        render_table, render_vertical_table,
        status_bar::{CHOOSER_HINTS, DETAILS_HINTS, TABLE_HINTS},
    },
};

type FetchResult = sprintboard_client::Result<FetchResponse>;

/// The main application struct.
///
/// Manages the application state and provides the main event loop.
#[derive(Debug)]
pub struct App {
    state: AppState,
    should_quit: bool,
    /// Last known terminal area.
    last_area: Rect,
    /// Where the task table was drawn, used for click hit-testing.
    table_area: Rect,
    /// Where the chooser was drawn; empty when it was hidden.
    chooser_area: Rect,
    lookup: BacklogLookup,
    fetch_tx: UnboundedSender<FetchResult>,
    fetches: UnboundedReceiver<FetchResult>,
}

impl App {
    /// Creates an application showing `work`, resolving chooser fetches
    /// through `lookup`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    ///
    /// use sprintboard_client::{BacklogLookup, StaticBacklogSource};
    /// use sprintboard_config::Config;
    /// use sprintboard_protocol::dummy::dummy_daily_work;
    /// use sprintboard_tui::App;
    ///
    /// let lookup = BacklogLookup::new(StaticBacklogSource::demo(), Duration::from_secs(300));
    /// let app = App::new(dummy_daily_work(), &Config::default(), lookup);
    /// assert_eq!(app.state().table.middle_rows().len(), 6);
    /// ```
    #[must_use]
    pub fn new(work: DailyWork, config: &Config, lookup: BacklogLookup) -> Self {
        let (fetch_tx, fetches) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(work, &config.chooser, config.table.border_per_column),
            should_quit: false,
            last_area: Rect::default(),
            table_area: Rect::default(),
            chooser_area: Rect::default(),
            lookup,
            fetch_tx,
            fetches,
        }
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Returns `true` once the user asked to quit.
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Loads the product list into the chooser.
    pub fn start(&mut self) {
        let request = self.state.chooser.initialize();
        self.spawn_fetch(request);
    }

    /// Updates the application state based on a message.
    ///
    /// When the help overlay is visible, most messages are intercepted to
    /// dismiss the help instead of their normal action. Only `Quit` and
    /// `ToggleHelp` work normally when help is shown.
    pub fn update(&mut self, msg: Message) {
        if self.state.help_visible {
            match msg {
                Message::Quit => self.should_quit = true,
                Message::ToggleHelp | Message::Escape => self.state.toggle_help(),
                _ => {
                    self.state.dismiss_help();
                }
            }
            return;
        }

        match msg {
            Message::Quit => self.should_quit = true,
            Message::ToggleHelp => self.state.toggle_help(),
            Message::Escape | Message::Back => {
                self.state.escape();
            }
            Message::ToggleFocus => self.state.toggle_focus(),
            Message::Refresh => self.refresh(),
            Message::ClickAt { column, row } => self.handle_click(column, row),
            msg => match self.state.focus {
                Focus::Table => self.update_table(msg),
                Focus::Chooser => self.update_chooser(msg),
                Focus::Details => {}
            },
        }
        self.state.drain_commands();
    }

    fn update_table(&mut self, msg: Message) {
        match msg {
            Message::NavigateUp => self.state.navigate_up(),
            Message::NavigateDown => self.state.navigate_down(),
            Message::NavigateLeft => self.state.navigate_left(),
            Message::NavigateRight => self.state.navigate_right(),
            Message::Select => self.state.select(),
            Message::SortByColumn => {
                let column = self.state.header_column;
                if !self.state.sort_by_column(column) {
                    self.state.status = Some("This column cannot be sorted".to_string());
                }
            }
            Message::MoveRowUp => self.state.move_selected(-1),
            Message::MoveRowDown => self.state.move_selected(1),
            _ => {}
        }
    }

    fn update_chooser(&mut self, msg: Message) {
        match msg {
            Message::NavigateUp => self.state.chooser.move_cursor(-1),
            Message::NavigateDown => self.state.chooser.move_cursor(1),
            Message::NavigateLeft => self.state.chooser.focus_previous(),
            Message::NavigateRight => self.state.chooser.focus_next(),
            Message::Select => {
                if let Some(request) = self.state.toggle_chooser_option() {
                    self.spawn_fetch(request);
                }
            }
            _ => {}
        }
    }

    /// Reloads the chooser from scratch and re-renders the task table.
    fn refresh(&mut self) {
        self.lookup.clear_cache();
        self.start();
        self.state.refresh();
        self.state.status = Some("Reloading backlogs".to_string());
    }

    /// Handles a mouse click at the given coordinates.
    ///
    /// A click on a task table header sorts by that column. Clicks move the
    /// focus to the pane they land in.
    fn handle_click(&mut self, column: u16, row: u16) {
        if self.state.focus == Focus::Details {
            return;
        }
        let position = (column, row).into();

        if self.table_area.contains(position) {
            self.state.focus = Focus::Table;
            if let Some(index) = column_at(&self.state.table, self.table_area, column, row) {
                self.state.sort_by_column(index);
            }
        } else if self.chooser_area.contains(position) {
            self.state.focus = Focus::Chooser;
        }
    }

    /// Resolves a chooser request in the background.
    ///
    /// Must be called within a Tokio runtime.
    fn spawn_fetch(&self, request: FetchRequest) {
        let lookup = self.lookup.clone();
        let tx = self.fetch_tx.clone();
        debug!(?request, "spawning backlog fetch");
        tokio::spawn(async move {
            let result = lookup.fulfil(&request).await;
            if tx.send(result).is_err() {
                trace!("fetch receiver gone");
            }
        });
    }

    /// Feeds a finished fetch into the chooser, spawning any follow-up.
    pub fn apply_fetch(&mut self, result: FetchResult) {
        match result {
            Ok(response) => {
                if let Some(next) = self.state.chooser.apply(response) {
                    self.spawn_fetch(next);
                }
            }
            Err(err) => {
                warn!(error = %err, "backlog fetch failed");
                self.state.status = Some(format!("Could not load backlogs: {err}"));
            }
        }
    }

    /// Applies every fetch that finished since the last call.
    pub fn drain_fetches(&mut self) {
        while let Ok(result) = self.fetches.try_recv() {
            self.apply_fetch(result);
        }
    }

    /// Renders the application UI to the given frame.
    ///
    /// Implements graceful degradation for small terminal sizes:
    /// - Below the minimum dimensions, shows a "terminal too small" message.
    /// - Below [`MIN_WIDTH_WITH_CHOOSER`], hides the chooser pane.
    /// - Otherwise, renders the chooser beside the task table.
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.last_area = area;

        if area.height < MIN_HEIGHT || area.width < MIN_WIDTH {
            self.table_area = Rect::default();
            self.chooser_area = Rect::default();
            Self::render_terminal_too_small(frame, area);
            return;
        }

        let [header_area, content_area, status_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(STATUS_BAR_HEIGHT),
            ])
            .areas(area);
        self.render_header(frame, header_area);

        if area.width >= MIN_WIDTH_WITH_CHOOSER {
            let [chooser_area, table_area] = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(CHOOSER_WIDTH), Constraint::Min(0)])
                .areas(content_area);
            self.chooser_area = chooser_area;
            self.table_area = table_area;
            render_chooser(
                &self.state.chooser,
                self.state.focus == Focus::Chooser,
                chooser_area,
                frame.buffer_mut(),
            );
        } else {
            self.chooser_area = Rect::default();
            self.table_area = content_area;
        }

        let cursor = TableCursor {
            selected_row: self.state.selected_row,
            header_column: Some(self.state.header_column),
            focused: self.state.focus == Focus::Table,
        };
        render_table(&self.state.table, &cursor, self.table_area, frame.buffer_mut());

        let (hints, tooltip) = match self.state.focus {
            Focus::Table => (TABLE_HINTS, self.state.header_tooltip()),
            Focus::Chooser => (CHOOSER_HINTS, None),
            Focus::Details => (DETAILS_HINTS, None),
        };
        render_status_bar(
            hints,
            self.state.status.as_deref(),
            tooltip,
            status_area,
            frame.buffer_mut(),
        );

        if let Some(details) = &self.state.details {
            let title = format!("Task {}", details.model().id);
            render_vertical_table(details, &title, area, frame.buffer_mut());
        }

        if self.state.help_visible {
            render_help_overlay(area, frame.buffer_mut());
        }
    }

    /// Renders a message indicating the terminal is too small.
    fn render_terminal_too_small(frame: &mut Frame, area: Rect) {
        let message = format!(
            "Terminal too small ({}×{})\nMinimum: {}×{} (w×h)",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );

        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: false });

        let vertical_offset = area.height.saturating_sub(2) / 2;
        let centered_area = Rect {
            x: area.x,
            y: area.y + vertical_offset,
            width: area.width,
            height: area.height.saturating_sub(vertical_offset),
        };

        frame.render_widget(paragraph, centered_area);
    }

    /// Renders the title bar with the queue owner and help cue.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let [title_area, help_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(17)]).areas(area);

        let work = self.state.work();
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "sprintboard",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" - "),
            Span::styled(
                format!("Daily work of user {} ({} tasks)", work.user, work.len()),
                Style::default().fg(Color::White),
            ),
        ]));
        frame.render_widget(title, title_area);

        let help_cue = Paragraph::new(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" for help", Style::default().fg(Color::DarkGray)),
        ]))
        .alignment(Alignment::Right);
        frame.render_widget(help_cue, help_area);
    }

    /// Runs the main application loop.
    ///
    /// This function blocks until the user quits the application.
    /// It polls for events, applies finished fetches and queued task
    /// commands, and renders the UI.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::time::Duration;
    ///
    /// use sprintboard_client::{BacklogLookup, StaticBacklogSource};
    /// use sprintboard_config::Config;
    /// use sprintboard_protocol::dummy::dummy_daily_work;
    /// use sprintboard_tui::{App, terminal};
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let lookup = BacklogLookup::new(StaticBacklogSource::demo(), Duration::from_secs(300));
    ///     let mut terminal = terminal::setup_terminal()?;
    ///     let mut app = App::new(dummy_daily_work(), &Config::default(), lookup);
    ///     app.run(&mut terminal).await?;
    ///     terminal::restore_terminal(&mut terminal)?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn run(&mut self, terminal: &mut AppTerminal) -> anyhow::Result<()> {
        self.start();

        loop {
            terminal.draw(|frame| self.view(frame))?;

            if let Some(event) = poll_event()?
                && let Some(msg) = event_to_message(&event)
            {
                self.update(msg);
            }

            self.drain_fetches();
            self.state.drain_commands();

            if self.should_quit {
                break;
            }
            tokio::task::yield_now().await;
        }

        Ok(())
    }
}
