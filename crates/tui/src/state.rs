//! Application state management.
//!
//! This module defines the core state of the TUI: the daily-work task table,
//! the backlog chooser, focus, selection tracking, and the execution of the
//! [`TaskCommand`]s row controllers produce.

use sprintboard_config::ChooserSettings;
use sprintboard_protocol::{
    Container, DailyWork, DailyWorkViewType, FetchRequest, ModelEvent, ProtocolError,
    Result as ProtocolResult, Task, TaskClass, TaskId, format_effort,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::chooser::BacklogChooser;
use crate::controller::{DailyWorkTaskController, TaskBus, TaskCommand};
use crate::table::{
    Caption, ColumnConfig, RowController, RowId, RowPosition, StaticRow, TableConfig, TableView,
    VerticalTableView,
};

/// The daily-work task table.
pub type TaskTable = TableView<DailyWork, Task, TaskCommand>;

/// Index of the rank column.
pub const RANK_COLUMN: usize = 0;

/// The current focus area in the UI.
///
/// Determines which UI component receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Focus is on the task table.
    #[default]
    Table,
    /// Focus is on the backlog chooser.
    Chooser,
    /// Focus is on the task details popup.
    Details,
}

/// Builds the columns shared by the task table and the details popup.
fn task_columns() -> Vec<ColumnConfig<Task>> {
    vec![
        ColumnConfig::new("#")
            .with_min_width(4.0)
            .with_tooltip("Rank in the work queue")
            .with_value(|task: &Task| (task.rank + 1).to_string())
            .with_comparator(|a: &Task, b: &Task| a.rank.cmp(&b.rank))
            .default_sort(),
        ColumnConfig::new("Name")
            .with_min_width(30.0)
            .with_tooltip("Task name")
            .with_value(|task: &Task| task.name.clone())
            .with_comparator(|a: &Task, b: &Task| {
                a.name.to_lowercase().cmp(&b.name.to_lowercase())
            }),
        ColumnConfig::new("State")
            .with_min_width(12.0)
            .with_tooltip("Workflow state")
            .with_value(|task: &Task| task.state.display_name().to_string())
            .with_comparator(|a: &Task, b: &Task| a.state.cmp(&b.state)),
        ColumnConfig::new("EL")
            .with_min_width(8.0)
            .with_tooltip("Effort left")
            .with_value(|task: &Task| format_effort(task.effort_left))
            .with_comparator(|a: &Task, b: &Task| a.effort_left.cmp(&b.effort_left)),
        ColumnConfig::new("OE")
            .with_min_width(8.0)
            .with_tooltip("Original estimate")
            .with_value(|task: &Task| format_effort(task.original_estimate))
            .with_comparator(|a: &Task, b: &Task| a.original_estimate.cmp(&b.original_estimate)),
        ColumnConfig::new("Description")
            .full_width()
            .with_value(|task: &Task| task.description.clone()),
    ]
}

/// Builds the daily-work table configuration.
///
/// Every data row gets a [`DailyWorkTaskController`] listening on `bus` and
/// reporting to `commands`.
#[must_use]
pub fn daily_work_table_config(
    view_type: DailyWorkViewType,
    container: Container,
    bus: TaskBus,
    commands: UnboundedSender<TaskCommand>,
    border_per_column: f64,
) -> TableConfig<DailyWork, Task, TaskCommand> {
    let title = match view_type {
        DailyWorkViewType::WorkQueue => "Work queue",
        DailyWorkViewType::MyWork => "My work",
    };
    let mut caption = Caption::new(title)
        .with_action("Enter actions")
        .with_action("s sort");
    if view_type.is_rankable() {
        caption = caption.with_action("Shift+↑↓ rank");
    }

    let mut config = TableConfig::new(move |task: &Task| {
        Box::new(DailyWorkTaskController::new(
            task,
            view_type,
            container,
            bus.clone(),
            commands.clone(),
        )) as Box<dyn RowController<Task, TaskCommand>>
    })
    .with_caption(caption)
    .with_border_per_column(border_per_column)
    .with_data_source(|work: &DailyWork| work.tasks().to_vec());
    for column in task_columns() {
        config = config.with_column(column);
    }
    config
}

/// Builds the details popup of a task.
#[must_use]
pub fn task_details(task: Task) -> VerticalTableView<Task> {
    let mut columns: Vec<Option<ColumnConfig<Task>>> =
        task_columns().into_iter().map(Some).collect();
    columns.push(Some(
        ColumnConfig::new("Next assigned")
            .with_value(|task: &Task| match task.task_class {
                TaskClass::NextAssigned => "yes".to_string(),
                TaskClass::Normal => "no".to_string(),
            }),
    ));
    let mut details = VerticalTableView::new(task, columns);
    details.render();
    details
}

/// The application state.
///
/// Contains all mutable state for the TUI application: the task table and
/// its parent daily-work queue, the backlog chooser, focus, and selection.
#[derive(Debug)]
pub struct AppState {
    /// The daily-work task table.
    pub table: TaskTable,
    /// The backlog chooser.
    pub chooser: BacklogChooser,
    /// Current focus area.
    pub focus: Focus,
    /// Index of the selected data row, if any.
    pub selected_row: Option<usize>,
    /// Index of the focused header column.
    pub header_column: usize,
    /// Details popup of a task, if open.
    pub details: Option<VerticalTableView<Task>>,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// Last status message.
    pub status: Option<String>,
    bus: TaskBus,
    commands: UnboundedReceiver<TaskCommand>,
    command_tx: UnboundedSender<TaskCommand>,
    totals: Option<RowId>,
}

impl AppState {
    /// Creates the state for a daily-work queue.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprintboard_config::ChooserSettings;
    /// use sprintboard_protocol::dummy::dummy_daily_work;
    /// use sprintboard_tui::AppState;
    ///
    /// let state = AppState::new(dummy_daily_work(), &ChooserSettings::default(), 0.4);
    /// assert_eq!(state.table.middle_rows().len(), 6);
    /// assert_eq!(state.selected_row, Some(0));
    /// ```
    #[must_use]
    pub fn new(work: DailyWork, chooser: &ChooserSettings, border_per_column: f64) -> Self {
        let bus = TaskBus::new();
        let (command_tx, commands) = mpsc::unbounded_channel();
        let config = daily_work_table_config(
            work.view_type,
            work.container(),
            bus.clone(),
            command_tx.clone(),
            border_per_column,
        );
        let mut table = TableView::new(config, work);
        table.render();

        let mut state = Self {
            table,
            chooser: BacklogChooser::new(chooser),
            focus: Focus::Table,
            selected_row: None,
            header_column: RANK_COLUMN,
            details: None,
            help_visible: false,
            status: None,
            bus,
            commands,
            command_tx,
            totals: None,
        };
        state.totals = state
            .table
            .create_row(Box::new(StaticRow), Task::new(0, "Total"), RowPosition::Bottom);
        state.refresh();
        state
    }

    /// Returns the daily-work queue.
    #[must_use]
    pub fn work(&self) -> &DailyWork {
        self.table.parent()
    }

    /// Returns the task bus.
    #[must_use]
    pub fn bus(&self) -> &TaskBus {
        &self.bus
    }

    /// Returns a sender for task commands.
    #[must_use]
    pub fn command_sender(&self) -> UnboundedSender<TaskCommand> {
        self.command_tx.clone()
    }

    /// Returns the task of the selected row.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.table.data_row_at(self.selected_row?).map(|row| row.model())
    }

    /// Returns the tooltip of the focused header column.
    #[must_use]
    pub fn header_tooltip(&self) -> Option<&str> {
        self.table.config().column(self.header_column)?.tooltip()
    }

    /// Toggles the help overlay visibility.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Dismisses the help overlay if visible.
    ///
    /// Returns `true` if help was dismissed.
    pub fn dismiss_help(&mut self) -> bool {
        std::mem::replace(&mut self.help_visible, false)
    }

    /// Switches focus between the task table and the chooser.
    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Table => Focus::Chooser,
            Focus::Chooser => Focus::Table,
            Focus::Details => Focus::Details,
        };
    }

    /// Moves the selection up, or the menu highlight when a menu is open.
    pub fn navigate_up(&mut self) {
        self.navigate_rows(-1);
    }

    /// Moves the selection down, or the menu highlight when a menu is open.
    pub fn navigate_down(&mut self) {
        self.navigate_rows(1);
    }

    fn navigate_rows(&mut self, delta: isize) {
        let count = self.table.middle_rows().len();
        let Some(current) = self.selected_row else {
            self.selected_row = (count > 0).then_some(0);
            return;
        };
        if let Some(row) = self.table.data_row_at_mut(current)
            && row.menu().is_some()
        {
            row.move_menu(delta);
            return;
        }
        self.selected_row = Some(current.saturating_add_signed(delta).min(count.saturating_sub(1)));
    }

    /// Moves the header focus to the previous column drawn on row lines.
    pub fn navigate_left(&mut self) {
        if let Some(column) = self
            .header_columns()
            .into_iter()
            .rev()
            .find(|&c| c < self.header_column)
        {
            self.header_column = column;
        }
    }

    /// Moves the header focus to the next column drawn on row lines.
    pub fn navigate_right(&mut self) {
        if let Some(column) = self.header_columns().into_iter().find(|&c| c > self.header_column) {
            self.header_column = column;
        }
    }

    fn header_columns(&self) -> Vec<usize> {
        self.table
            .config()
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, column)| column.as_ref().is_some_and(|c| !c.is_full_width()))
            .map(|(index, _)| index)
            .collect()
    }

    /// Opens the action menu of the selected row, or runs the highlighted
    /// entry when it is already open.
    pub fn select(&mut self) {
        let Some(row) = self.selected_row.and_then(|index| self.table.data_row_at_mut(index)) else {
            return;
        };
        if row.menu().is_some() {
            if let Some(command) = row.choose() {
                self.execute(command);
            }
        } else {
            row.open_menu();
        }
    }

    /// Closes the innermost open element: a row menu, then the details
    /// popup. Returns `false` if nothing was open.
    pub fn escape(&mut self) -> bool {
        if let Some(row) = self.selected_row.and_then(|index| self.table.data_row_at_mut(index))
            && row.menu().is_some()
        {
            row.close_menu();
            return true;
        }
        if self.details.take().is_some() {
            self.focus = Focus::Table;
            return true;
        }
        false
    }

    /// Sorts by the focused header column, keeping the selected task
    /// selected.
    pub fn sort_by_column(&mut self, column: usize) -> bool {
        let selected = self.selected_task().map(|task| task.id);
        if !self.table.sort_by_column(column) {
            return false;
        }
        self.header_column = column;
        self.select_task(selected);
        true
    }

    /// Moves the selected row by `delta` and ranks it where it landed.
    pub fn move_selected(&mut self, delta: isize) {
        let Some(from) = self.selected_row else {
            return;
        };
        if !self.work().view_type.is_rankable() {
            self.status = Some("My work cannot be ranked by hand".to_string());
            return;
        }
        let rows = self.table.middle_rows().len();
        let Some(to) = from.checked_add_signed(delta).filter(|&to| to < rows) else {
            return;
        };
        let Some(command) = self.table.move_row(from, to) else {
            return;
        };
        let moved = command.task();
        self.execute(command);
        self.select_task(Some(moved));
    }

    /// Toggles the option under the chooser cursor and returns the fetch it
    /// needs, if any.
    pub fn toggle_chooser_option(&mut self) -> Option<FetchRequest> {
        self.chooser.toggle_focused()
    }

    /// Runs every command the row controllers queued.
    pub fn drain_commands(&mut self) {
        while let Ok(command) = self.commands.try_recv() {
            self.execute(command);
        }
    }

    /// Carries out a task command against the daily-work queue.
    ///
    /// Failures are logged and reported in the status line.
    pub fn execute(&mut self, command: TaskCommand) {
        debug!(?command, "executing task command");
        let container = self.work().container();
        let outcome = match command {
            TaskCommand::OpenDetails(id) => self.open_details(id),
            TaskCommand::Edit(id) => {
                let work = self.table.parent_mut();
                let next = work.get(id).map(|task| task.state.next());
                next.ok_or(ProtocolError::TaskNotFound(id))
                    .and_then(|state| work.set_state(id, state).cloned())
                    .map(|task| {
                        let message = format!("{} is now {}", task.name, task.state.display_name());
                        self.publish(id, &ModelEvent::Edit(task));
                        Some(message)
                    })
            }
            TaskCommand::Delete(id) => self.table.parent_mut().remove(id).map(|task| {
                self.publish(id, &ModelEvent::Delete);
                Some(format!("Deleted {}", task.name))
            }),
            TaskCommand::ResetOriginalEstimate(id) => self
                .table
                .parent_mut()
                .reset_original_estimate(id)
                .cloned()
                .map(|task| {
                    self.publish(id, &ModelEvent::Edit(task));
                    Some("Original estimate reset".to_string())
                }),
            TaskCommand::RemoveFromDailyWork(id) => self.table.parent_mut().remove(id).map(|task| {
                info!(task = id, "removed from daily work");
                self.publish(id, &ModelEvent::RelationUpdate);
                Some(format!("Removed {} from this list", task.name))
            }),
            TaskCommand::RankDailyUnder {
                task,
                position,
                container: target,
            } if target == container => self
                .table
                .parent_mut()
                .rank_under(task, position)
                .map(|()| None),
            TaskCommand::RankDailyUnder { container: target, .. } => {
                warn!(?target, ?container, "ranking request for another queue ignored");
                Ok(None)
            }
            TaskCommand::RankUnder {
                task,
                position,
                container: target,
            } => {
                if target == container {
                    self.table.parent_mut().rank_under(task, position).map(|()| None)
                } else {
                    self.table.parent_mut().remove(task).map(|moved| {
                        self.publish(task, &ModelEvent::RelationUpdate);
                        Some(format!("Moved {} to {target:?}", moved.name))
                    })
                }
            }
        };

        match outcome {
            Ok(Some(message)) => self.status = Some(message),
            Ok(None) => {}
            Err(err) => {
                warn!(?command, error = %err, "task command failed");
                self.status = Some(format!("Could not update task {}: {err}", command.task()));
            }
        }
        self.refresh();
    }

    fn open_details(&mut self, id: TaskId) -> ProtocolResult<Option<String>> {
        let task = self
            .work()
            .get(id)
            .cloned()
            .ok_or(ProtocolError::TaskNotFound(id))?;
        self.details = Some(task_details(task));
        self.focus = Focus::Details;
        Ok(None)
    }

    /// Publishes a task event on the bus and forwards it to an open details
    /// popup of the same task.
    fn publish(&mut self, id: TaskId, event: &ModelEvent<Task>) {
        let delivered = self.bus.publish(&id, event);
        debug!(task = id, delivered, "published task event");
        if let Some(details) = self.details.as_mut().filter(|details| details.model().id == id) {
            details.handle_model_event(event.clone());
        }
    }

    /// Reconciles the table with the queue and updates the totals row.
    pub fn refresh(&mut self) {
        let selected = self.selected_task().map(|task| task.id);
        self.table.render();
        if let Some(totals) = self.totals {
            let total = self.work().total_effort_left();
            let mut cells = vec![String::new(); self.table.config().columns().len()];
            if let Some(name) = cells.get_mut(1) {
                *name = "Total".to_string();
            }
            if let Some(effort) = cells.get_mut(3) {
                *effort = format_effort(Some(total));
            }
            self.table.set_row_cells(totals, cells);
        }
        self.select_task(selected);
    }

    fn select_task(&mut self, task: Option<TaskId>) {
        let rows = self.table.middle_rows();
        let by_task = task.and_then(|id| rows.iter().position(|row| row.model().id == id));
        self.selected_row = match (by_task, self.selected_row) {
            (Some(index), _) => Some(index),
            _ if rows.is_empty() => None,
            (None, Some(index)) => Some(index.min(rows.len() - 1)),
            (None, None) => Some(0),
        };
    }
}
