//! Label/value table for a single model.
//!
//! A vertical table turns every configured column into a line: the column
//! title on the left, the model's value on the right. It backs the task
//! details popup.

use std::fmt;

use sprintboard_protocol::ModelEvent;

use super::column::ColumnConfig;

/// Default share of the width given to the labels, in percent.
pub const DEFAULT_LEFT_WIDTH: u16 = 30;

/// Default share of the width given to the values, in percent.
pub const DEFAULT_RIGHT_WIDTH: u16 = 70;

/// One line of a vertical table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerticalRow {
    /// Column title.
    pub label: String,
    /// Rendered value.
    pub value: String,
    /// Tooltip of the column, if any.
    pub tooltip: Option<String>,
}

/// A table showing one model as label/value pairs.
///
/// # Examples
///
/// ```
/// use sprintboard_protocol::Task;
/// use sprintboard_tui::table::{ColumnConfig, VerticalTableView};
///
/// let columns = vec![
///     Some(ColumnConfig::new("Name").with_value(|t: &Task| t.name.clone())),
///     None,
///     Some(ColumnConfig::new("Id").with_value(|t: &Task| t.id.to_string())),
/// ];
/// let mut table = VerticalTableView::new(Task::new(7, "Write docs"), columns);
/// table.render();
///
/// assert_eq!(table.rows().len(), 2);
/// assert_eq!(table.rows()[1].value, "7");
/// ```
pub struct VerticalTableView<M> {
    model: M,
    columns: Vec<Option<ColumnConfig<M>>>,
    left_width: u16,
    right_width: u16,
    rows: Vec<VerticalRow>,
    removed: bool,
}

impl<M> VerticalTableView<M> {
    /// Creates a vertical table with the default 30/70 split.
    ///
    /// `None` column slots produce no line. Call [`render`](Self::render) to
    /// fill the lines.
    #[must_use]
    pub fn new(model: M, columns: Vec<Option<ColumnConfig<M>>>) -> Self {
        Self {
            model,
            columns,
            left_width: DEFAULT_LEFT_WIDTH,
            right_width: DEFAULT_RIGHT_WIDTH,
            rows: Vec::new(),
            removed: false,
        }
    }

    /// Sets the label and value widths in percent.
    #[must_use]
    pub fn with_widths(mut self, left_width: u16, right_width: u16) -> Self {
        self.left_width = left_width;
        self.right_width = right_width;
        self
    }

    /// Returns the label width in percent.
    #[must_use]
    pub fn left_width(&self) -> u16 {
        self.left_width
    }

    /// Returns the value width in percent.
    #[must_use]
    pub fn right_width(&self) -> u16 {
        self.right_width
    }

    /// Returns the model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns the rendered lines.
    #[must_use]
    pub fn rows(&self) -> &[VerticalRow] {
        &self.rows
    }

    /// Returns `true` once the model was deleted.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Recomputes every line from the model.
    pub fn render(&mut self) {
        if self.removed {
            return;
        }
        self.rows = self
            .columns
            .iter()
            .flatten()
            .map(|column| VerticalRow {
                label: column.title().to_string(),
                value: column.cell(&self.model),
                tooltip: column.tooltip().map(str::to_string),
            })
            .collect();
    }

    /// Takes a new value of the model and renders it.
    pub fn on_edit(&mut self, model: M) {
        self.model = model;
        self.render();
    }

    /// Drops every line; the table stays empty from then on.
    pub fn on_delete(&mut self) {
        self.rows.clear();
        self.removed = true;
    }

    /// Dispatches a model event to [`on_edit`](Self::on_edit) or
    /// [`on_delete`](Self::on_delete).
    pub fn handle_model_event(&mut self, event: ModelEvent<M>) {
        match event {
            ModelEvent::Edit(model) => self.on_edit(model),
            ModelEvent::RelationUpdate => self.render(),
            ModelEvent::Delete => self.on_delete(),
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for VerticalTableView<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerticalTableView")
            .field("model", &self.model)
            .field("rows", &self.rows)
            .field("left_width", &self.left_width)
            .field("right_width", &self.right_width)
            .field("removed", &self.removed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use sprintboard_protocol::{Task, TaskState};

    use super::*;

    fn details(task: Task) -> VerticalTableView<Task> {
        let columns = vec![
            Some(ColumnConfig::new("Name").with_value(|t: &Task| t.name.clone())),
            Some(
                ColumnConfig::new("State")
                    .with_tooltip("Workflow state")
                    .with_value(|t: &Task| t.state.display_name().to_string()),
            ),
        ];
        let mut table = VerticalTableView::new(task, columns).with_widths(25, 75);
        table.render();
        table
    }

    #[test]
    fn lines_follow_columns() {
        let table = details(Task::new(1, "Deploy"));
        assert_eq!(table.left_width(), 25);
        assert_eq!(table.rows()[0].label, "Name");
        assert_eq!(table.rows()[0].value, "Deploy");
        assert_eq!(table.rows()[1].tooltip.as_deref(), Some("Workflow state"));
    }

    #[test]
    fn edit_rerenders() {
        let mut table = details(Task::new(1, "Deploy"));
        table.handle_model_event(ModelEvent::Edit(
            Task::new(1, "Deploy").with_state(TaskState::Done),
        ));
        assert_eq!(table.rows()[1].value, "Done");
    }

    #[test]
    fn delete_empties_for_good() {
        let mut table = details(Task::new(1, "Deploy"));
        table.handle_model_event(ModelEvent::Delete);
        assert!(table.is_removed());
        assert!(table.rows().is_empty());

        table.render();
        assert!(table.rows().is_empty());
    }
}
