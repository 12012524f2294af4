//! Table rows and the controllers behind them.

use std::fmt;

use sprintboard_protocol::{IdentityHash, RowModel};

use super::column::ColumnConfig;

/// Stable identifier of a row within one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(pub(crate) u64);

/// The group a new row is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowPosition {
    /// Pinned above the data rows; never sorted.
    Top,
    /// A sortable data row.
    Middle,
    /// Pinned below the data rows; never sorted.
    Bottom,
}

/// Visual emphasis a controller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowHighlight {
    /// No emphasis.
    #[default]
    Plain,
    /// The task was queued next for its owner by assignment.
    NextAssigned,
}

/// An entry of a row's action menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuAction<C> {
    /// Menu text.
    pub label: &'static str,
    /// Command produced when the entry is chosen.
    pub command: C,
}

impl<C> MenuAction<C> {
    /// Creates a menu entry.
    #[must_use]
    pub fn new(label: &'static str, command: C) -> Self {
        Self { label, command }
    }
}

/// Row behaviour: which actions a row offers, how it is highlighted, and
/// what happens when it is dragged to a new place.
///
/// Controllers return commands instead of performing them, so the owner of
/// the models decides how a command is carried out.
pub trait RowController<M, C>: Send {
    /// Returns the row's action menu.
    fn actions(&self, model: &M) -> Vec<MenuAction<C>>;

    /// Returns the emphasis for the row.
    fn highlight(&self, _model: &M) -> RowHighlight {
        RowHighlight::Plain
    }

    /// Called after the row was moved among the data rows; `previous` is the
    /// model now directly above it.
    fn reordered(&self, _previous: Option<&M>) -> Option<C> {
        None
    }
}

/// A controller with no actions, for caption, summary, and other pinned
/// rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRow;

impl<M, C> RowController<M, C> for StaticRow {
    fn actions(&self, _model: &M) -> Vec<MenuAction<C>> {
        Vec::new()
    }
}

/// One table row: a model, its rendered cells, its controller, and the
/// transient state of its action menu.
pub struct Row<M, C> {
    id: RowId,
    model: M,
    cells: Vec<String>,
    fixed_cells: bool,
    controller: Box<dyn RowController<M, C>>,
    menu: Option<usize>,
}

impl<M: RowModel, C> Row<M, C> {
    pub(crate) fn new(id: RowId, model: M, controller: Box<dyn RowController<M, C>>) -> Self {
        Self {
            id,
            model,
            cells: Vec::new(),
            fixed_cells: false,
            controller,
            menu: None,
        }
    }

    /// Returns the row id.
    #[must_use]
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Returns the model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns the identity of the model.
    #[must_use]
    pub fn identity(&self) -> IdentityHash {
        self.model.identity_hash()
    }

    /// Returns the rendered cells, one per configured column (`None` slots
    /// get an empty cell).
    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Returns the controller.
    #[must_use]
    pub fn controller(&self) -> &dyn RowController<M, C> {
        self.controller.as_ref()
    }

    /// Returns the highlight the controller resolves for the model.
    #[must_use]
    pub fn highlight(&self) -> RowHighlight {
        self.controller.highlight(&self.model)
    }

    /// Returns the action menu entries.
    #[must_use]
    pub fn actions(&self) -> Vec<MenuAction<C>> {
        self.controller.actions(&self.model)
    }

    /// Returns the highlighted menu entry while the menu is open.
    #[must_use]
    pub fn menu(&self) -> Option<usize> {
        self.menu
    }

    /// Opens the action menu. Rows without actions keep it closed.
    pub fn open_menu(&mut self) -> bool {
        if self.actions().is_empty() {
            return false;
        }
        self.menu = Some(0);
        true
    }

    /// Closes the action menu.
    pub fn close_menu(&mut self) {
        self.menu = None;
    }

    /// Moves the menu highlight, clamped to the entries.
    pub fn move_menu(&mut self, delta: isize) {
        let len = self.actions().len();
        if let Some(current) = self.menu
            && len > 0
        {
            self.menu = Some(current.saturating_add_signed(delta).min(len - 1));
        }
    }

    /// Closes the menu and returns the command of the highlighted entry.
    pub fn choose(&mut self) -> Option<C> {
        let index = self.menu.take()?;
        self.actions()
            .into_iter()
            .nth(index)
            .map(|action| action.command)
    }

    pub(crate) fn replace_model(&mut self, model: M) {
        self.model = model;
    }

    pub(crate) fn set_cells(&mut self, cells: Vec<String>) {
        self.cells = cells;
        self.fixed_cells = true;
    }

    pub(crate) fn refresh_cells(&mut self, columns: &[Option<ColumnConfig<M>>]) {
        if self.fixed_cells {
            return;
        }
        self.cells = columns
            .iter()
            .map(|column| column.as_ref().map(|c| c.cell(&self.model)).unwrap_or_default())
            .collect();
    }
}

impl<M: fmt::Debug, C> fmt::Debug for Row<M, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("id", &self.id)
            .field("model", &self.model)
            .field("cells", &self.cells)
            .field("menu", &self.menu)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprintboard_protocol::Task;

    struct TwoActions;

    impl RowController<Task, &'static str> for TwoActions {
        fn actions(&self, _model: &Task) -> Vec<MenuAction<&'static str>> {
            vec![MenuAction::new("Open", "open"), MenuAction::new("Drop", "drop")]
        }
    }

    fn row(controller: Box<dyn RowController<Task, &'static str>>) -> Row<Task, &'static str> {
        Row::new(RowId(1), Task::new(5, "Task"), controller)
    }

    #[test]
    fn menu_walks_and_chooses() {
        let mut row = row(Box::new(TwoActions));
        assert!(row.open_menu());
        row.move_menu(5);
        assert_eq!(row.menu(), Some(1));
        row.move_menu(-3);
        assert_eq!(row.menu(), Some(0));
        row.move_menu(1);
        assert_eq!(row.choose(), Some("drop"));
        assert_eq!(row.menu(), None);
    }

    #[test]
    fn static_rows_have_no_menu() {
        let mut row = row(Box::new(StaticRow));
        assert!(!row.open_menu());
        assert_eq!(row.choose(), None);
        assert_eq!(row.highlight(), RowHighlight::Plain);
    }

    #[test]
    fn cells_follow_columns() {
        let columns = vec![
            Some(ColumnConfig::new("Name").with_value(|t: &Task| t.name.clone())),
            None,
            Some(ColumnConfig::new("Id").with_value(|t: &Task| t.id.to_string())),
        ];
        let mut row = row(Box::new(StaticRow));
        row.refresh_cells(&columns);
        assert_eq!(row.cells(), ["Task", "", "5"]);

        row.set_cells(vec!["Total".to_string()]);
        row.refresh_cells(&columns);
        assert_eq!(row.cells(), ["Total"]);
    }
}
