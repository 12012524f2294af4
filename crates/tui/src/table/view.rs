//! The dynamic table view.
//!
//! A [`TableView`] keeps three ordered groups of rows. Top and bottom rows
//! are pinned and created by hand. Middle rows are the data rows: they come
//! from the configured data source, are reconciled against it on every
//! [`render`](TableView::render), and are the only rows that get sorted.

use std::collections::HashSet;
use std::fmt;

use sprintboard_protocol::{Delivery, EventChannel, IdentityHash, ListenerId, ModelEvent, RowModel};
use tracing::{debug, instrument, trace};

use super::config::TableConfig;
use super::row::{Row, RowController, RowId, RowPosition};
use super::sort::{SortDirection, SortState, TableEvent};
use super::width::{ColumnLayout, compute_widths};

/// What a render changed among the data rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileReport {
    /// Rows created for models that were not shown yet.
    pub created: usize,
    /// Rows removed because their model disappeared.
    pub removed: usize,
}

/// A sortable, model-driven table with pinned top and bottom rows.
///
/// # Examples
///
/// ```
/// use sprintboard_protocol::{DailyWork, Task};
/// use sprintboard_tui::table::{ColumnConfig, StaticRow, TableConfig, TableView};
///
/// let config: TableConfig<DailyWork, Task, ()> = TableConfig::new(|_| Box::new(StaticRow))
///     .with_column(
///         ColumnConfig::new("Name")
///             .with_min_width(30.0)
///             .with_value(|task: &Task| task.name.clone())
///             .with_comparator(|a: &Task, b: &Task| a.name.cmp(&b.name))
///             .default_sort(),
///     )
///     .with_data_source(|work: &DailyWork| work.tasks().to_vec());
///
/// let mut work = DailyWork::new(1);
/// work.push(Task::new(1, "Write tests"));
/// work.push(Task::new(2, "Fix build"));
///
/// let mut table = TableView::new(config, work);
/// let report = table.render();
/// assert_eq!(report.created, 2);
/// assert_eq!(table.data_row_at(0).map(|row| row.model().id), Some(2));
/// ```
pub struct TableView<P, M, C> {
    config: TableConfig<P, M, C>,
    parent: P,
    layout: ColumnLayout,
    top: Vec<Row<M, C>>,
    middle: Vec<Row<M, C>>,
    bottom: Vec<Row<M, C>>,
    row_hashes: HashSet<IdentityHash>,
    sort: SortState,
    header_visible: bool,
    next_row_id: u64,
    events: EventChannel<TableEvent>,
}

impl<P, M, C> TableView<P, M, C>
where
    M: RowModel + Clone,
{
    /// Creates an empty view, laying out the columns and picking the first
    /// default-sort column.
    ///
    /// Nothing is fetched until [`render`](Self::render) is called.
    #[must_use]
    pub fn new(mut config: TableConfig<P, M, C>, parent: P) -> Self {
        let border = config.border_per_column();
        let layout = compute_widths(&mut config.columns, border);
        let default_sort = config
            .columns()
            .iter()
            .position(|column| column.as_ref().is_some_and(|c| c.is_default_sort()));

        Self {
            config,
            parent,
            layout,
            top: Vec::new(),
            middle: Vec::new(),
            bottom: Vec::new(),
            row_hashes: HashSet::new(),
            sort: SortState::new(default_sort),
            header_visible: false,
            next_row_id: 0,
            events: EventChannel::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &TableConfig<P, M, C> {
        &self.config
    }

    /// Returns the column layout.
    #[must_use]
    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    /// Returns the parent model.
    #[must_use]
    pub fn parent(&self) -> &P {
        &self.parent
    }

    /// Returns the parent model for modification. Call
    /// [`render`](Self::render) afterwards to pick up the changes.
    pub fn parent_mut(&mut self) -> &mut P {
        &mut self.parent
    }

    /// Returns the sort state.
    #[must_use]
    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Returns `true` if the header is shown, which is the case whenever the
    /// table has at least one row.
    #[must_use]
    pub fn is_header_visible(&self) -> bool {
        self.header_visible
    }

    /// Returns the pinned top rows.
    #[must_use]
    pub fn top_rows(&self) -> &[Row<M, C>] {
        &self.top
    }

    /// Returns the data rows in display order.
    #[must_use]
    pub fn middle_rows(&self) -> &[Row<M, C>] {
        &self.middle
    }

    /// Returns the pinned bottom rows.
    #[must_use]
    pub fn bottom_rows(&self) -> &[Row<M, C>] {
        &self.bottom
    }

    /// Returns every row in drawing order: top, middle, bottom.
    pub fn rows(&self) -> impl Iterator<Item = &Row<M, C>> {
        self.top.iter().chain(&self.middle).chain(&self.bottom)
    }

    /// Returns the total number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.top.len() + self.middle.len() + self.bottom.len()
    }

    /// Returns the identities of the data rows.
    #[must_use]
    pub fn row_hashes(&self) -> &HashSet<IdentityHash> {
        &self.row_hashes
    }

    /// Returns the data row at a display index.
    #[must_use]
    pub fn data_row_at(&self, index: usize) -> Option<&Row<M, C>> {
        self.middle.get(index)
    }

    /// Returns the data row at a display index for modification.
    pub fn data_row_at_mut(&mut self, index: usize) -> Option<&mut Row<M, C>> {
        self.middle.get_mut(index)
    }

    /// Returns the row with the given id from any group.
    #[must_use]
    pub fn row(&self, id: RowId) -> Option<&Row<M, C>> {
        self.rows().find(|row| row.id() == id)
    }

    /// Returns the row with the given id from any group for modification.
    pub fn row_mut(&mut self, id: RowId) -> Option<&mut Row<M, C>> {
        self.top
            .iter_mut()
            .chain(&mut self.middle)
            .chain(&mut self.bottom)
            .find(|row| row.id() == id)
    }

    /// Pulls the current models from the data source, reconciles the data
    /// rows with them, sorts, and refreshes every row's cells.
    ///
    /// Rows whose model is still present keep their id and menu state; their
    /// model is replaced by the fetched value. Without a data source only
    /// sorting and cell refresh happen.
    #[instrument(skip(self), fields(rows = self.middle.len()))]
    pub fn render(&mut self) -> ReconcileReport {
        let fetched = self.config.data_source().map(|source| source(&self.parent));
        let report = fetched.map_or_else(ReconcileReport::default, |models| self.reconcile(models));
        if report != ReconcileReport::default() {
            debug!(created = report.created, removed = report.removed, "reconciled data rows");
        }

        self.apply_sort();
        let columns = self.config.columns();
        for row in self.top.iter_mut().chain(&mut self.middle).chain(&mut self.bottom) {
            row.refresh_cells(columns);
        }
        self.header_visible = self.row_count() > 0;
        report
    }

    fn reconcile(&mut self, models: Vec<M>) -> ReconcileReport {
        let fetched: HashSet<IdentityHash> = models.iter().map(RowModel::identity_hash).collect();

        let before = self.middle.len();
        self.middle.retain(|row| fetched.contains(&row.identity()));
        let removed = before - self.middle.len();
        self.row_hashes.retain(|hash| fetched.contains(hash));

        let mut created = 0;
        for model in models {
            let hash = model.identity_hash();
            if self.row_hashes.contains(&hash) {
                if let Some(row) = self.middle.iter_mut().find(|row| row.identity() == hash) {
                    row.replace_model(model);
                }
                continue;
            }
            let controller = self.config.create_controller(&model);
            let row = Row::new(self.allocate_id(), model, controller);
            self.row_hashes.insert(hash);
            self.middle.push(row);
            created += 1;
        }

        ReconcileReport { created, removed }
    }

    /// Adds a row by hand and renders.
    ///
    /// Top rows are prepended to the top group and bottom rows appended to
    /// the bottom group. A middle row is refused, returning `None`, when a
    /// data row with the same identity exists.
    ///
    /// A middle row whose model is not produced by the data source is
    /// removed again by the render that follows.
    pub fn create_row(
        &mut self,
        controller: Box<dyn RowController<M, C>>,
        model: M,
        position: RowPosition,
    ) -> Option<RowId> {
        let id = match position {
            RowPosition::Top => {
                let id = self.allocate_id();
                self.top.insert(0, Row::new(id, model, controller));
                id
            }
            RowPosition::Bottom => {
                let id = self.allocate_id();
                self.bottom.push(Row::new(id, model, controller));
                id
            }
            RowPosition::Middle => {
                let hash = model.identity_hash();
                if self.row_hashes.contains(&hash) {
                    trace!(?hash, "refusing duplicate data row");
                    return None;
                }
                let id = self.allocate_id();
                self.row_hashes.insert(hash);
                self.middle.push(Row::new(id, model, controller));
                id
            }
        };
        self.render();
        Some(id)
    }

    /// Replaces the cells of a row with fixed text that renders no longer
    /// update. Returns `false` if the row does not exist.
    pub fn set_row_cells(&mut self, id: RowId, cells: Vec<String>) -> bool {
        match self.row_mut(id) {
            Some(row) => {
                row.set_cells(cells);
                true
            }
            None => false,
        }
    }

    /// Removes a row from whichever group holds it. Returns `false` if there
    /// is no such row.
    pub fn remove_row(&mut self, id: RowId) -> bool {
        if let Some(index) = self.middle.iter().position(|row| row.id() == id) {
            let row = self.middle.remove(index);
            self.row_hashes.remove(&row.identity());
        } else if let Some(index) = self.bottom.iter().position(|row| row.id() == id) {
            self.bottom.remove(index);
        } else if let Some(index) = self.top.iter().position(|row| row.id() == id) {
            self.top.remove(index);
        } else {
            return false;
        }
        self.header_visible = self.row_count() > 0;
        true
    }

    /// Removes every row.
    pub fn clear(&mut self) {
        self.top.clear();
        self.middle.clear();
        self.bottom.clear();
        self.row_hashes.clear();
        self.header_visible = false;
    }

    /// Reacts to a change of the parent model: edits and relation updates
    /// re-render, a deletion removes every row.
    pub fn handle_model_event<E>(&mut self, event: &ModelEvent<E>) {
        match event {
            ModelEvent::Edit(_) | ModelEvent::RelationUpdate => {
                self.render();
            }
            ModelEvent::Delete => self.clear(),
        }
    }

    /// Moves a data row to a new display index and asks its controller what
    /// the move means, passing the model now directly above it.
    ///
    /// Returns `None` when either index is out of range or the controller has
    /// nothing to do.
    pub fn move_row(&mut self, from: usize, to: usize) -> Option<C> {
        if from >= self.middle.len() || to >= self.middle.len() {
            return None;
        }
        let row = self.middle.remove(from);
        self.middle.insert(to, row);

        let previous = to.checked_sub(1).and_then(|i| self.middle.get(i)).map(Row::model);
        self.middle[to].controller().reordered(previous)
    }

    /// Handles a header click on `column`.
    ///
    /// Absent and unsortable columns are ignored and `false` is returned.
    /// Clicking the active column toggles the direction, any other column is
    /// selected ascending. The data rows are re-sorted immediately.
    pub fn sort_by_column(&mut self, column: usize) -> bool {
        if !self.config.column(column).is_some_and(|c| c.is_sortable()) {
            return false;
        }
        self.sort.select(column);
        debug!(column, direction = ?self.sort.direction, "sort column selected");
        self.apply_sort();
        true
    }

    /// Registers a listener for [`TableEvent::Sorted`] notifications.
    pub fn on_sorted<F>(&mut self, mut listener: F) -> ListenerId
    where
        F: FnMut(&TableEvent) + Send + 'static,
    {
        self.events.subscribe(move |event| {
            listener(event);
            Delivery::Keep
        })
    }

    /// Unregisters a sort listener.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    fn apply_sort(&mut self) {
        let Some(column) = self.sort.column else {
            return;
        };
        let Some(comparator) = self.config.column(column).and_then(|c| c.comparator()) else {
            return;
        };
        let direction = self.sort.direction;
        // Ties keep creation order; descending is the exact reverse.
        self.middle
            .sort_by(|a, b| comparator(a.model(), b.model()).then(a.id().cmp(&b.id())));
        if direction == SortDirection::Descending {
            self.middle.reverse();
        }
        self.events.publish(&TableEvent::Sorted { column, direction });
    }

    fn allocate_id(&mut self) -> RowId {
        self.next_row_id += 1;
        RowId(self.next_row_id)
    }
}

impl<P: fmt::Debug, M: fmt::Debug, C> fmt::Debug for TableView<P, M, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("parent", &self.parent)
            .field("layout", &self.layout)
            .field("top", &self.top)
            .field("middle", &self.middle)
            .field("bottom", &self.bottom)
            .field("sort", &self.sort)
            .finish_non_exhaustive()
    }
}
