//! Table configuration.

use std::fmt;

use super::column::ColumnConfig;
use super::row::RowController;

/// Default border allowance per auto-scaled column, in percent.
pub const DEFAULT_BORDER_PER_COLUMN: f64 = 0.4;

/// Produces the data rows of a table from its parent model.
pub type DataSource<P, M> = Box<dyn Fn(&P) -> Vec<M> + Send + Sync>;

/// Builds the controller of a row created from the data source.
pub type RowFactory<M, C> = Box<dyn Fn(&M) -> Box<dyn RowController<M, C>> + Send + Sync>;

/// Title line drawn above the header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Caption {
    /// Caption text.
    pub title: String,
    /// Key hints shown on the right of the caption, such as `"s sort"`.
    pub actions: Vec<String>,
}

impl Caption {
    /// Creates a caption without action hints.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            actions: Vec::new(),
        }
    }

    /// Adds an action hint.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }
}

/// Everything a [`TableView`](super::TableView) needs to know about its
/// shape and data.
///
/// `P` is the parent model the data source reads from, `M` the row model,
/// and `C` the command type row controllers produce.
///
/// # Examples
///
/// ```
/// use sprintboard_protocol::{DailyWork, Task};
/// use sprintboard_tui::table::{Caption, ColumnConfig, StaticRow, TableConfig};
///
/// let config: TableConfig<DailyWork, Task, ()> = TableConfig::new(|_task| Box::new(StaticRow))
///     .with_caption(Caption::new("Daily work"))
///     .with_column(ColumnConfig::new("Name").with_min_width(30.0))
///     .with_empty_column()
///     .with_data_source(|work: &DailyWork| work.tasks().to_vec());
///
/// assert_eq!(config.columns().len(), 2);
/// assert!(config.columns()[1].is_none());
/// ```
pub struct TableConfig<P, M, C> {
    pub(crate) columns: Vec<Option<ColumnConfig<M>>>,
    caption: Option<Caption>,
    data_source: Option<DataSource<P, M>>,
    row_factory: RowFactory<M, C>,
    border_per_column: f64,
}

impl<P, M, C> TableConfig<P, M, C> {
    /// Creates a configuration with no columns, no caption, and no data
    /// source.
    #[must_use]
    pub fn new<F>(row_factory: F) -> Self
    where
        F: Fn(&M) -> Box<dyn RowController<M, C>> + Send + Sync + 'static,
    {
        Self {
            columns: Vec::new(),
            caption: None,
            data_source: None,
            row_factory: Box::new(row_factory),
            border_per_column: DEFAULT_BORDER_PER_COLUMN,
        }
    }

    /// Appends a column.
    #[must_use]
    pub fn with_column(mut self, column: ColumnConfig<M>) -> Self {
        self.columns.push(Some(column));
        self
    }

    /// Appends an empty slot; no column is drawn at that index.
    #[must_use]
    pub fn with_empty_column(mut self) -> Self {
        self.columns.push(None);
        self
    }

    /// Sets the caption.
    #[must_use]
    pub fn with_caption(mut self, caption: Caption) -> Self {
        self.caption = Some(caption);
        self
    }

    /// Sets the data source.
    #[must_use]
    pub fn with_data_source<F>(mut self, data_source: F) -> Self
    where
        F: Fn(&P) -> Vec<M> + Send + Sync + 'static,
    {
        self.data_source = Some(Box::new(data_source));
        self
    }

    /// Sets the border allowance per auto-scaled column.
    #[must_use]
    pub fn with_border_per_column(mut self, border_per_column: f64) -> Self {
        self.border_per_column = border_per_column;
        self
    }

    /// Returns the column slots.
    #[must_use]
    pub fn columns(&self) -> &[Option<ColumnConfig<M>>] {
        &self.columns
    }

    /// Returns the column at `index`, if that slot holds one.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&ColumnConfig<M>> {
        self.columns.get(index).and_then(Option::as_ref)
    }

    /// Returns the caption.
    #[must_use]
    pub fn caption(&self) -> Option<&Caption> {
        self.caption.as_ref()
    }

    /// Returns the data source.
    #[must_use]
    pub fn data_source(&self) -> Option<&DataSource<P, M>> {
        self.data_source.as_ref()
    }

    /// Builds the controller of a data-source row.
    #[must_use]
    pub fn create_controller(&self, model: &M) -> Box<dyn RowController<M, C>> {
        (self.row_factory)(model)
    }

    /// Returns the border allowance per auto-scaled column.
    #[must_use]
    pub fn border_per_column(&self) -> f64 {
        self.border_per_column
    }
}

impl<P, M, C> fmt::Debug for TableConfig<P, M, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableConfig")
            .field("columns", &self.columns)
            .field("caption", &self.caption)
            .field("has_data_source", &self.data_source.is_some())
            .field("border_per_column", &self.border_per_column)
            .finish_non_exhaustive()
    }
}
