//! Column configuration.
//!
//! A column names a header, decides how wide it is, and optionally knows how
//! to render a model into a cell and how to order two models.

use std::cmp::Ordering;
use std::fmt;

/// Orders two row models for a sortable column.
pub type Comparator<M> = Box<dyn Fn(&M, &M) -> Ordering + Send + Sync>;

/// Renders a row model into the text of one cell.
pub type CellValue<M> = Box<dyn Fn(&M) -> String + Send + Sync>;

/// How a column's width is determined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidthMode {
    /// Width derived from the column's minimum width relative to its
    /// auto-scaled siblings.
    AutoScale,
    /// Spans the whole row; drawn on its own line under the row.
    FullWidth,
    /// A fixed percentage of the table width.
    Fixed(f64),
}

/// Configuration of one table column.
///
/// # Examples
///
/// ```
/// use sprintboard_protocol::Task;
/// use sprintboard_tui::table::ColumnConfig;
///
/// let column = ColumnConfig::<Task>::new("Name")
///     .with_min_width(30.0)
///     .with_value(|task| task.name.clone())
///     .with_comparator(|a, b| a.name.cmp(&b.name))
///     .with_tooltip("Task name");
///
/// assert!(column.is_sortable());
/// assert_eq!(column.cell(&Task::new(1, "Write docs")), "Write docs");
/// ```
pub struct ColumnConfig<M> {
    title: String,
    width_mode: WidthMode,
    min_width: f64,
    width: Option<f64>,
    sortable: bool,
    default_sort: bool,
    tooltip: Option<String>,
    comparator: Option<Comparator<M>>,
    value: Option<CellValue<M>>,
}

impl<M> ColumnConfig<M> {
    /// Creates an auto-scaled, unsortable column with no minimum width.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width_mode: WidthMode::AutoScale,
            min_width: 0.0,
            width: None,
            sortable: false,
            default_sort: false,
            tooltip: None,
            comparator: None,
            value: None,
        }
    }

    /// Sets the minimum width used by auto-scaling.
    #[must_use]
    pub fn with_min_width(mut self, min_width: f64) -> Self {
        self.min_width = min_width;
        self
    }

    /// Makes the column span the whole row.
    #[must_use]
    pub fn full_width(mut self) -> Self {
        self.width_mode = WidthMode::FullWidth;
        self
    }

    /// Gives the column a fixed percentage of the table width.
    #[must_use]
    pub fn fixed(mut self, percent: f64) -> Self {
        self.width_mode = WidthMode::Fixed(percent);
        self.width = Some(percent);
        self
    }

    /// Marks the column sortable without a comparator; sorting by it then
    /// leaves the row order unchanged.
    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Sets the comparator and marks the column sortable.
    #[must_use]
    pub fn with_comparator<F>(mut self, comparator: F) -> Self
    where
        F: Fn(&M, &M) -> Ordering + Send + Sync + 'static,
    {
        self.sortable = true;
        self.comparator = Some(Box::new(comparator));
        self
    }

    /// Makes this the column the table is sorted by initially.
    #[must_use]
    pub fn default_sort(mut self) -> Self {
        self.default_sort = true;
        self
    }

    /// Sets the header tooltip.
    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Sets how a model is rendered into this column's cell.
    #[must_use]
    pub fn with_value<F>(mut self, value: F) -> Self
    where
        F: Fn(&M) -> String + Send + Sync + 'static,
    {
        self.value = Some(Box::new(value));
        self
    }

    /// Returns the header title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the width mode.
    #[must_use]
    pub fn width_mode(&self) -> WidthMode {
        self.width_mode
    }

    /// Returns `true` for auto-scaled columns.
    #[must_use]
    pub fn is_auto_scale(&self) -> bool {
        self.width_mode == WidthMode::AutoScale
    }

    /// Returns `true` for full-width columns.
    #[must_use]
    pub fn is_full_width(&self) -> bool {
        self.width_mode == WidthMode::FullWidth
    }

    /// Returns the minimum width.
    #[must_use]
    pub fn min_width(&self) -> f64 {
        self.min_width
    }

    /// Returns the computed width in percent, once laid out.
    #[must_use]
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    pub(crate) fn set_width(&mut self, width: f64) {
        self.width = Some(width);
    }

    /// Returns `true` if clicking the header sorts by this column.
    #[must_use]
    pub fn is_sortable(&self) -> bool {
        self.sortable
    }

    /// Returns `true` if the table starts sorted by this column.
    #[must_use]
    pub fn is_default_sort(&self) -> bool {
        self.default_sort
    }

    /// Returns the header tooltip.
    #[must_use]
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Returns the comparator, if any.
    #[must_use]
    pub fn comparator(&self) -> Option<&Comparator<M>> {
        self.comparator.as_ref()
    }

    /// Renders a model into this column's cell; empty without a value
    /// function.
    #[must_use]
    pub fn cell(&self, model: &M) -> String {
        self.value.as_ref().map(|value| value(model)).unwrap_or_default()
    }
}

impl<M> fmt::Debug for ColumnConfig<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnConfig")
            .field("title", &self.title)
            .field("width_mode", &self.width_mode)
            .field("min_width", &self.min_width)
            .field("width", &self.width)
            .field("sortable", &self.sortable)
            .field("default_sort", &self.default_sort)
            .field("tooltip", &self.tooltip)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_column_defaults() {
        let column = ColumnConfig::<u32>::new("Effort");
        assert!(column.is_auto_scale());
        assert!(!column.is_sortable());
        assert!(column.width().is_none());
        assert_eq!(column.cell(&5), "");
    }

    #[test]
    fn fixed_column_has_width_up_front() {
        let column = ColumnConfig::<u32>::new("Actions").fixed(12.5);
        assert_eq!(column.width_mode(), WidthMode::Fixed(12.5));
        assert_eq!(column.width(), Some(12.5));
    }

    #[test]
    fn sortable_without_comparator() {
        let column = ColumnConfig::<u32>::new("Owner").sortable();
        assert!(column.is_sortable());
        assert!(column.comparator().is_none());
    }

    #[test]
    fn comparator_orders_models() {
        let column = ColumnConfig::<u32>::new("Rank").with_comparator(|a, b| a.cmp(b));
        let cmp = column.comparator().unwrap();
        assert_eq!(cmp(&1, &2), Ordering::Less);
    }
}
