//! The dynamic table subsystem.
//!
//! # Overview
//!
//! - [`column`]: per-column configuration (title, width mode, comparator)
//! - [`width`]: percentage layout of auto-scaled and full-width columns
//! - [`row`]: rows, row controllers, and action menus
//! - [`config`]: the table configuration a view is built from
//! - [`sort`]: sort state and the sorted notification
//! - [`view`]: the reconciling [`TableView`]
//! - [`vertical`]: the label/value [`VerticalTableView`]
//!
//! Drawing lives in [`crate::widgets::table`]; this module only holds state.

pub mod column;
pub mod config;
pub mod row;
pub mod sort;
pub mod vertical;
pub mod view;
pub mod width;

pub use column::{CellValue, ColumnConfig, Comparator, WidthMode};
pub use config::{Caption, DEFAULT_BORDER_PER_COLUMN, DataSource, RowFactory, TableConfig};
pub use row::{MenuAction, Row, RowController, RowHighlight, RowId, RowPosition, StaticRow};
pub use sort::{SortDirection, SortState, TableEvent};
pub use vertical::{VerticalRow, VerticalTableView};
pub use view::{ReconcileReport, TableView};
pub use width::{ColumnLayout, compute_widths};
