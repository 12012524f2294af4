//! Column width layout.
//!
//! Auto-scaled columns share the row in proportion to their minimum widths.
//! A border allowance of `border_per_column` percent is reserved for every
//! auto-scaled column, and the total is scaled to 99 % so cells never wrap.
//! Full-width columns are drawn on their own line and span exactly the width
//! of the auto-scaled columns and the borders between them.
//!
//! Borders never take more than half of the usable row; a larger allowance is
//! scaled down so every column keeps some room.

use super::column::ColumnConfig;

/// Share of the row the auto-scaled columns are scaled into.
const USABLE_FRACTION: f64 = 0.99;

/// Largest share of the row the border allowance may take.
const MAX_BORDER_FRACTION: f64 = USABLE_FRACTION / 2.0;

/// Result of laying out a table's columns.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnLayout {
    /// Number of auto-scaled columns.
    pub auto_scaled: usize,
    /// Minimum width of a row, borders included.
    pub total_min_width: f64,
    /// Width of a row in percent; also the width of every full-width column.
    pub row_width: f64,
    /// Border allowance actually used between columns, in percent.
    pub border_per_column: f64,
}

/// Computes the width of every column and stores it on the column.
///
/// `None` slots are skipped. Fixed columns keep their declared percentage.
/// The computation depends only on the configuration, so running it again
/// yields the same widths.
///
/// # Examples
///
/// ```
/// use sprintboard_tui::table::{ColumnConfig, compute_widths};
///
/// let mut columns = vec![
///     Some(ColumnConfig::<()>::new("Name").with_min_width(30.0)),
///     None,
///     Some(ColumnConfig::<()>::new("State").with_min_width(12.0)),
///     Some(ColumnConfig::<()>::new("Description").full_width()),
/// ];
/// let layout = compute_widths(&mut columns, 0.4);
///
/// assert_eq!(columns[0].as_ref().unwrap().width(), Some(70.1));
/// assert_eq!(columns[2].as_ref().unwrap().width(), Some(28.1));
/// assert_eq!(layout.row_width, 98.6);
/// assert_eq!(columns[3].as_ref().unwrap().width(), Some(98.6));
/// ```
pub fn compute_widths<M>(
    columns: &mut [Option<ColumnConfig<M>>],
    border_per_column: f64,
) -> ColumnLayout {
    let auto_min_widths: Vec<f64> = columns
        .iter()
        .flatten()
        .filter(|column| column.is_auto_scale())
        .map(ColumnConfig::min_width)
        .collect();
    let auto_scaled = auto_min_widths.len();
    let mut total_min: f64 = auto_min_widths.iter().sum();

    if auto_scaled == 0 {
        for column in columns.iter_mut().flatten().filter(|c| c.is_full_width()) {
            column.set_width(0.0);
        }
        return ColumnLayout::default();
    }

    // Columns without minimum widths share the row equally.
    let equal_shares = total_min <= 0.0;
    if equal_shares {
        total_min = auto_scaled as f64;
    }

    let border_per_column =
        border_per_column.min(100.0 * MAX_BORDER_FRACTION / auto_scaled as f64);
    let border_fraction = border_per_column * auto_scaled as f64 / 100.0;
    let total_min_width = total_min * (1.0 + border_fraction);
    let available = USABLE_FRACTION - border_fraction;

    let mut total_width = 0.0;
    for column in columns.iter_mut().flatten().filter(|c| c.is_auto_scale()) {
        let min_width = if equal_shares { 1.0 } else { column.min_width() };
        let scaled_total = total_min / available;
        let width = (1000.0 * (min_width / scaled_total)).round() / 10.0;
        total_width += width;
        column.set_width(width);
    }

    total_width += border_per_column * (auto_scaled - 1) as f64;
    let row_width = (10.0 * total_width).round() / 10.0;

    for column in columns.iter_mut().flatten().filter(|c| c.is_full_width()) {
        column.set_width(row_width);
    }

    ColumnLayout {
        auto_scaled,
        total_min_width,
        row_width,
        border_per_column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn auto(min_width: f64) -> Option<ColumnConfig<()>> {
        Some(ColumnConfig::new("col").with_min_width(min_width))
    }

    fn widths(columns: &[Option<ColumnConfig<()>>]) -> Vec<Option<f64>> {
        columns.iter().map(|c| c.as_ref().and_then(ColumnConfig::width)).collect()
    }

    #[test]
    fn single_column_takes_nearly_everything() {
        let mut columns = vec![auto(10.0)];
        let layout = compute_widths(&mut columns, 0.4);
        // 10 / (10 / (0.99 - 0.004)) = 0.986
        assert_eq!(widths(&columns), vec![Some(98.6)]);
        assert_eq!(layout.row_width, 98.6);
        assert!((layout.total_min_width - 10.04).abs() < 1e-9);
    }

    #[test]
    fn none_slots_are_skipped() {
        let mut columns = vec![None, auto(20.0), None, auto(20.0)];
        let layout = compute_widths(&mut columns, 0.4);
        assert_eq!(layout.auto_scaled, 2);
        assert_eq!(widths(&columns), vec![None, Some(49.1), None, Some(49.1)]);
        assert_eq!(layout.row_width, 98.6);
    }

    #[test]
    fn fixed_columns_keep_their_percentage() {
        let mut columns = vec![auto(10.0), Some(ColumnConfig::new("Menu").fixed(8.0))];
        compute_widths(&mut columns, 0.4);
        assert_eq!(widths(&columns)[1], Some(8.0));
    }

    #[test]
    fn no_auto_scaled_columns() {
        let mut columns = vec![Some(ColumnConfig::<()>::new("Notes").full_width())];
        let layout = compute_widths(&mut columns, 0.4);
        assert_eq!(layout, ColumnLayout::default());
        assert_eq!(widths(&columns), vec![Some(0.0)]);
    }

    #[test]
    fn zero_minimum_widths_share_equally() {
        let mut columns = vec![auto(0.0), auto(0.0)];
        compute_widths(&mut columns, 0.0);
        assert_eq!(widths(&columns), vec![Some(49.5), Some(49.5)]);
    }

    #[test]
    fn layout_is_idempotent() {
        let mut columns = vec![auto(12.0), auto(7.0), auto(31.0)];
        let first = compute_widths(&mut columns, 0.4);
        let first_widths = widths(&columns);
        let second = compute_widths(&mut columns, 0.4);
        assert_eq!(first, second);
        assert_eq!(first_widths, widths(&columns));
    }

    #[test]
    fn oversized_borders_are_scaled_down() {
        let mut columns: Vec<_> = (0..24).map(|_| auto(5.0)).collect();
        let layout = compute_widths(&mut columns, 5.0);

        assert!(layout.border_per_column < 5.0);
        assert!(widths(&columns).iter().all(|w| w.is_some_and(|w| w > 0.0)));
        assert!(layout.row_width <= 100.0);
    }

    proptest! {
        /// Auto-scaled widths plus borders never exceed the row, and
        /// full-width columns get exactly the row width.
        #[test]
        fn widths_fit_in_row(
            mins in proptest::collection::vec(1.0f64..80.0, 1..20),
            border in 0.0f64..=5.0,
        ) {
            let mut columns: Vec<_> = mins.iter().map(|&m| auto(m)).collect();
            columns.push(Some(ColumnConfig::new("Description").full_width()));

            let layout = compute_widths(&mut columns, border);
            let auto_sum: f64 = columns[..mins.len()]
                .iter()
                .filter_map(|c| c.as_ref().and_then(ColumnConfig::width))
                .sum();
            prop_assert!(layout.border_per_column <= border);
            let with_borders = auto_sum + layout.border_per_column * (mins.len() - 1) as f64;

            prop_assert!(with_borders <= 100.0 + 1e-9);
            prop_assert!((layout.row_width - with_borders).abs() <= 0.05 + 1e-9);
            prop_assert_eq!(
                columns.last().and_then(|c| c.as_ref()).and_then(ColumnConfig::width),
                Some(layout.row_width)
            );
        }
    }
}
