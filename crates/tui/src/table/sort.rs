//! Sort state of a table.
//!
//! Only the data rows are sorted. Header indicators are derived from the
//! state, so selecting a new column implicitly resets every other header.

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Returns the header indicator.
    #[must_use]
    pub const fn indicator(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Which column the data rows are sorted by.
///
/// # Examples
///
/// ```
/// use sprintboard_tui::table::{SortDirection, SortState};
///
/// let mut state = SortState::default();
/// state.select(2);
/// assert_eq!(state, SortState { column: Some(2), direction: SortDirection::Ascending });
///
/// state.select(2);
/// assert_eq!(state.direction, SortDirection::Descending);
///
/// state.select(0);
/// assert_eq!(state, SortState { column: Some(0), direction: SortDirection::Ascending });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SortState {
    /// Sort column; `None` only until a column is first selected.
    pub column: Option<usize>,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortState {
    /// Creates an ascending state on the given column.
    #[must_use]
    pub const fn new(column: Option<usize>) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }

    /// Handles a header click: toggles the direction of the active column,
    /// or selects another column ascending.
    pub fn select(&mut self, column: usize) {
        if self.column == Some(column) {
            self.direction = self.direction.toggled();
        } else {
            *self = Self::new(Some(column));
        }
    }

    /// Returns the indicator to draw on the header of `column`, if any.
    #[must_use]
    pub fn indicator_for(&self, column: usize) -> Option<&'static str> {
        (self.column == Some(column)).then(|| self.direction.indicator())
    }
}

/// Notifications a table publishes to its listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableEvent {
    /// The data rows were sorted.
    Sorted {
        /// The sort column.
        column: usize,
        /// The sort direction.
        direction: SortDirection,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_only_on_active_column() {
        let mut state = SortState::new(Some(1));
        assert_eq!(state.indicator_for(1), Some("▲"));
        assert_eq!(state.indicator_for(0), None);

        state.select(1);
        assert_eq!(state.indicator_for(1), Some("▼"));
    }
}
