//! Settings of the board widgets: the task table, the backlog chooser, and
//! the daily-work view.

use serde::{Deserialize, Serialize};
use sprintboard_protocol::{BacklogId, DailyWorkViewType};

use crate::error::{ConfigError, Result};

/// Default border allowance per column, in percent of the row width.
pub const DEFAULT_BORDER_PER_COLUMN: f64 = 0.4;

/// Largest accepted border allowance per column.
pub const MAX_BORDER_PER_COLUMN: f64 = 5.0;

/// Table layout settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableSettings {
    /// Percentage of the row width reserved between two columns.
    #[serde(default = "default_border")]
    pub border_per_column: f64,
}

fn default_border() -> f64 {
    DEFAULT_BORDER_PER_COLUMN
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            border_per_column: DEFAULT_BORDER_PER_COLUMN,
        }
    }
}

impl TableSettings {
    /// Validates the border allowance.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBorder`] when the value is negative,
    /// not finite, or above [`MAX_BORDER_PER_COLUMN`].
    pub fn validate(&self) -> Result<()> {
        let value = self.border_per_column;
        if value.is_finite() && (0.0..=MAX_BORDER_PER_COLUMN).contains(&value) {
            Ok(())
        } else {
            Err(ConfigError::InvalidBorder {
                value,
                min: 0.0,
                max: MAX_BORDER_PER_COLUMN,
            })
        }
    }
}

/// Backlogs pre-selected when the chooser opens.
///
/// # Examples
///
/// ```
/// use sprintboard_config::ChooserSettings;
///
/// let chooser: ChooserSettings =
///     serde_json::from_str(r#"{"selected_products": [1, 2]}"#).unwrap();
/// assert_eq!(chooser.selected_products, vec![1, 2]);
/// assert!(chooser.selected_iterations.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChooserSettings {
    /// Pre-selected product ids.
    #[serde(default)]
    pub selected_products: Vec<BacklogId>,
    /// Pre-selected project ids.
    #[serde(default)]
    pub selected_projects: Vec<BacklogId>,
    /// Pre-selected iteration ids.
    #[serde(default)]
    pub selected_iterations: Vec<BacklogId>,
}

/// Daily-work view settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWorkSettings {
    /// Which section of the daily work is shown.
    #[serde(default)]
    pub view_type: DailyWorkViewType,
}
