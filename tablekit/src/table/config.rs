//! Table configuration.

use crate::focus::LayoutDirection;
use crate::layout::{RowHeight, Scale};
use crate::selection::SelectionMode;
use crate::virtualizer::{DEFAULT_LOAD_MORE_FACTOR, DEFAULT_OVERSCAN};

/// Options fixed at table construction, all with defaults.
///
/// ```
/// use tablekit::{SelectionMode, TableConfig, Scale};
///
/// let config = TableConfig::default()
///     .with_selection_mode(SelectionMode::Multiple)
///     .with_scale(Scale::Large)
///     .with_overscan(4);
/// assert_eq!(config.overscan, 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    pub scale: Scale,
    pub row_height: RowHeight,
    pub selection_mode: SelectionMode,
    pub direction: LayoutDirection,
    /// Extra rows materialized past each viewport edge.
    pub overscan: usize,
    /// Request more rows once less than this many viewports remain below.
    pub load_more_factor: f64,
    /// Show an empty-state row when idle without rows.
    pub show_empty_state: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            scale: Scale::default(),
            row_height: RowHeight::default(),
            selection_mode: SelectionMode::default(),
            direction: LayoutDirection::default(),
            overscan: DEFAULT_OVERSCAN,
            load_more_factor: DEFAULT_LOAD_MORE_FACTOR,
            show_empty_state: false,
        }
    }
}

impl TableConfig {
    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_row_height(mut self, row_height: RowHeight) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Set the load-more threshold. Negative or non-finite factors are
    /// replaced by the default.
    pub fn with_load_more_factor(mut self, factor: f64) -> Self {
        self.load_more_factor = if factor.is_finite() && factor >= 0.0 {
            factor
        } else {
            log::warn!("[table] invalid load-more factor {}, using default", factor);
            DEFAULT_LOAD_MORE_FACTOR
        };
        self
    }

    pub fn with_empty_state(mut self) -> Self {
        self.show_empty_state = true;
        self
    }
}
