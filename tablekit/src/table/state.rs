//! Table state.

use std::collections::HashSet;
use std::fmt;
use std::ops::Range;

use crate::column::{Column, ColumnKind, ColumnTree};
use crate::error::{Result, TableError};
use crate::event::TableEvent;
use crate::focus::{CellCoord, Focus, FocusGrid, FocusNavigator, GridRow, LayoutDirection};
use crate::layout::{self, BodyState, ColumnLayout, Measure, RowHeight, RowLayout, RowLayoutInput, Scale};
use crate::selection::{SelectionCoordinator, SelectionMode, Tristate};
use crate::sort::{ColumnSort, SortDescriptor};
use crate::virtualizer::{self, LoadMoreLatch};

use super::config::TableConfig;
use super::item::TableRow;

/// Focusable elements inside a cell: the checkbox in the selection column,
/// otherwise whatever the row reports. Data headers have none.
pub(super) fn cell_children<'a, T: TableRow>(
    tree: &'a ColumnTree,
    rows: &'a [T],
) -> impl Fn(CellCoord) -> usize + 'a {
    move |cell: CellCoord| {
        let Some(leaf) = tree.leaf(cell.column) else {
            return 0;
        };
        match (leaf.kind, cell.row) {
            (ColumnKind::Selection, _) => 1,
            (ColumnKind::Data, GridRow::Body(row)) => rows
                .get(row)
                .map(|r| r.focusable_children(&leaf.key))
                .unwrap_or(0),
            (ColumnKind::Data, GridRow::Header(_)) => 0,
        }
    }
}

/// A headless, virtualized data table.
///
/// `Table<T>` owns the column tree, the rows and every piece of interaction
/// state:
/// - Column and row geometry, recomputed whenever an input changes
/// - Virtualized scrolling with a debounced load-more request
/// - Grid focus over header tiers and body cells
/// - Key-based selection with a select-all tri-state
/// - Sort state (applied by the host)
///
/// Handlers queue [`TableEvent`]s which the host collects with
/// [`drain_events`](Table::drain_events).
pub struct Table<T: TableRow> {
    pub(super) columns: Vec<Column>,
    pub(super) tree: ColumnTree,
    pub(super) rows: Vec<T>,
    pub(super) config: TableConfig,
    viewport_width: f64,
    viewport_height: f64,
    column_layout: ColumnLayout,
    row_layout: RowLayout,
    pub(super) grid: FocusGrid,
    pub(super) navigator: FocusNavigator,
    pub(super) selection: SelectionCoordinator,
    pub(super) sort: Option<SortDescriptor>,
    scroll_offset: f64,
    load_more: LoadMoreLatch,
    body_state: BodyState,
    measure: Option<Box<dyn Measure>>,
    events: Vec<TableEvent>,
}

impl<T: TableRow> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.tree.leaf_count())
            .field("rows", &self.rows.len())
            .field("config", &self.config)
            .field("viewport", &(self.viewport_width, self.viewport_height))
            .field("focus", &self.navigator.focus())
            .field("selection", &self.selection)
            .field("sort", &self.sort)
            .field("scroll_offset", &self.scroll_offset)
            .field("body_state", &self.body_state)
            .finish()
    }
}

impl<T: TableRow> Table<T> {
    /// Create an empty table.
    pub fn new(columns: Vec<Column>, config: TableConfig) -> Result<Self> {
        let with_selection = config.selection_mode == SelectionMode::Multiple;
        let tree = ColumnTree::new(&columns, with_selection)?;
        let mut table = Self {
            columns,
            tree,
            rows: Vec::new(),
            navigator: FocusNavigator::new(config.direction),
            selection: SelectionCoordinator::new(config.selection_mode),
            load_more: LoadMoreLatch::new(config.load_more_factor),
            config,
            viewport_width: 0.0,
            viewport_height: 0.0,
            column_layout: ColumnLayout::default(),
            row_layout: RowLayout::default(),
            grid: FocusGrid::default(),
            sort: None,
            scroll_offset: 0.0,
            body_state: BodyState::Idle,
            measure: None,
            events: Vec::new(),
        };
        table.relayout();
        Ok(table)
    }

    /// Create a table with initial rows.
    pub fn with_rows(columns: Vec<Column>, config: TableConfig, rows: Vec<T>) -> Result<Self> {
        let mut table = Self::new(columns, config)?;
        table.set_rows(rows)?;
        table.events.clear();
        Ok(table)
    }

    // -------------------------------------------------------------------------
    // Columns and configuration
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_tree(&self) -> &ColumnTree {
        &self.tree
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Replace the column definitions. On error the table is unchanged.
    pub fn set_columns(&mut self, columns: Vec<Column>) -> Result<()> {
        let with_selection = self.config.selection_mode == SelectionMode::Multiple;
        self.tree = ColumnTree::new(&columns, with_selection)?;
        self.columns = columns;
        if self
            .sort
            .as_ref()
            .is_some_and(|s| self.tree.find(&s.column).is_none())
        {
            self.sort = None;
        }
        self.relayout();
        Ok(())
    }

    /// Change the selection mode. Switching in or out of multiple selection
    /// adds or removes the checkbox column.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) -> Result<()> {
        if self.config.selection_mode == mode {
            return Ok(());
        }
        self.tree = ColumnTree::new(&self.columns, mode == SelectionMode::Multiple)?;
        self.config.selection_mode = mode;
        let before = self.selection.selected_keys();
        self.selection.set_mode(mode);
        if self.selection.selected_keys() != before {
            self.push_selection_change();
        }
        self.relayout();
        Ok(())
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.config.selection_mode
    }

    pub fn set_scale(&mut self, scale: Scale) {
        self.config.scale = scale;
        self.relayout();
    }

    pub fn set_row_height(&mut self, row_height: RowHeight) {
        self.config.row_height = row_height;
        self.relayout();
    }

    pub fn set_direction(&mut self, direction: LayoutDirection) {
        self.config.direction = direction;
        self.navigator.set_direction(direction);
    }

    /// Install the content measurer used by [`RowHeight::Auto`].
    pub fn set_measure(&mut self, measure: impl Measure + 'static) {
        self.measure = Some(Box::new(measure));
        self.relayout();
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&T> {
        self.rows.get(index)
    }

    /// Find a row by key.
    pub fn find_row(&self, key: &str) -> Option<(usize, &T)> {
        self.rows.iter().enumerate().find(|(_, r)| r.key() == key)
    }

    /// Replace all rows.
    ///
    /// Selected keys that disappeared are deselected and focus is clamped
    /// into the new grid. Growing the row count re-arms the load-more latch.
    /// Rows with a repeated key are rejected and the table is unchanged.
    pub fn set_rows(&mut self, rows: Vec<T>) -> Result<()> {
        let keys: Vec<String> = rows.iter().map(TableRow::key).collect();
        let mut seen = HashSet::with_capacity(keys.len());
        if let Some(key) = keys.iter().find(|k| !seen.insert(k.as_str())) {
            return Err(TableError::DuplicateRowKey(key.clone()));
        }

        let grew = rows.len() > self.rows.len();
        self.rows = rows;
        if grew {
            self.load_more.reset();
        }

        if self.selection.set_known_keys(keys) {
            self.push_selection_change();
        }
        self.relayout();
        Ok(())
    }

    /// Update the loading state shown below (or instead of) the rows.
    pub fn set_loading(&mut self, state: BodyState) {
        if self.body_state == state {
            return;
        }
        log::debug!("[table] body state {:?} -> {:?}", self.body_state, state);
        self.body_state = state;
        self.relayout();
    }

    pub fn body_state(&self) -> BodyState {
        self.body_state
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Set the size available to the table, header included.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.relayout();
    }

    pub fn viewport(&self) -> (f64, f64) {
        (self.viewport_width, self.viewport_height)
    }

    /// Height left for body rows below the header.
    pub fn body_viewport_height(&self) -> f64 {
        (self.viewport_height - self.row_layout.header_height()).max(0.0)
    }

    pub fn column_layout(&self) -> &ColumnLayout {
        &self.column_layout
    }

    pub fn row_layout(&self) -> &RowLayout {
        &self.row_layout
    }

    pub fn focus_grid(&self) -> &FocusGrid {
        &self.grid
    }

    /// Recompute both layouts and the focus grid from scratch.
    pub fn relayout(&mut self) {
        self.column_layout = layout::columns::resolve(&self.tree, self.viewport_width);

        let input = RowLayoutInput {
            scale: self.config.scale,
            row_height: self.config.row_height,
            header_cells: self.column_layout.header_rows.iter().map(Vec::len).collect(),
            row_count: self.rows.len(),
            column_count: self.tree.leaf_count(),
            body_state: self.body_state,
            show_empty_state: self.config.show_empty_state,
            viewport_height: self.viewport_height,
        };
        self.row_layout = layout::rows::resolve(&input, self.measure.as_deref());
        self.grid = FocusGrid::from_layout(&self.tree, &self.column_layout, self.rows.len());
        log::debug!(
            "[table] relayout: {} rows, {} leaves, body height {}",
            self.rows.len(),
            self.tree.leaf_count(),
            self.row_layout.body_height()
        );

        let moved = {
            let children = cell_children(&self.tree, &self.rows);
            self.navigator.reconcile(&self.grid, &children)
        };
        if moved {
            self.push_focus_change();
        }
        let max = self.max_scroll_offset();
        if self.scroll_offset > max {
            self.scroll_offset = max;
        }
    }

    // -------------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------------

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn max_scroll_offset(&self) -> f64 {
        (self.row_layout.body_height() - self.body_viewport_height()).max(0.0)
    }

    /// Scroll the body. Queues [`TableEvent::LoadMore`] when the position
    /// first comes near the end of the rows while nothing is loading.
    pub fn scroll_to(&mut self, offset: f64) {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        self.scroll_offset = offset.clamp(0.0, self.max_scroll_offset());
        log::trace!("[table] scroll to {}", self.scroll_offset);

        if self.body_state != BodyState::Idle || self.rows.is_empty() {
            return;
        }
        let fire = self.load_more.on_scroll(
            self.scroll_offset,
            self.body_viewport_height(),
            self.row_layout.body_height(),
        );
        if fire {
            log::debug!("[table] requesting more rows at offset {}", self.scroll_offset);
            self.events.push(TableEvent::LoadMore);
        }
    }

    /// Scroll just enough to show data row `index`.
    pub fn scroll_to_row(&mut self, index: usize) {
        let Some(row) = self.row_layout.item(index).copied() else {
            return;
        };
        let viewport = self.body_viewport_height();
        if viewport <= 0.0 {
            return;
        }
        if row.y < self.scroll_offset {
            self.scroll_to(row.y);
        } else if row.bottom() > self.scroll_offset + viewport {
            self.scroll_to(row.bottom() - viewport);
        }
    }

    /// Indices into `row_layout().body` to materialize.
    pub fn visible_rows(&self) -> Range<usize> {
        virtualizer::visible_range(
            self.scroll_offset,
            self.body_viewport_height(),
            &self.row_layout.body,
            self.config.overscan,
        )
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    pub fn focus(&self) -> Focus {
        self.navigator.focus()
    }

    fn leaf_index(&self, column_key: &str) -> Result<usize> {
        self.tree
            .find(column_key)
            .and_then(|node| self.tree.first_leaf(node))
            .ok_or_else(|| TableError::UnknownColumn(column_key.to_string()))
    }

    /// Focus a body cell directly.
    pub fn focus_cell(&mut self, row: usize, column_key: &str) -> Result<bool> {
        let column = self.leaf_index(column_key)?;
        let changed = self.navigator.focus_cell(&self.grid, CellCoord::body(row, column));
        if changed {
            self.push_focus_change();
        }
        Ok(changed)
    }

    /// Focus the header of a column directly.
    pub fn focus_header(&mut self, column_key: &str) -> Result<bool> {
        let node = self
            .tree
            .find(column_key)
            .ok_or_else(|| TableError::UnknownColumn(column_key.to_string()))?;
        let Some((tier, cell)) = self.column_layout.header_cell_for(node) else {
            return Ok(false);
        };
        let coord = CellCoord::header(tier, cell.first_leaf);
        let changed = self.navigator.focus_cell(&self.grid, coord);
        if changed {
            self.push_focus_change();
        }
        Ok(changed)
    }

    /// Focus a body row container.
    pub fn focus_row(&mut self, row: usize) -> bool {
        let changed = self.navigator.focus_row(&self.grid, row);
        if changed {
            self.push_focus_change();
        }
        changed
    }

    /// Focus left the table.
    pub fn blur(&mut self) -> bool {
        let changed = self.navigator.blur();
        if changed {
            self.push_focus_change();
        }
        changed
    }

    pub(super) fn push_focus_change(&mut self) {
        self.events.push(TableEvent::FocusChange(self.navigator.focus()));
    }

    /// Keep the focused body row inside the viewport.
    pub(super) fn scroll_to_focus(&mut self) {
        if let Some(row) = self.navigator.focus().body_row() {
            self.scroll_to_row(row);
        }
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn tristate(&self) -> Tristate {
        self.selection.tristate()
    }

    pub fn selected_keys(&self) -> Vec<String> {
        self.selection.selected_keys()
    }

    pub fn is_selected(&self, key: &str) -> bool {
        self.selection.is_selected(key)
    }

    /// Register a callback run synchronously after every selection change.
    pub fn set_selection_observer(&mut self, observer: impl FnMut(&[String]) + 'static) {
        self.selection.set_observer(observer);
    }

    pub fn toggle_row(&mut self, key: &str) -> Result<bool> {
        let changed = self.selection.toggle_row(key)?;
        self.after_selection(changed)
    }

    pub fn range_select(&mut self, key: &str, extend: bool) -> Result<bool> {
        let changed = self.selection.range_select(key, extend)?;
        self.after_selection(changed)
    }

    pub fn select_all(&mut self) -> Result<bool> {
        let changed = self.selection.select_all()?;
        self.after_selection(changed)
    }

    pub fn clear_selection(&mut self) -> bool {
        let changed = self.selection.clear_all();
        if changed {
            self.push_selection_change();
        }
        changed
    }

    pub fn set_selected<I, S>(&mut self, keys: I) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let changed = self.selection.set_selected(keys)?;
        self.after_selection(changed)
    }

    pub(super) fn after_selection(&mut self, changed: bool) -> Result<bool> {
        if changed {
            self.push_selection_change();
        }
        Ok(changed)
    }

    fn push_selection_change(&mut self) {
        self.events
            .push(TableEvent::SelectionChange(self.selection.selected_keys()));
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sort(&self) -> Option<&SortDescriptor> {
        self.sort.as_ref()
    }

    /// Reflect the sort the host applied to its rows.
    ///
    /// This does not reorder rows; pass the sorted rows to `set_rows`.
    pub fn set_sort_descriptor(&mut self, sort: Option<SortDescriptor>) -> Result<()> {
        if let Some(s) = &sort
            && self.tree.find(&s.column).is_none()
        {
            return Err(TableError::UnknownColumn(s.column.clone()));
        }
        self.sort = sort;
        Ok(())
    }

    /// Sort state of a column header. `None` for columns that are not
    /// sortable.
    pub fn column_sort(&self, column_key: &str) -> Result<Option<ColumnSort>> {
        let node = self
            .tree
            .find(column_key)
            .and_then(|i| self.tree.node(i))
            .ok_or_else(|| TableError::UnknownColumn(column_key.to_string()))?;
        if !node.sortable {
            return Ok(None);
        }
        Ok(Some(match &self.sort {
            Some(sort) if sort.column == column_key => sort.direction.into(),
            _ => ColumnSort::Unsorted,
        }))
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub(super) fn push_event(&mut self, event: TableEvent) {
        self.events.push(event);
    }

    /// Take the queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }
}
