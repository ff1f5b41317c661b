//! Input handling for the Table.

use crate::column::ColumnKind;
use crate::error::{Result, TableError};
use crate::event::{EventResult, Key, Modifiers, TableEvent};
use crate::focus::{CellCoord, Focus, GridRow, Navigation};
use crate::layout::HeaderCellKind;
use crate::selection::SelectionMode;
use crate::sort::next_sort;

use super::item::TableRow;
use super::state::{Table, cell_children};

impl<T: TableRow> Table<T> {
    /// Handle a key press while the table has focus.
    pub fn handle_key(&mut self, key: Key, modifiers: Modifiers) -> EventResult {
        let nav = match key {
            Key::Up => Some(Navigation::Up),
            Key::Down => Some(Navigation::Down),
            Key::Left => Some(Navigation::Left),
            Key::Right => Some(Navigation::Right),
            Key::Home => Some(Navigation::Home),
            Key::End => Some(Navigation::End),
            _ => None,
        };
        if let Some(nav) = nav {
            return self.on_navigate(nav, modifiers.primary());
        }

        match key {
            Key::Char(' ') | Key::Enter => self.on_activate(modifiers),
            Key::Char('a') | Key::Char('A') if modifiers.primary() => {
                if self.config.selection_mode != SelectionMode::Multiple {
                    return EventResult::Ignored;
                }
                self.consume(|table| table.select_all())
            }
            Key::Escape => {
                if self.config.selection_mode == SelectionMode::None
                    || self.selection.is_empty()
                {
                    return EventResult::Ignored;
                }
                self.clear_selection();
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn on_navigate(&mut self, nav: Navigation, jump: bool) -> EventResult {
        if self.navigator.focus() == Focus::Idle {
            return EventResult::Ignored;
        }
        let moved = {
            let children = cell_children(&self.tree, &self.rows);
            self.navigator.navigate(nav, jump, &self.grid, &children)
        };
        if moved.is_some() {
            self.push_focus_change();
            self.scroll_to_focus();
        }
        // Moves against the grid edge are still swallowed.
        EventResult::Consumed
    }

    /// Space or Enter on the focused element.
    fn on_activate(&mut self, modifiers: Modifiers) -> EventResult {
        let (cell, child) = match self.navigator.focus() {
            Focus::Idle => return EventResult::Ignored,
            Focus::Row { row } => return self.activate_row(row, modifiers),
            Focus::Cell { cell } => (cell, false),
            Focus::Child { cell, .. } => (cell, true),
        };
        let Some(leaf) = self.tree.leaf(cell.column) else {
            return EventResult::Ignored;
        };
        let is_checkbox = leaf.kind == ColumnKind::Selection;
        // Interactive cell content handles its own activation.
        if child && !is_checkbox {
            return EventResult::Ignored;
        }

        match cell.row {
            GridRow::Body(row) => self.activate_row(row, modifiers),
            GridRow::Header(_) if is_checkbox => self.consume(|table| table.toggle_all()),
            GridRow::Header(tier) => {
                let node = self
                    .column_layout()
                    .header_cell_at(tier, cell.column)
                    .and_then(|c| match c.kind {
                        HeaderCellKind::Column(node) => Some(node),
                        HeaderCellKind::Placeholder => None,
                    });
                let sortable = node
                    .and_then(|n| self.tree.node(n))
                    .filter(|column| column.sortable)
                    .map(|column| column.key.clone());
                match sortable {
                    Some(key) => {
                        self.request_sort(&key);
                        EventResult::Consumed
                    }
                    None => EventResult::Ignored,
                }
            }
        }
    }

    /// Toggle a row, or report an action when selection is disabled.
    fn activate_row(&mut self, row: usize, modifiers: Modifiers) -> EventResult {
        let Some(key) = self.rows.get(row).map(TableRow::key) else {
            return EventResult::Ignored;
        };
        match self.config.selection_mode {
            SelectionMode::None => {
                log::debug!("[table] action on row {}", key);
                self.push_event(TableEvent::Action(key));
                EventResult::Consumed
            }
            SelectionMode::Multiple if modifiers.shift => {
                self.consume(|table| table.range_select(&key, modifiers.primary()))
            }
            _ => self.consume(|table| table.toggle_row(&key)),
        }
    }

    /// Run a selection operation; errors are logged and leave the input
    /// unhandled.
    fn consume(&mut self, op: impl FnOnce(&mut Self) -> Result<bool>) -> EventResult {
        match op(self) {
            Ok(_) => EventResult::Consumed,
            Err(e) => {
                log::warn!("[table] {}", e);
                EventResult::Ignored
            }
        }
    }

    fn toggle_all(&mut self) -> Result<bool> {
        let changed = self.selection.toggle_all()?;
        self.after_selection(changed)
    }

    fn request_sort(&mut self, column_key: &str) {
        let sort = next_sort(self.sort.as_ref(), column_key);
        log::debug!("[table] sort requested: {} {:?}", sort.column, sort.direction);
        self.push_event(TableEvent::SortChange(sort));
    }

    // -------------------------------------------------------------------------
    // Pointer input
    // -------------------------------------------------------------------------

    /// Press on a body cell. Focuses the cell, then toggles the row (shift
    /// extends a range in multiple mode) or reports an action.
    pub fn press_cell(
        &mut self,
        row: usize,
        column_key: &str,
        modifiers: Modifiers,
    ) -> Result<EventResult> {
        let node = self
            .tree
            .find(column_key)
            .ok_or_else(|| TableError::UnknownColumn(column_key.to_string()))?;
        if row >= self.rows.len() {
            return Ok(EventResult::Ignored);
        }
        if let Some(column) = self.tree.first_leaf(node) {
            let coord = CellCoord::body(row, column);
            if self.navigator.focus_cell(&self.grid, coord) {
                self.push_focus_change();
            }
        }
        Ok(self.activate_row(row, modifiers))
    }

    /// Press on a row's checkbox.
    pub fn press_row_checkbox(&mut self, row: usize) -> Result<EventResult> {
        if self.config.selection_mode != SelectionMode::Multiple {
            return Err(TableError::SelectionDisabled);
        }
        let Some(key) = self.rows.get(row).map(TableRow::key) else {
            return Ok(EventResult::Ignored);
        };
        self.toggle_row(&key)?;
        Ok(EventResult::Consumed)
    }

    /// Press on the select-all checkbox: selects every row, or clears when
    /// all are already selected.
    pub fn press_select_all(&mut self) -> Result<EventResult> {
        self.toggle_all()?;
        Ok(EventResult::Consumed)
    }

    /// Press on a column header. Sortable headers queue a sort request,
    /// the checkbox header toggles select-all, others are ignored.
    pub fn press_header(&mut self, column_key: &str) -> Result<EventResult> {
        let column = self
            .tree
            .find(column_key)
            .and_then(|i| self.tree.node(i))
            .ok_or_else(|| TableError::UnknownColumn(column_key.to_string()))?;
        let (kind, sortable) = (column.kind, column.sortable);
        match kind {
            ColumnKind::Selection => self.press_select_all(),
            ColumnKind::Data if sortable => {
                self.request_sort(column_key);
                Ok(EventResult::Consumed)
            }
            ColumnKind::Data => Ok(EventResult::Ignored),
        }
    }
}
