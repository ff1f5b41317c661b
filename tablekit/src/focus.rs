//! Keyboard focus over the table grid.
//!
//! The grid has header tiers on top and body rows below. Body rows can be
//! focused as a whole (row mode) or cell by cell; cells holding interactive
//! content hand focus to that content (focus marshalling).

use serde::Serialize;

use crate::column::ColumnTree;
use crate::layout::{ColumnLayout, HeaderCellKind};

/// A row of the focus grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "index", rename_all = "snake_case")]
pub enum GridRow {
    /// Header tier, counted from the top.
    Header(usize),
    /// Data row.
    Body(usize),
}

/// A cell of the focus grid. `column` is a leaf position; for header cells
/// it is the first leaf the cell spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellCoord {
    pub row: GridRow,
    pub column: usize,
}

impl CellCoord {
    pub fn body(row: usize, column: usize) -> Self {
        Self {
            row: GridRow::Body(row),
            column,
        }
    }

    pub fn header(tier: usize, column: usize) -> Self {
        Self {
            row: GridRow::Header(tier),
            column,
        }
    }
}

/// Current focus of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Focus {
    /// Nothing in the table is focused.
    #[default]
    Idle,
    /// A body row container.
    Row { row: usize },
    /// A cell container.
    Cell { cell: CellCoord },
    /// Interactive element `child` inside a cell.
    Child { cell: CellCoord, child: usize },
}

impl Focus {
    /// The focused cell, whether the cell itself or content inside it.
    pub fn cell(&self) -> Option<CellCoord> {
        match *self {
            Focus::Cell { cell } | Focus::Child { cell, .. } => Some(cell),
            _ => None,
        }
    }

    /// The focused body row, if focus is anywhere inside one.
    pub fn body_row(&self) -> Option<usize> {
        match *self {
            Focus::Row { row } => Some(row),
            Focus::Cell { cell } | Focus::Child { cell, .. } => match cell.row {
                GridRow::Body(row) => Some(row),
                GridRow::Header(_) => None,
            },
            Focus::Idle => None,
        }
    }

    pub fn is_marshalled(&self) -> bool {
        matches!(self, Focus::Child { .. })
    }
}

/// Reading direction; horizontal arrows are mirrored right-to-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LayoutDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

impl Navigation {
    fn logical(self, direction: LayoutDirection) -> Self {
        match (direction, self) {
            (LayoutDirection::Rtl, Navigation::Left) => Navigation::Right,
            (LayoutDirection::Rtl, Navigation::Right) => Navigation::Left,
            (_, nav) => nav,
        }
    }
}

/// A focusable column header on one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSlot {
    /// First leaf position spanned.
    pub column: usize,
    pub span: usize,
    pub parent: Option<CellCoord>,
    pub first_child: Option<CellCoord>,
}

/// Shape of the grid the navigator moves over.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FocusGrid {
    tiers: Vec<Vec<HeaderSlot>>,
    rows: usize,
    columns: usize,
}

impl FocusGrid {
    /// A grid without header tiers.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            tiers: Vec::new(),
            rows,
            columns,
        }
    }

    /// Add header tiers, top to bottom.
    pub fn with_header(mut self, tiers: Vec<Vec<HeaderSlot>>) -> Self {
        self.tiers = tiers;
        self
    }

    /// Build from a resolved column layout. Placeholder cells are skipped.
    pub fn from_layout(tree: &ColumnTree, layout: &ColumnLayout, rows: usize) -> Self {
        let coord_of = |node: usize| {
            layout
                .header_cell_for(node)
                .map(|(tier, cell)| CellCoord::header(tier, cell.first_leaf))
        };

        let tiers = layout
            .header_rows
            .iter()
            .map(|row| {
                row.iter()
                    .filter_map(|cell| match cell.kind {
                        HeaderCellKind::Column(node) => {
                            let column = tree.node(node)?;
                            Some(HeaderSlot {
                                column: cell.first_leaf,
                                span: cell.col_span,
                                parent: column.parent.and_then(coord_of),
                                first_child: column.children.first().copied().and_then(coord_of),
                            })
                        }
                        HeaderCellKind::Placeholder => None,
                    })
                    .collect()
            })
            .collect();

        Self {
            tiers,
            rows,
            columns: tree.leaf_count(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    pub fn tier(&self, tier: usize) -> &[HeaderSlot] {
        self.tiers.get(tier).map(Vec::as_slice).unwrap_or(&[])
    }

    fn slot_index(&self, tier: usize, column: usize) -> Option<usize> {
        let slots = self.tier(tier);
        slots
            .iter()
            .position(|s| s.column == column)
            .or_else(|| {
                slots
                    .iter()
                    .position(|s| column >= s.column && column < s.column + s.span)
            })
    }

    /// Bottom-tier header above leaf position `column`.
    fn header_above(&self, column: usize) -> Option<CellCoord> {
        let tier = self.tiers.len().checked_sub(1)?;
        let slot = self.tier(tier).get(self.slot_index(tier, column)?)?;
        Some(CellCoord::header(tier, slot.column))
    }

    /// Whether `cell` addresses something in the grid.
    pub fn contains(&self, cell: CellCoord) -> bool {
        match cell.row {
            GridRow::Body(row) => row < self.rows && cell.column < self.columns,
            GridRow::Header(tier) => self.tier(tier).iter().any(|s| s.column == cell.column),
        }
    }
}

/// Number of focusable elements inside a cell.
pub trait CellChildren {
    fn focusable_children(&self, cell: CellCoord) -> usize;
}

impl<F: Fn(CellCoord) -> usize> CellChildren for F {
    fn focusable_children(&self, cell: CellCoord) -> usize {
        self(cell)
    }
}

/// For grids whose cells hold no interactive content.
pub fn no_children(_: CellCoord) -> usize {
    0
}

/// Focus state machine of one table.
#[derive(Debug, Clone, Default)]
pub struct FocusNavigator {
    focus: Focus,
    direction: LayoutDirection,
}

impl FocusNavigator {
    pub fn new(direction: LayoutDirection) -> Self {
        Self {
            focus: Focus::Idle,
            direction,
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: LayoutDirection) {
        self.direction = direction;
    }

    fn set(&mut self, focus: Focus) -> bool {
        if self.focus == focus {
            return false;
        }
        log::debug!("[focus] {:?} -> {:?}", self.focus, focus);
        self.focus = focus;
        true
    }

    /// Focus a cell container directly (pointer press, programmatic focus).
    /// Returns true if focus changed.
    pub fn focus_cell(&mut self, grid: &FocusGrid, cell: CellCoord) -> bool {
        grid.contains(cell) && self.set(Focus::Cell { cell })
    }

    /// Focus an interactive element inside a cell directly.
    pub fn focus_child(&mut self, grid: &FocusGrid, cell: CellCoord, child: usize) -> bool {
        grid.contains(cell) && self.set(Focus::Child { cell, child })
    }

    /// Focus a body row container.
    pub fn focus_row(&mut self, grid: &FocusGrid, row: usize) -> bool {
        row < grid.rows() && self.set(Focus::Row { row })
    }

    /// Clear focus. Returns true if something was focused.
    pub fn blur(&mut self) -> bool {
        self.set(Focus::Idle)
    }

    /// Apply a navigation key. Returns the new focus if it changed.
    pub fn navigate(
        &mut self,
        nav: Navigation,
        jump: bool,
        grid: &FocusGrid,
        children: &dyn CellChildren,
    ) -> Option<Focus> {
        let next = next_focus(self.focus, nav.logical(self.direction), jump, grid, children)?;
        self.set(next).then_some(next)
    }

    /// Pull focus back inside a grid that changed shape, or out of cell
    /// content that went away. Returns true if focus had to move.
    pub fn reconcile(&mut self, grid: &FocusGrid, children: &dyn CellChildren) -> bool {
        let clamped = clamp(self.focus, grid, children);
        self.set(clamped)
    }
}

fn clamp(focus: Focus, grid: &FocusGrid, children: &dyn CellChildren) -> Focus {
    let clamp_body = |row: usize, column: usize| {
        if grid.rows() == 0 || grid.columns() == 0 {
            return Focus::Idle;
        }
        Focus::Cell {
            cell: CellCoord::body(row.min(grid.rows() - 1), column.min(grid.columns() - 1)),
        }
    };

    match focus {
        Focus::Idle => Focus::Idle,
        Focus::Row { row } if row < grid.rows() => focus,
        Focus::Row { .. } => match grid.rows() {
            0 => Focus::Idle,
            rows => Focus::Row { row: rows - 1 },
        },
        Focus::Cell { cell } if grid.contains(cell) => focus,
        Focus::Child { cell, child } if grid.contains(cell) => {
            match children.focusable_children(cell) {
                0 => Focus::Cell { cell },
                count => Focus::Child {
                    cell,
                    child: child.min(count - 1),
                },
            }
        }
        Focus::Cell { cell } | Focus::Child { cell, .. } => match cell.row {
            GridRow::Body(row) => clamp_body(row, cell.column),
            GridRow::Header(tier) => grid
                .slot_index(tier, cell.column)
                .and_then(|i| grid.tier(tier).get(i))
                .map(|slot| Focus::Cell {
                    cell: CellCoord::header(tier, slot.column),
                })
                .unwrap_or(Focus::Idle),
        },
    }
}

/// Focus landing on `cell` from a navigation move.
fn land(cell: CellCoord, children: &dyn CellChildren) -> Focus {
    if children.focusable_children(cell) > 0 {
        Focus::Child { cell, child: 0 }
    } else {
        Focus::Cell { cell }
    }
}

/// Pure transition function. `nav` is already in logical (LTR) terms.
/// Returns `None` when the move is a no-op.
pub fn next_focus(
    focus: Focus,
    nav: Navigation,
    jump: bool,
    grid: &FocusGrid,
    children: &dyn CellChildren,
) -> Option<Focus> {
    let next = match focus {
        Focus::Idle => None,
        Focus::Row { row } => from_row(row, nav, grid, children),
        Focus::Cell { cell } => from_cell(cell, nav, jump, grid, children),
        Focus::Child { cell, child } => {
            let count = children.focusable_children(cell);
            match nav {
                Navigation::Right | Navigation::Down if child + 1 < count => Some(Focus::Child {
                    cell,
                    child: child + 1,
                }),
                Navigation::Left | Navigation::Up if child > 0 && child - 1 < count => {
                    Some(Focus::Child {
                        cell,
                        child: child - 1,
                    })
                }
                _ => from_cell(cell, nav, jump, grid, children),
            }
        }
    };
    next.filter(|n| *n != focus)
}

fn from_row(
    row: usize,
    nav: Navigation,
    grid: &FocusGrid,
    children: &dyn CellChildren,
) -> Option<Focus> {
    let last_column = grid.columns().checked_sub(1)?;
    match nav {
        Navigation::Right => Some(land(CellCoord::body(row, 0), children)),
        Navigation::Left => Some(land(CellCoord::body(row, last_column), children)),
        Navigation::Down => (row + 1 < grid.rows()).then_some(Focus::Row { row: row + 1 }),
        Navigation::Up if row > 0 => Some(Focus::Row { row: row - 1 }),
        Navigation::Up => grid.header_above(0).map(|cell| land(cell, children)),
        Navigation::Home => (grid.rows() > 0).then_some(Focus::Row { row: 0 }),
        Navigation::End => grid
            .rows()
            .checked_sub(1)
            .map(|row| Focus::Row { row }),
    }
}

fn from_cell(
    cell: CellCoord,
    nav: Navigation,
    jump: bool,
    grid: &FocusGrid,
    children: &dyn CellChildren,
) -> Option<Focus> {
    match cell.row {
        GridRow::Body(row) => from_body_cell(row, cell.column, nav, jump, grid, children),
        GridRow::Header(tier) => from_header_cell(tier, cell.column, nav, jump, grid, children),
    }
}

fn from_body_cell(
    row: usize,
    column: usize,
    nav: Navigation,
    jump: bool,
    grid: &FocusGrid,
    children: &dyn CellChildren,
) -> Option<Focus> {
    let last_column = grid.columns().checked_sub(1)?;
    let last_row = grid.rows().checked_sub(1)?;
    let to = |row: usize, column: usize| Some(land(CellCoord::body(row, column), children));

    match nav {
        Navigation::Right if column >= last_column => Some(Focus::Row { row }),
        Navigation::Right => to(row, column + 1),
        Navigation::Left if column == 0 => Some(Focus::Row { row }),
        Navigation::Left => to(row, (column - 1).min(last_column)),
        Navigation::Down if row < last_row => to(row + 1, column),
        Navigation::Down => None,
        Navigation::Up if row > 0 => to(row - 1, column),
        Navigation::Up => grid.header_above(column).map(|cell| land(cell, children)),
        Navigation::Home if jump => to(0, 0),
        Navigation::Home => to(row, 0),
        Navigation::End if jump => to(last_row, last_column),
        Navigation::End => to(row, last_column),
    }
}

fn from_header_cell(
    tier: usize,
    column: usize,
    nav: Navigation,
    jump: bool,
    grid: &FocusGrid,
    children: &dyn CellChildren,
) -> Option<Focus> {
    let slots = grid.tier(tier);
    let index = grid.slot_index(tier, column)?;
    let slot = slots.get(index)?;
    let at = |i: usize| {
        slots
            .get(i)
            .map(|s| land(CellCoord::header(tier, s.column), children))
    };
    let body = |row: usize, column: usize| Some(land(CellCoord::body(row, column), children));
    let has_rows = grid.rows() > 0 && grid.columns() > 0;

    match nav {
        Navigation::Right => at((index + 1) % slots.len()),
        Navigation::Left => at((index + slots.len() - 1) % slots.len()),
        Navigation::Down => match slot.first_child {
            Some(child) => Some(land(child, children)),
            None if has_rows => body(0, slot.column),
            None => None,
        },
        Navigation::Up => slot.parent.map(|parent| land(parent, children)),
        Navigation::Home if jump && has_rows => body(0, 0),
        Navigation::Home => at(0),
        Navigation::End if jump && has_rows => body(grid.rows() - 1, grid.columns() - 1),
        Navigation::End => at(slots.len() - 1),
    }
}
