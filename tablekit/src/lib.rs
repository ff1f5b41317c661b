//! Headless layout and interaction engine for accessible, virtualized data
//! tables.
//!
//! The crate computes geometry and interaction state; rendering is left to
//! the host, which feeds input events in and reads layouts, focus, selection
//! and sort state back out.

pub mod column;
pub mod error;
pub mod event;
pub mod focus;
pub mod layout;
pub mod selection;
pub mod sort;
pub mod table;
pub mod virtualizer;

pub use column::{Column, ColumnKind, ColumnTree, ColumnWidth, SELECTION_COLUMN_KEY};
pub use error::{Result, TableError};
pub use event::{EventResult, Key, Modifiers, TableEvent};
pub use focus::{CellCoord, Focus, FocusGrid, FocusNavigator, GridRow, LayoutDirection, Navigation};
pub use layout::{
    BodyState, ColumnLayout, HeaderCell, HeaderCellKind, Measure, RowHeight, RowKind, RowLayout,
    Scale,
};
pub use selection::{SelectionCoordinator, SelectionMode, Tristate};
pub use sort::{ColumnSort, SortDescriptor, SortDirection};
pub use table::{Table, TableConfig, TableRow};
pub use virtualizer::LoadMoreLatch;
