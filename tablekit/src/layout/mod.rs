//! Geometry of the table: column widths and row heights.
//!
//! Both resolvers are pure. Their output is thrown away and rebuilt whenever
//! an input changes, never patched in place.

pub mod columns;
pub mod rows;

pub use columns::{ColumnGeometry, ColumnLayout, HeaderCell, HeaderCellKind};
pub use rows::{
    BodyState, Measure, RowGeometry, RowHeight, RowKind, RowLayout, RowLayoutInput, Scale,
};
