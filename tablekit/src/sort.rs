//! Sort descriptors.
//!
//! The table never reorders rows. It only turns header presses into sort
//! requests and reflects the descriptor the host applied.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Column key and direction of the active sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortDescriptor {
    pub column: String,
    pub direction: SortDirection,
}

impl SortDescriptor {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn ascending(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Ascending)
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Descending)
    }
}

/// Sort state of a single column header, as announced to assistive tech.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSort {
    /// Sortable but not the active sort column.
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl From<SortDirection> for ColumnSort {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Ascending => ColumnSort::Ascending,
            SortDirection::Descending => ColumnSort::Descending,
        }
    }
}

/// Descriptor requested by pressing the header of `column`.
///
/// A different column starts ascending; the active column flips direction.
pub fn next_sort(current: Option<&SortDescriptor>, column: &str) -> SortDescriptor {
    match current {
        Some(sort) if sort.column == column => SortDescriptor::new(column, sort.direction.reversed()),
        _ => SortDescriptor::ascending(column),
    }
}
