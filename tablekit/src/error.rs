//! Error types for the table engine.

/// Errors reported by table operations.
///
/// Layout and navigation never fail: bad geometry is clamped and moves past
/// the grid edge are no-ops. Errors are reserved for references the caller
/// got wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// A selection operation named a row key the table does not know.
    ///
    /// Usually a stale key held across a row removal.
    #[error("unknown row key: {0}")]
    UnknownRowKey(String),

    /// Two rows share a key.
    #[error("duplicate row key: {0}")]
    DuplicateRowKey(String),

    /// A column key that is not part of the column tree.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Two columns in the same tree share a key.
    #[error("duplicate column key: {0}")]
    DuplicateColumnKey(String),

    /// The operation needs a selection mode the table is not configured for.
    #[error("selection is disabled for this operation")]
    SelectionDisabled,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TableError>;
