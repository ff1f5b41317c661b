//! TableRow trait for table data.

/// Trait for items that can be displayed as rows in a [`Table`](super::Table).
///
/// # Examples
///
/// ```
/// use tablekit::TableRow;
///
/// #[derive(Clone)]
/// struct File {
///     name: String,
///     shared: bool,
/// }
///
/// impl TableRow for File {
///     fn key(&self) -> String {
///         self.name.clone()
///     }
///
///     // A share toggle and a link in the "actions" column.
///     fn focusable_children(&self, column: &str) -> usize {
///         match column {
///             "actions" if self.shared => 2,
///             "actions" => 1,
///             _ => 0,
///         }
///     }
/// }
///
/// let file = File { name: "a.txt".into(), shared: true };
/// assert_eq!(file.focusable_children("actions"), 2);
/// ```
pub trait TableRow {
    /// Unique identifier for this row.
    ///
    /// Used for stable selection across row mutations.
    fn key(&self) -> String;

    /// Number of interactive elements in the cell of `column` (a leaf key).
    ///
    /// Keyboard focus landing on a cell with children moves into the first
    /// one.
    fn focusable_children(&self, _column: &str) -> usize {
        0
    }
}
