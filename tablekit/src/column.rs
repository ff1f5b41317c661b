//! Column definitions and the flattened column tree.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Result, TableError};

/// Key of the synthetic checkbox column added for multiple selection.
pub const SELECTION_COLUMN_KEY: &str = "__selection";

/// Width of the checkbox column in pixels.
pub const SELECTION_COLUMN_WIDTH: f64 = 55.0;

/// Explicit width of a column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ColumnWidth {
    /// Absolute width in pixels.
    Pixels(f64),
    /// Percentage (0-100) of the table's available width.
    Percent(f64),
}

/// Column configuration.
///
/// Leaf columns carry cells; group columns only exist to label a run of
/// leaves in an upper header tier and never have a width of their own.
///
/// # Examples
///
/// ```
/// use tablekit::Column;
///
/// let columns = vec![
///     Column::new("name", "Name").width(200.0).row_header(),
///     Column::group("dates", "Dates", vec![
///         Column::new("created", "Created").sortable(),
///         Column::new("modified", "Modified").min_width(120.0),
///     ]),
///     Column::new("notes", "Notes").percent(20.0),
/// ];
/// assert_eq!(columns[1].children().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    key: String,
    title: String,
    width: Option<ColumnWidth>,
    min_width: Option<f64>,
    max_width: Option<f64>,
    sortable: bool,
    row_header: bool,
    children: Vec<Column>,
}

impl Column {
    /// Create a leaf column.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            width: None,
            min_width: None,
            max_width: None,
            sortable: false,
            row_header: false,
            children: Vec::new(),
        }
    }

    /// Create a group column spanning `children` in the tier above them.
    pub fn group(key: impl Into<String>, title: impl Into<String>, children: Vec<Column>) -> Self {
        Self {
            children,
            ..Self::new(key, title)
        }
    }

    /// Set an explicit pixel width.
    pub fn width(mut self, px: f64) -> Self {
        self.width = Some(ColumnWidth::Pixels(px));
        self
    }

    /// Set a width as a percentage of the available width.
    pub fn percent(mut self, percent: f64) -> Self {
        self.width = Some(ColumnWidth::Percent(percent));
        self
    }

    pub fn min_width(mut self, px: f64) -> Self {
        self.min_width = Some(px);
        self
    }

    pub fn max_width(mut self, px: f64) -> Self {
        self.max_width = Some(px);
        self
    }

    /// Make the column sortable.
    ///
    /// Activating a sortable header emits a sort request.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Mark the column's cells as the accessible label of their row.
    pub fn row_header(mut self) -> Self {
        self.row_header = true;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn children(&self) -> &[Column] {
        &self.children
    }
}

/// What a column node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    /// A user column (leaf or group).
    Data,
    /// The synthetic checkbox column.
    Selection,
}

/// A column in the flattened tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnNode {
    pub key: String,
    pub title: String,
    pub kind: ColumnKind,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Number of ancestors.
    pub depth: usize,
    pub width: Option<ColumnWidth>,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub sortable: bool,
    pub row_header: bool,
}

impl ColumnNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Column tree stored as an arena.
///
/// Nodes are in pre-order, so a parent always precedes its children and the
/// leaves appear in visual order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTree {
    nodes: Vec<ColumnNode>,
    leaves: Vec<usize>,
    roots: Vec<usize>,
}

impl ColumnTree {
    /// Flatten `columns`, optionally prepending the checkbox column.
    pub fn new(columns: &[Column], with_selection: bool) -> Result<Self> {
        let mut tree = Self {
            nodes: Vec::new(),
            leaves: Vec::new(),
            roots: Vec::new(),
        };
        let mut seen = HashSet::new();

        if with_selection {
            let index = tree.push(ColumnNode {
                key: SELECTION_COLUMN_KEY.to_string(),
                title: String::new(),
                kind: ColumnKind::Selection,
                parent: None,
                children: Vec::new(),
                depth: 0,
                width: Some(ColumnWidth::Pixels(SELECTION_COLUMN_WIDTH)),
                min_width: None,
                max_width: None,
                sortable: false,
                row_header: false,
            });
            tree.roots.push(index);
            seen.insert(SELECTION_COLUMN_KEY.to_string());
        }

        for column in columns {
            let index = tree.add(column, None, 0, &mut seen)?;
            tree.roots.push(index);
        }

        // Without an explicit row header the first data leaf labels the row.
        let first_data_leaf = tree
            .leaves
            .iter()
            .copied()
            .find(|&i| tree.nodes[i].kind == ColumnKind::Data);
        if !tree.nodes.iter().any(|n| n.row_header)
            && let Some(first) = first_data_leaf
        {
            tree.nodes[first].row_header = true;
        }

        Ok(tree)
    }

    fn push(&mut self, node: ColumnNode) -> usize {
        let index = self.nodes.len();
        if node.is_leaf() {
            self.leaves.push(index);
        }
        self.nodes.push(node);
        index
    }

    fn add(
        &mut self,
        column: &Column,
        parent: Option<usize>,
        depth: usize,
        seen: &mut HashSet<String>,
    ) -> Result<usize> {
        if !seen.insert(column.key.clone()) {
            return Err(TableError::DuplicateColumnKey(column.key.clone()));
        }

        let is_group = !column.children.is_empty();
        if is_group && column.width.is_some() {
            log::warn!(
                "[columns] group column {} has an explicit width; it is derived from its leaves instead",
                column.key
            );
        }

        let index = self.nodes.len();
        self.nodes.push(ColumnNode {
            key: column.key.clone(),
            title: column.title.clone(),
            kind: ColumnKind::Data,
            parent,
            children: Vec::new(),
            depth,
            width: if is_group { None } else { column.width },
            min_width: column.min_width,
            max_width: column.max_width,
            sortable: column.sortable,
            row_header: column.row_header,
        });

        if !is_group {
            self.leaves.push(index);
            return Ok(index);
        }

        for child in &column.children {
            let child_index = self.add(child, Some(index), depth + 1, seen)?;
            self.nodes[index].children.push(child_index);
        }
        Ok(index)
    }

    pub fn nodes(&self) -> &[ColumnNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&ColumnNode> {
        self.nodes.get(index)
    }

    /// Node indices of the leaf columns, in visual order.
    pub fn leaves(&self) -> &[usize] {
        &self.leaves
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Node index of the column with `key`.
    pub fn find(&self, key: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.key == key)
    }

    /// Position of a leaf node among the leaves.
    pub fn leaf_position(&self, node: usize) -> Option<usize> {
        self.leaves.iter().position(|&l| l == node)
    }

    /// Leaf node at a leaf position.
    pub fn leaf(&self, position: usize) -> Option<&ColumnNode> {
        self.leaves.get(position).and_then(|&i| self.nodes.get(i))
    }

    /// Number of header tiers: the deepest leaf depth plus one.
    pub fn tier_count(&self) -> usize {
        self.leaves
            .iter()
            .map(|&i| self.nodes[i].depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of leaves under `node` (1 for a leaf).
    pub fn leaf_span(&self, node: usize) -> usize {
        match self.nodes.get(node) {
            Some(n) if n.is_leaf() => 1,
            Some(n) => n.children.iter().map(|&c| self.leaf_span(c)).sum(),
            None => 0,
        }
    }

    /// Leaf position of the first leaf under `node`.
    pub fn first_leaf(&self, node: usize) -> Option<usize> {
        let mut current = node;
        loop {
            let n = self.nodes.get(current)?;
            match n.children.first() {
                Some(&child) => current = child,
                None => return self.leaf_position(current),
            }
        }
    }

    /// Keys of the row-header leaves.
    pub fn row_header_keys(&self) -> Vec<&str> {
        self.leaves
            .iter()
            .filter(|&&i| self.nodes[i].row_header)
            .map(|&i| self.nodes[i].key.as_str())
            .collect()
    }

    pub fn has_selection_column(&self) -> bool {
        self.nodes.first().is_some_and(|n| n.kind == ColumnKind::Selection)
    }
}
