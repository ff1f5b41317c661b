//! Column width resolution and header tier construction.

use serde::Serialize;

use crate::column::{ColumnTree, ColumnWidth};

/// Resolved horizontal geometry of one column node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ColumnGeometry {
    pub x: f64,
    pub width: f64,
}

impl ColumnGeometry {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// What occupies a slot in a header tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "node", rename_all = "snake_case")]
pub enum HeaderCellKind {
    /// A column header for the node at this arena index.
    Column(usize),
    /// Empty filler above leaves that have no header on this tier.
    Placeholder,
}

/// One cell of a header tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeaderCell {
    pub kind: HeaderCellKind,
    /// Leaf position where the cell starts.
    pub first_leaf: usize,
    /// Number of leaves covered.
    pub col_span: usize,
    /// Number of tiers the cell visually covers (leaf headers only).
    pub row_span: usize,
    pub x: f64,
    pub width: f64,
}

impl HeaderCell {
    pub fn is_placeholder(&self) -> bool {
        self.kind == HeaderCellKind::Placeholder
    }

    /// Whether leaf position `leaf` falls under this cell.
    pub fn covers(&self, leaf: usize) -> bool {
        leaf >= self.first_leaf && leaf < self.first_leaf + self.col_span
    }
}

/// Resolved column geometry for a whole tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ColumnLayout {
    /// Geometry per node, indexed like `ColumnTree::nodes`.
    pub columns: Vec<ColumnGeometry>,
    /// Header tiers, top to bottom.
    pub header_rows: Vec<Vec<HeaderCell>>,
    pub total_width: f64,
}

impl ColumnLayout {
    pub fn column(&self, node: usize) -> Option<&ColumnGeometry> {
        self.columns.get(node)
    }

    pub fn tier_count(&self) -> usize {
        self.header_rows.len()
    }

    /// Header cell on `tier` covering leaf position `leaf`.
    pub fn header_cell_at(&self, tier: usize, leaf: usize) -> Option<&HeaderCell> {
        self.header_rows.get(tier)?.iter().find(|c| c.covers(leaf))
    }

    /// Tier and cell for a column node's header.
    pub fn header_cell_for(&self, node: usize) -> Option<(usize, &HeaderCell)> {
        self.header_rows.iter().enumerate().find_map(|(tier, row)| {
            row.iter()
                .find(|c| c.kind == HeaderCellKind::Column(node))
                .map(|c| (tier, c))
        })
    }
}

/// Width constraints of one leaf after normalisation.
#[derive(Debug, Clone, Copy)]
struct LeafConstraint {
    fixed: Option<f64>,
    min: f64,
    max: f64,
}

fn sanitize(px: f64) -> f64 {
    if px.is_finite() { px.max(0.0) } else { 0.0 }
}

fn leaf_constraints(tree: &ColumnTree, available_width: f64) -> Vec<LeafConstraint> {
    tree.leaves()
        .iter()
        .map(|&index| {
            let node = &tree.nodes()[index];
            let min = node.min_width.map(sanitize).unwrap_or(0.0);
            let mut max = node.max_width.map(sanitize).unwrap_or(f64::INFINITY);
            if max < min {
                log::warn!(
                    "[columns] {}: min width {} exceeds max width {}, using min",
                    node.key,
                    min,
                    max
                );
                max = min;
            }
            let fixed = node.width.map(|w| {
                let px = match w {
                    ColumnWidth::Pixels(px) => sanitize(px),
                    ColumnWidth::Percent(p) => sanitize(p) / 100.0 * available_width,
                };
                if px > available_width && available_width > 0.0 {
                    log::warn!(
                        "[columns] {}: width {} exceeds available width {}",
                        node.key,
                        px,
                        available_width
                    );
                }
                // A min width may still push past the table edge.
                px.min(available_width).clamp(min, max)
            });
            LeafConstraint { fixed, min, max }
        })
        .collect()
}

/// Share `remaining` among flexible leaves, honouring min then max bounds
/// until no more columns need clamping.
fn distribute(constraints: &[LeafConstraint], widths: &mut [f64], mut remaining: f64) {
    let mut open: Vec<usize> = constraints
        .iter()
        .enumerate()
        .filter(|(_, c)| c.fixed.is_none())
        .map(|(i, _)| i)
        .collect();

    while !open.is_empty() {
        let share = remaining.max(0.0) / open.len() as f64;

        let floored: Vec<usize> = open
            .iter()
            .copied()
            .filter(|&i| constraints[i].min > share)
            .collect();
        if !floored.is_empty() {
            for &i in &floored {
                widths[i] = constraints[i].min;
                remaining -= constraints[i].min;
            }
            open.retain(|i| !floored.contains(i));
            continue;
        }

        let capped: Vec<usize> = open
            .iter()
            .copied()
            .filter(|&i| constraints[i].max < share)
            .collect();
        if !capped.is_empty() {
            for &i in &capped {
                widths[i] = constraints[i].max;
                remaining -= constraints[i].max;
            }
            open.retain(|i| !capped.contains(i));
            continue;
        }

        for &i in &open {
            widths[i] = share;
        }
        break;
    }
}

/// Resolve every column's width and offset within `available_width`.
pub fn resolve(tree: &ColumnTree, available_width: f64) -> ColumnLayout {
    let available_width = sanitize(available_width);
    let constraints = leaf_constraints(tree, available_width);

    let mut leaf_widths: Vec<f64> = constraints.iter().map(|c| c.fixed.unwrap_or(0.0)).collect();
    let fixed_total: f64 = leaf_widths.iter().sum();
    distribute(&constraints, &mut leaf_widths, available_width - fixed_total);

    let mut columns = vec![ColumnGeometry::default(); tree.nodes().len()];
    let mut x = 0.0;
    for (&node, &width) in tree.leaves().iter().zip(&leaf_widths) {
        columns[node] = ColumnGeometry { x, width };
        x += width;
    }
    let total_width = x;

    // Groups precede their children in the arena, so walk backwards.
    for index in (0..tree.nodes().len()).rev() {
        let node = &tree.nodes()[index];
        if node.is_leaf() {
            continue;
        }
        let first = node.children.first().map(|&c| columns[c].x).unwrap_or(0.0);
        let width = node.children.iter().map(|&c| columns[c].width).sum();
        columns[index] = ColumnGeometry { x: first, width };
    }

    let header_rows = header_rows(tree, &leaf_widths, &columns);
    log::debug!(
        "[columns] resolved {} leaves into {} tiers, total width {}",
        tree.leaf_count(),
        header_rows.len(),
        total_width
    );

    ColumnLayout {
        columns,
        header_rows,
        total_width,
    }
}

/// Node covering `leaf` on `tier`: group columns sit on the tier of their
/// depth, leaves always on the bottom tier.
fn covering_node(tree: &ColumnTree, leaf_node: usize, tier: usize, tiers: usize) -> Option<usize> {
    if tier + 1 == tiers {
        return Some(leaf_node);
    }
    let mut current = tree.nodes()[leaf_node].parent;
    while let Some(index) = current {
        let node = &tree.nodes()[index];
        if node.depth == tier {
            return Some(index);
        }
        current = node.parent;
    }
    None
}

fn header_rows(
    tree: &ColumnTree,
    leaf_widths: &[f64],
    columns: &[ColumnGeometry],
) -> Vec<Vec<HeaderCell>> {
    let tiers = tree.tier_count();
    let leaf_x = |position: usize| columns[tree.leaves()[position]].x;

    (0..tiers)
        .map(|tier| {
            let mut row: Vec<HeaderCell> = Vec::new();
            for (position, &leaf_node) in tree.leaves().iter().enumerate() {
                let width = leaf_widths[position];
                match covering_node(tree, leaf_node, tier, tiers) {
                    Some(node) => {
                        if row.last().is_some_and(|c| c.kind == HeaderCellKind::Column(node)) {
                            continue;
                        }
                        let geometry = columns[node];
                        let row_span = if tree.nodes()[node].is_leaf() {
                            tiers - tree.nodes()[node].depth
                        } else {
                            1
                        };
                        row.push(HeaderCell {
                            kind: HeaderCellKind::Column(node),
                            first_leaf: position,
                            col_span: tree.leaf_span(node),
                            row_span,
                            x: geometry.x,
                            width: geometry.width,
                        });
                    }
                    None => match row.last_mut() {
                        Some(cell) if cell.is_placeholder() => {
                            cell.col_span += 1;
                            cell.width += width;
                        }
                        _ => row.push(HeaderCell {
                            kind: HeaderCellKind::Placeholder,
                            first_leaf: position,
                            col_span: 1,
                            row_span: 1,
                            x: leaf_x(position),
                            width,
                        }),
                    },
                }
            }
            row
        })
        .collect()
}
