//! Row and header tier height resolution.

use serde::Serialize;

/// Density scale of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Scale {
    #[default]
    Medium,
    Large,
}

impl Scale {
    /// Default cell height of a body row.
    pub fn row_height(self) -> f64 {
        match self {
            Scale::Medium => 48.0,
            Scale::Large => 64.0,
        }
    }

    /// Height of one header tier.
    pub fn header_height(self) -> f64 {
        match self {
            Scale::Medium => 34.0,
            Scale::Large => 40.0,
        }
    }
}

/// Divider drawn below every body row; part of the row, not of its cells.
pub const ROW_DIVIDER: f64 = 1.0;

/// Height of the loader row shown below the rows while more are loading.
pub const LOADER_ROW_HEIGHT: f64 = 60.0;

/// How body row heights are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub enum RowHeight {
    /// The scale's default height.
    #[default]
    Default,
    /// An explicit cell height in pixels.
    Fixed(f64),
    /// Measured from content, never below the scale's default.
    Auto,
}

/// Source of content heights for [`RowHeight::Auto`].
///
/// Implemented by the rendering layer. `None` means the content could not be
/// measured and the minimum height applies.
pub trait Measure {
    /// Content height of the body cell at `row`, leaf position `column`.
    fn cell_height(&self, row: usize, column: usize) -> Option<f64>;

    /// Content height of header cell `cell` (index within the tier) on `tier`.
    fn header_height(&self, tier: usize, cell: usize) -> Option<f64>;
}

/// State of the body beyond its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BodyState {
    #[default]
    Idle,
    /// First load in progress.
    Loading,
    /// Appending more rows to a non-empty body.
    LoadingMore,
}

/// What a laid-out row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "index", rename_all = "snake_case")]
pub enum RowKind {
    Header(usize),
    Item(usize),
    Loader,
    Empty,
}

/// Vertical geometry of one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RowGeometry {
    pub kind: RowKind,
    pub y: f64,
    pub height: f64,
    /// Height of the row's cells, which sit at the row's top.
    pub cell_height: f64,
}

impl RowGeometry {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Vertical geometry of the header tiers and the body.
///
/// Both groups start at offset zero: the header is pinned while the body
/// scrolls underneath it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RowLayout {
    pub header: Vec<RowGeometry>,
    pub body: Vec<RowGeometry>,
}

impl RowLayout {
    pub fn header_height(&self) -> f64 {
        self.header.last().map(RowGeometry::bottom).unwrap_or(0.0)
    }

    pub fn body_height(&self) -> f64 {
        self.body.last().map(RowGeometry::bottom).unwrap_or(0.0)
    }

    /// Geometry of data row `index`.
    pub fn item(&self, index: usize) -> Option<&RowGeometry> {
        self.body
            .get(index)
            .filter(|g| g.kind == RowKind::Item(index))
    }

    /// Index into `body` of the row containing offset `y`.
    pub fn body_row_at(&self, y: f64) -> Option<usize> {
        if y < 0.0 || y >= self.body_height() {
            return None;
        }
        let index = self.body.partition_point(|g| g.bottom() <= y);
        (index < self.body.len()).then_some(index)
    }
}

/// Everything the resolver needs to know about the table.
#[derive(Debug, Clone, PartialEq)]
pub struct RowLayoutInput {
    pub scale: Scale,
    pub row_height: RowHeight,
    /// Number of header cells on each tier, top to bottom.
    pub header_cells: Vec<usize>,
    pub row_count: usize,
    pub column_count: usize,
    pub body_state: BodyState,
    pub show_empty_state: bool,
    pub viewport_height: f64,
}

fn measured(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

/// Lay out header tiers and body rows.
pub fn resolve(input: &RowLayoutInput, measure: Option<&dyn Measure>) -> RowLayout {
    let auto = input.row_height == RowHeight::Auto;
    let measure = if auto { measure } else { None };
    if auto && measure.is_none() {
        log::warn!("[rows] auto row height without a measurer, using minimum heights");
    }

    let mut header = Vec::with_capacity(input.header_cells.len());
    let mut y = 0.0;
    for (tier, &cells) in input.header_cells.iter().enumerate() {
        let min = input.scale.header_height();
        let height = match measure {
            Some(m) => (0..cells)
                .filter_map(|cell| measured(m.header_height(tier, cell)))
                .fold(min, f64::max),
            None => min,
        };
        header.push(RowGeometry {
            kind: RowKind::Header(tier),
            y,
            height,
            cell_height: height,
        });
        y += height;
    }

    let base = match input.row_height {
        RowHeight::Fixed(px) if px.is_finite() && px >= 0.0 => px,
        RowHeight::Fixed(px) => {
            log::warn!("[rows] invalid fixed row height {}, using default", px);
            input.scale.row_height()
        }
        RowHeight::Default | RowHeight::Auto => input.scale.row_height(),
    };

    let mut body = Vec::with_capacity(input.row_count + 1);
    let mut y = 0.0;
    for row in 0..input.row_count {
        let cell_height = match measure {
            Some(m) => (0..input.column_count)
                .filter_map(|column| measured(m.cell_height(row, column)))
                .fold(base, f64::max),
            None => base,
        };
        let height = cell_height + ROW_DIVIDER;
        body.push(RowGeometry {
            kind: RowKind::Item(row),
            y,
            height,
            cell_height,
        });
        y += height;
    }

    let header_height = header.last().map(RowGeometry::bottom).unwrap_or(0.0);
    let filler = || (input.viewport_height - header_height).max(base + ROW_DIVIDER);
    let synthetic = match (input.body_state, input.row_count) {
        (BodyState::Loading | BodyState::LoadingMore, 0) => Some((RowKind::Loader, filler())),
        (BodyState::Loading | BodyState::LoadingMore, _) => {
            Some((RowKind::Loader, LOADER_ROW_HEIGHT))
        }
        (BodyState::Idle, 0) if input.show_empty_state => Some((RowKind::Empty, filler())),
        (BodyState::Idle, _) => None,
    };
    if let Some((kind, height)) = synthetic {
        body.push(RowGeometry {
            kind,
            y,
            height,
            cell_height: height,
        });
    }

    RowLayout { header, body }
}
