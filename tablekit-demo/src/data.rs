//! Synthetic file listing used as the demo data source.

use tablekit::{Column, SortDescriptor, SortDirection, TableRow};

/// Rows fetched per load-more request.
pub const PAGE_SIZE: usize = 50;

/// Stop paging after this many rows.
pub const MAX_ROWS: usize = 400;

#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub kind: &'static str,
    pub size: u64,
    pub shared: bool,
}

impl TableRow for Entry {
    fn key(&self) -> String {
        self.name.clone()
    }

    // Share toggle, plus a copy-link button once shared.
    fn focusable_children(&self, column: &str) -> usize {
        match column {
            "actions" if self.shared => 2,
            "actions" => 1,
            _ => 0,
        }
    }
}

pub fn columns() -> Vec<Column> {
    vec![
        Column::new("name", "Name").sortable().row_header().min_width(200.0),
        Column::group(
            "details",
            "Details",
            vec![
                Column::new("kind", "Type").width(120.0),
                Column::new("size", "Size").width(100.0).sortable(),
            ],
        ),
        Column::new("actions", "Actions").percent(15.0),
    ]
}

/// Rows `start..start + count` of the listing.
pub fn page(start: usize, count: usize) -> Vec<Entry> {
    const KINDS: [&str; 4] = ["document", "image", "archive", "folder"];
    (start..start + count)
        .map(|i| Entry {
            name: format!("file-{i:04}"),
            kind: KINDS[i % KINDS.len()],
            size: ((i * 7919) % 100_000) as u64,
            shared: i % 3 == 0,
        })
        .collect()
}

/// Sort rows in place the way the host applies a requested descriptor.
pub fn sort(rows: &mut [Entry], sort: &SortDescriptor) {
    match sort.column.as_str() {
        "size" => rows.sort_by_key(|r| r.size),
        _ => rows.sort_by(|a, b| a.name.cmp(&b.name)),
    }
    if sort.direction == SortDirection::Descending {
        rows.reverse();
    }
}
