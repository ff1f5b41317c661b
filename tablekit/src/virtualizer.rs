//! Virtualization window: which rows to materialize and when to fetch more.

use std::ops::Range;

use crate::layout::RowGeometry;

/// Rows kept beyond each edge of the viewport.
pub const DEFAULT_OVERSCAN: usize = 2;

/// Fetch more once less than this many viewports of content remain below.
pub const DEFAULT_LOAD_MORE_FACTOR: f64 = 1.0;

/// Indices of `rows` intersecting `[scroll_offset, scroll_offset + viewport_height)`,
/// widened by `overscan` rows on both ends.
///
/// `rows` must be laid out top to bottom without gaps, as produced by the
/// row resolver.
pub fn visible_range(
    scroll_offset: f64,
    viewport_height: f64,
    rows: &[RowGeometry],
    overscan: usize,
) -> Range<usize> {
    if rows.is_empty() || viewport_height.is_nan() || viewport_height <= 0.0 {
        return 0..0;
    }
    let top = scroll_offset.max(0.0);
    let bottom = top + viewport_height;

    // First row whose bottom edge is below the top of the viewport.
    let first = rows.partition_point(|r| r.bottom() <= top);
    // First row starting at or after the bottom of the viewport.
    let end = rows.partition_point(|r| r.y < bottom);
    if first >= end {
        return 0..0;
    }

    first.saturating_sub(overscan)..(end + overscan).min(rows.len())
}

/// Whether the content left below the viewport is under `factor` viewports.
pub fn should_load_more(
    scroll_offset: f64,
    viewport_height: f64,
    content_height: f64,
    factor: f64,
) -> bool {
    if viewport_height.is_nan() || viewport_height <= 0.0 {
        return false;
    }
    let remaining = content_height - (scroll_offset.max(0.0) + viewport_height);
    remaining < factor * viewport_height
}

/// Debounces [`should_load_more`] across a stream of scroll updates.
///
/// Fires once when the threshold is crossed, then stays latched until the
/// scroll position retreats above the threshold or rows are appended.
#[derive(Debug, Clone)]
pub struct LoadMoreLatch {
    factor: f64,
    latched: bool,
}

impl Default for LoadMoreLatch {
    fn default() -> Self {
        Self::new(DEFAULT_LOAD_MORE_FACTOR)
    }
}

impl LoadMoreLatch {
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            latched: false,
        }
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Feed a scroll position. Returns true when more rows should be fetched.
    pub fn on_scroll(&mut self, scroll_offset: f64, viewport_height: f64, content_height: f64) -> bool {
        let near = should_load_more(scroll_offset, viewport_height, content_height, self.factor);
        log::trace!(
            "[virtualizer] scroll={} viewport={} content={} near_end={} latched={}",
            scroll_offset,
            viewport_height,
            content_height,
            near,
            self.latched
        );
        if !near {
            self.latched = false;
            return false;
        }
        if self.latched {
            return false;
        }
        self.latched = true;
        true
    }

    /// Re-arm after new rows arrived.
    pub fn reset(&mut self) {
        self.latched = false;
    }
}
