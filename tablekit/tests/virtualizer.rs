use tablekit::LoadMoreLatch;
use tablekit::layout::rows::resolve;
use tablekit::layout::{RowGeometry, RowLayoutInput};
use tablekit::virtualizer::{should_load_more, visible_range};
use tablekit::{BodyState, RowHeight, Scale};

/// 100 medium rows of 49px each.
fn hundred_rows() -> Vec<RowGeometry> {
    let input = RowLayoutInput {
        scale: Scale::Medium,
        row_height: RowHeight::Default,
        header_cells: vec![],
        row_count: 100,
        column_count: 2,
        body_state: BodyState::Idle,
        show_empty_state: false,
        viewport_height: 1000.0,
    };
    resolve(&input, None).body
}

// ============================================================================
// Visible Range
// ============================================================================

#[test]
fn test_visible_range_at_top() {
    let rows = hundred_rows();
    // Rows 0..=20 intersect [0, 1000); two extra below.
    assert_eq!(visible_range(0.0, 1000.0, &rows, 2), 0..23);
}

#[test]
fn test_visible_range_scrolled() {
    let rows = hundred_rows();
    // Row 5 spans [245, 294), row 25 spans [1225, 1274).
    assert_eq!(visible_range(250.0, 1000.0, &rows, 2), 3..28);
    assert_eq!(visible_range(250.0, 1000.0, &rows, 0), 5..26);
}

#[test]
fn test_visible_range_clamped_at_end() {
    let rows = hundred_rows();
    assert_eq!(visible_range(3900.0, 1000.0, &rows, 2), 77..100);
}

#[test]
fn test_visible_range_row_boundary_excluded() {
    let rows = hundred_rows();
    // Offset exactly at row 1's top: row 0 is fully scrolled out.
    assert_eq!(visible_range(49.0, 98.0, &rows, 0), 1..3);
}

#[test]
fn test_visible_range_degenerate_inputs() {
    let rows = hundred_rows();
    assert_eq!(visible_range(0.0, 0.0, &rows, 2), 0..0);
    assert_eq!(visible_range(0.0, f64::NAN, &rows, 2), 0..0);
    assert_eq!(visible_range(0.0, 500.0, &[], 2), 0..0);
    assert_eq!(visible_range(10_000.0, 500.0, &rows, 2), 0..0);
}

#[test]
fn test_visible_range_negative_offset_treated_as_top() {
    let rows = hundred_rows();
    assert_eq!(
        visible_range(-200.0, 1000.0, &rows, 2),
        visible_range(0.0, 1000.0, &rows, 2)
    );
}

// ============================================================================
// Load More
// ============================================================================

#[test]
fn test_should_load_more_threshold() {
    // 4900px of content, 1000px viewport, factor 1.
    assert!(!should_load_more(250.0, 1000.0, 4900.0, 1.0));
    assert!(!should_load_more(2800.0, 1000.0, 4900.0, 1.0));
    assert!(should_load_more(3500.0, 1000.0, 4900.0, 1.0));
}

#[test]
fn test_should_load_more_short_content() {
    assert!(should_load_more(0.0, 1000.0, 500.0, 1.0));
    assert!(!should_load_more(0.0, 0.0, 500.0, 1.0));
}

#[test]
fn test_latch_fires_once_per_crossing() {
    let mut latch = LoadMoreLatch::default();
    let fired: Vec<bool> = [250.0, 1500.0, 2800.0, 3500.0, 3600.0, 3900.0]
        .iter()
        .map(|&offset| latch.on_scroll(offset, 1000.0, 4900.0))
        .collect();

    assert_eq!(fired, vec![false, false, false, true, false, false]);
    assert!(latch.is_latched());
}

#[test]
fn test_latch_rearms_after_scrolling_back() {
    let mut latch = LoadMoreLatch::default();
    assert!(latch.on_scroll(3500.0, 1000.0, 4900.0));
    assert!(!latch.on_scroll(1000.0, 1000.0, 4900.0));
    assert!(!latch.is_latched());
    assert!(latch.on_scroll(3500.0, 1000.0, 4900.0));
}

#[test]
fn test_latch_reset() {
    let mut latch = LoadMoreLatch::default();
    assert!(latch.on_scroll(3500.0, 1000.0, 4900.0));
    latch.reset();
    assert!(latch.on_scroll(3600.0, 1000.0, 4900.0));
}

#[test]
fn test_latch_factor() {
    let mut latch = LoadMoreLatch::new(2.0);
    // 1100px remain, under two viewports.
    assert!(latch.on_scroll(2800.0, 1000.0, 4900.0));
}
