use tablekit::focus::no_children;
use tablekit::layout::columns::resolve;
use tablekit::{
    CellCoord, Column, ColumnTree, Focus, FocusGrid, FocusNavigator, LayoutDirection, Navigation,
};

fn cell(row: usize, column: usize) -> Focus {
    Focus::Cell {
        cell: CellCoord::body(row, column),
    }
}

fn header(tier: usize, column: usize) -> Focus {
    Focus::Cell {
        cell: CellCoord::header(tier, column),
    }
}

fn at(grid: &FocusGrid, focus: Focus) -> FocusNavigator {
    let mut nav = FocusNavigator::new(LayoutDirection::Ltr);
    match focus {
        Focus::Row { row } => assert!(nav.focus_row(grid, row)),
        Focus::Cell { cell } => assert!(nav.focus_cell(grid, cell)),
        Focus::Child { cell, child } => assert!(nav.focus_child(grid, cell, child)),
        Focus::Idle => {}
    }
    nav
}

fn press(nav: &mut FocusNavigator, grid: &FocusGrid, key: Navigation) -> Focus {
    nav.navigate(key, false, grid, &no_children);
    nav.focus()
}

fn jump(nav: &mut FocusNavigator, grid: &FocusGrid, key: Navigation) -> Focus {
    nav.navigate(key, true, grid, &no_children);
    nav.focus()
}

/// `test, tier1 > {tier2a > {foo, bar}, yay, tier2b > {baz}}` over `rows` rows.
/// Leaf positions: test 0, foo 1, bar 2, yay 3, baz 4.
fn nested_grid(rows: usize) -> FocusGrid {
    let columns = vec![
        Column::new("test", "Test"),
        Column::group(
            "tier1",
            "Tier 1",
            vec![
                Column::group(
                    "tier2a",
                    "Tier 2a",
                    vec![Column::new("foo", "Foo"), Column::new("bar", "Bar")],
                ),
                Column::new("yay", "Yay"),
                Column::group("tier2b", "Tier 2b", vec![Column::new("baz", "Baz")]),
            ],
        ),
    ];
    let tree = ColumnTree::new(&columns, false).unwrap();
    let layout = resolve(&tree, 1000.0);
    FocusGrid::from_layout(&tree, &layout, rows)
}

/// Checkbox column plus foo, bar, baz over three rows.
fn flat_grid() -> FocusGrid {
    let columns = vec![
        Column::new("foo", "Foo"),
        Column::new("bar", "Bar"),
        Column::new("baz", "Baz"),
    ];
    let tree = ColumnTree::new(&columns, true).unwrap();
    let layout = resolve(&tree, 1000.0);
    FocusGrid::from_layout(&tree, &layout, 3)
}

// ============================================================================
// Body Cells
// ============================================================================

#[test]
fn test_arrows_move_between_cells() {
    let grid = FocusGrid::new(3, 4);
    let mut nav = at(&grid, cell(1, 1));

    assert_eq!(press(&mut nav, &grid, Navigation::Right), cell(1, 2));
    assert_eq!(press(&mut nav, &grid, Navigation::Down), cell(2, 2));
    assert_eq!(press(&mut nav, &grid, Navigation::Left), cell(2, 1));
    assert_eq!(press(&mut nav, &grid, Navigation::Up), cell(1, 1));
}

#[test]
fn test_right_then_left_is_identity() {
    let grid = FocusGrid::new(4, 4);
    for row in 0..4 {
        for column in 1..3 {
            let mut nav = at(&grid, cell(row, column));
            press(&mut nav, &grid, Navigation::Right);
            assert_eq!(press(&mut nav, &grid, Navigation::Left), cell(row, column));
        }
    }
    for row in 1..3 {
        let mut nav = at(&grid, cell(row, 2));
        press(&mut nav, &grid, Navigation::Down);
        assert_eq!(press(&mut nav, &grid, Navigation::Up), cell(row, 2));
    }
}

#[test]
fn test_horizontal_edges_focus_the_row() {
    let grid = FocusGrid::new(3, 4);

    let mut nav = at(&grid, cell(1, 3));
    assert_eq!(press(&mut nav, &grid, Navigation::Right), Focus::Row { row: 1 });
    assert_eq!(press(&mut nav, &grid, Navigation::Right), cell(1, 0));
    assert_eq!(press(&mut nav, &grid, Navigation::Left), Focus::Row { row: 1 });
    assert_eq!(press(&mut nav, &grid, Navigation::Left), cell(1, 3));
}

#[test]
fn test_down_past_last_row_is_noop() {
    let grid = FocusGrid::new(3, 4);
    let mut nav = at(&grid, cell(2, 1));

    assert_eq!(nav.navigate(Navigation::Down, false, &grid, &no_children), None);
    assert_eq!(nav.focus(), cell(2, 1));
}

#[test]
fn test_up_from_first_row_without_header_is_noop() {
    let grid = FocusGrid::new(3, 4);
    let mut nav = at(&grid, cell(0, 2));
    assert_eq!(press(&mut nav, &grid, Navigation::Up), cell(0, 2));
}

#[test]
fn test_home_end_within_row() {
    let grid = FocusGrid::new(5, 4);
    let mut nav = at(&grid, cell(2, 2));

    assert_eq!(press(&mut nav, &grid, Navigation::Home), cell(2, 0));
    assert_eq!(press(&mut nav, &grid, Navigation::End), cell(2, 3));
}

#[test]
fn test_ctrl_home_end_jump_to_grid_corners() {
    let grid = FocusGrid::new(5, 4);
    let mut nav = at(&grid, cell(2, 2));

    assert_eq!(jump(&mut nav, &grid, Navigation::Home), cell(0, 0));
    assert_eq!(jump(&mut nav, &grid, Navigation::End), cell(4, 3));
}

// ============================================================================
// Row Focus
// ============================================================================

#[test]
fn test_row_focus_moves_vertically() {
    let grid = FocusGrid::new(5, 4);
    let mut nav = at(&grid, Focus::Row { row: 2 });

    assert_eq!(press(&mut nav, &grid, Navigation::Down), Focus::Row { row: 3 });
    assert_eq!(press(&mut nav, &grid, Navigation::Up), Focus::Row { row: 2 });
    assert_eq!(press(&mut nav, &grid, Navigation::Home), Focus::Row { row: 0 });
    assert_eq!(press(&mut nav, &grid, Navigation::End), Focus::Row { row: 4 });
    assert_eq!(press(&mut nav, &grid, Navigation::Down), Focus::Row { row: 4 });
}

#[test]
fn test_row_up_from_first_row_enters_header() {
    let grid = flat_grid();
    let mut nav = at(&grid, Focus::Row { row: 0 });
    assert_eq!(press(&mut nav, &grid, Navigation::Up), header(0, 0));
}

// ============================================================================
// Header Cells
// ============================================================================

#[test]
fn test_up_climbs_header_tiers() {
    let grid = nested_grid(3);
    let mut nav = at(&grid, cell(0, 2));

    assert_eq!(press(&mut nav, &grid, Navigation::Up), header(2, 2));
    assert_eq!(press(&mut nav, &grid, Navigation::Up), header(1, 1));
    assert_eq!(press(&mut nav, &grid, Navigation::Up), header(0, 1));
    assert_eq!(press(&mut nav, &grid, Navigation::Up), header(0, 1));
    assert_eq!(press(&mut nav, &grid, Navigation::Up), header(0, 1));
}

#[test]
fn test_up_from_shallow_leaf_skips_to_parent_tier() {
    let grid = nested_grid(3);
    let mut nav = at(&grid, header(2, 3));
    assert_eq!(press(&mut nav, &grid, Navigation::Up), header(0, 1));

    let mut nav = at(&grid, header(2, 0));
    assert_eq!(nav.navigate(Navigation::Up, false, &grid, &no_children), None);
}

#[test]
fn test_down_descends_to_first_child_then_body() {
    let grid = nested_grid(3);
    let mut nav = at(&grid, header(0, 1));

    assert_eq!(press(&mut nav, &grid, Navigation::Down), header(1, 1));
    assert_eq!(press(&mut nav, &grid, Navigation::Down), header(2, 1));
    assert_eq!(press(&mut nav, &grid, Navigation::Down), cell(0, 1));

    let mut nav = at(&grid, header(1, 4));
    assert_eq!(press(&mut nav, &grid, Navigation::Down), header(2, 4));
}

#[test]
fn test_down_from_leaf_header_without_rows_is_noop() {
    let grid = nested_grid(0);
    let mut nav = at(&grid, header(2, 1));
    assert_eq!(press(&mut nav, &grid, Navigation::Down), header(2, 1));
}

#[test]
fn test_header_left_right_wrap_within_tier() {
    let grid = nested_grid(3);
    let mut nav = at(&grid, header(2, 4));

    assert_eq!(press(&mut nav, &grid, Navigation::Right), header(2, 0));
    assert_eq!(press(&mut nav, &grid, Navigation::Left), header(2, 4));
    assert_eq!(press(&mut nav, &grid, Navigation::Left), header(2, 3));
}

#[test]
fn test_header_wrap_skips_placeholders() {
    let grid = nested_grid(3);
    assert_eq!(grid.tier(1).len(), 2);

    let mut nav = at(&grid, header(1, 1));
    assert_eq!(press(&mut nav, &grid, Navigation::Right), header(1, 4));
    assert_eq!(press(&mut nav, &grid, Navigation::Right), header(1, 1));

    // A lone header on its tier stays put.
    let mut nav = at(&grid, header(0, 1));
    assert_eq!(nav.navigate(Navigation::Right, false, &grid, &no_children), None);
}

#[test]
fn test_header_home_end() {
    let grid = nested_grid(3);
    let mut nav = at(&grid, header(2, 2));

    assert_eq!(press(&mut nav, &grid, Navigation::Home), header(2, 0));
    assert_eq!(press(&mut nav, &grid, Navigation::End), header(2, 4));
    assert_eq!(jump(&mut nav, &grid, Navigation::Home), cell(0, 0));

    let mut nav = at(&grid, header(2, 2));
    assert_eq!(jump(&mut nav, &grid, Navigation::End), cell(2, 4));
}

// ============================================================================
// Focus Marshalling
// ============================================================================

/// Checkbox in column 0 and the header above it, a switch in column 1,
/// a link in column 2, nothing in column 3.
fn flat_children(cell: CellCoord) -> usize {
    match (cell.row, cell.column) {
        (_, 0) => 1,
        (tablekit::GridRow::Body(_), 1 | 2) => 1,
        _ => 0,
    }
}

fn child(row: usize, column: usize) -> Focus {
    Focus::Child {
        cell: CellCoord::body(row, column),
        child: 0,
    }
}

#[test]
fn test_marshalling_walk() {
    let grid = flat_grid();
    let mut nav = at(&grid, cell(0, 3));
    let mut step = |key| {
        nav.navigate(key, false, &grid, &flat_children);
        nav.focus()
    };

    assert_eq!(step(Navigation::Left), child(0, 2));
    assert_eq!(step(Navigation::Left), child(0, 1));
    assert_eq!(step(Navigation::Down), child(1, 1));
    assert_eq!(step(Navigation::Left), child(1, 0));
    assert_eq!(step(Navigation::Up), child(0, 0));
    assert_eq!(
        step(Navigation::Up),
        Focus::Child {
            cell: CellCoord::header(0, 0),
            child: 0
        }
    );
}

#[test]
fn test_marshalling_moves_between_children() {
    let grid = FocusGrid::new(2, 3);
    let two_in_middle = |cell: CellCoord| if cell.column == 1 { 2 } else { 0 };
    let mut nav = at(&grid, cell(0, 0));

    nav.navigate(Navigation::Right, false, &grid, &two_in_middle);
    assert_eq!(nav.focus(), child(0, 1));

    nav.navigate(Navigation::Right, false, &grid, &two_in_middle);
    assert_eq!(
        nav.focus(),
        Focus::Child {
            cell: CellCoord::body(0, 1),
            child: 1
        }
    );

    nav.navigate(Navigation::Right, false, &grid, &two_in_middle);
    assert_eq!(nav.focus(), cell(0, 2));

    nav.navigate(Navigation::Left, false, &grid, &two_in_middle);
    assert_eq!(nav.focus(), child(0, 1));

    // Back from the first child leaves the cell.
    nav.navigate(Navigation::Left, false, &grid, &two_in_middle);
    assert_eq!(nav.focus(), cell(0, 0));
}

#[test]
fn test_direct_focus_lands_exactly() {
    let grid = flat_grid();
    let mut nav = FocusNavigator::default();

    assert!(nav.focus_cell(&grid, CellCoord::body(1, 1)));
    assert_eq!(nav.focus(), cell(1, 1));
    assert!(!nav.focus_cell(&grid, CellCoord::body(9, 1)));
    assert!(!nav.focus_cell(&grid, CellCoord::header(0, 7)));
    assert_eq!(nav.focus(), cell(1, 1));
}

// ============================================================================
// Direction & Lifecycle
// ============================================================================

#[test]
fn test_rtl_mirrors_horizontal_keys() {
    let grid = FocusGrid::new(3, 4);
    let mut nav = FocusNavigator::new(LayoutDirection::Rtl);
    nav.focus_cell(&grid, CellCoord::body(1, 1));

    assert_eq!(press(&mut nav, &grid, Navigation::Left), cell(1, 2));
    assert_eq!(press(&mut nav, &grid, Navigation::Right), cell(1, 1));
    assert_eq!(press(&mut nav, &grid, Navigation::Down), cell(2, 1));
    assert_eq!(press(&mut nav, &grid, Navigation::Home), cell(2, 0));
}

#[test]
fn test_idle_ignores_navigation() {
    let grid = FocusGrid::new(3, 4);
    let mut nav = FocusNavigator::default();
    assert_eq!(nav.navigate(Navigation::Down, false, &grid, &no_children), None);
    assert_eq!(nav.focus(), Focus::Idle);
}

#[test]
fn test_blur_clears_focus() {
    let grid = FocusGrid::new(3, 4);
    let mut nav = at(&grid, cell(1, 1));
    assert!(nav.blur());
    assert_eq!(nav.focus(), Focus::Idle);
    assert!(!nav.blur());
}

#[test]
fn test_reconcile_clamps_into_smaller_grid() {
    let mut nav = at(&FocusGrid::new(10, 4), cell(7, 3));
    assert!(nav.reconcile(&FocusGrid::new(3, 2), &no_children));
    assert_eq!(nav.focus(), cell(2, 1));

    let mut nav = at(&FocusGrid::new(10, 4), Focus::Row { row: 9 });
    nav.reconcile(&FocusGrid::new(4, 4), &no_children);
    assert_eq!(nav.focus(), Focus::Row { row: 3 });

    let mut nav = at(&FocusGrid::new(10, 4), cell(2, 2));
    assert!(!nav.reconcile(&FocusGrid::new(5, 4), &no_children));
    assert_eq!(nav.focus(), cell(2, 2));
}

#[test]
fn test_reconcile_clears_when_grid_empties() {
    let mut nav = at(&FocusGrid::new(10, 4), cell(7, 3));
    assert!(nav.reconcile(&FocusGrid::new(0, 4), &no_children));
    assert_eq!(nav.focus(), Focus::Idle);
}

#[test]
fn test_reconcile_leaves_vanished_cell_content() {
    let grid = FocusGrid::new(3, 4);
    let two_children = |_: CellCoord| 2;

    let mut nav = at(&grid, Focus::Child {
        cell: CellCoord::body(1, 2),
        child: 1,
    });
    assert!(!nav.reconcile(&grid, &two_children));

    assert!(nav.reconcile(&grid, &|_: CellCoord| 1));
    assert_eq!(
        nav.focus(),
        Focus::Child {
            cell: CellCoord::body(1, 2),
            child: 0
        }
    );

    assert!(nav.reconcile(&grid, &no_children));
    assert_eq!(nav.focus(), cell(1, 2));
}
