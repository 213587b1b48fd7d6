use gridpack_core::grid::{Cell, Grid};

#[test]
fn fresh_grid_is_one_free_cell() {
    let g = Grid::new(12, 7);
    assert_eq!((g.rows(), g.columns(), g.len()), (1, 1, 1));
    assert_eq!(*g.cell(0, 0), Cell::new(12, 7));
    assert_eq!(g.origin(0, 0), (0, 0));
    assert_eq!(g.occupancy(), 0.0);
    assert!(g.is_consistent());
}

#[test]
fn fit_test_reports_dead_margins() {
    let c = Cell::new(6, 4);
    let t = c.fits(4, 4);
    assert!(t.fits);
    assert_eq!((t.dead_width, t.dead_height), (2, 0));

    let t = c.fits(7, 2);
    assert!(!t.fits);
    assert_eq!((t.dead_width, t.dead_height), (-1, 2));
}

#[test]
fn segment_cuts_column_then_row_through_whole_table() {
    let mut g = Grid::new(10, 10);
    g.segment(0, 0, 6, 6);
    assert_eq!((g.rows(), g.columns()), (2, 2));
    assert_eq!(g.cell(0, 0).width, 4);
    assert_eq!(g.cell(0, 0).height, 4);
    assert_eq!(g.cell(1, 1).width, 6);
    assert_eq!(g.cell(1, 1).height, 6);
    assert!(g.is_consistent());

    g.fill_block(0..=0, 0..=0);
    g.segment(1, 1, 2, 3);
    assert_eq!((g.rows(), g.columns()), (3, 3));
    let widths: Vec<u32> = (0..3).map(|c| g.column_width(c)).collect();
    let heights: Vec<u32> = (0..3).map(|r| g.row_height(r)).collect();
    assert_eq!(widths, vec![4, 4, 2]);
    assert_eq!(heights, vec![4, 3, 3]);
    assert!(g.is_consistent());

    // The filled cell keeps its coordinates and size.
    assert!(g.cell(0, 0).filled);
    assert_eq!(g.origin(1, 1), (4, 4));
    assert_eq!(g.origin(2, 2), (8, 7));
}

#[test]
fn split_cells_inherit_fill_state() {
    let mut g = Grid::new(10, 10);
    g.fill_block(0..=0, 0..=0);
    g.segment(0, 0, 3, 0);
    assert_eq!(g.columns(), 2);
    assert!(g.cell(0, 0).filled && g.cell(0, 1).filled);
    assert_eq!(g.filled_area(), 100);

    g.segment(0, 1, 0, 4);
    assert_eq!(g.rows(), 2);
    assert!(g.cells().all(|c| c.filled));
    assert_eq!(g.filled_area(), 100);
    assert!(g.is_consistent());
}

#[test]
fn zero_leftover_leaves_grid_untouched() {
    let mut g = Grid::new(5, 5);
    g.segment(0, 0, 0, 0);
    assert_eq!(g.len(), 1);
    assert_eq!(*g.cell(0, 0), Cell::new(5, 5));
}

#[test]
fn cell_views_carry_derived_positions() {
    let mut g = Grid::new(10, 10);
    g.segment(0, 0, 6, 6);
    let views: Vec<_> = g.cells().map(|c| (c.x, c.y, c.width, c.height)).collect();
    assert_eq!(views, vec![(0, 0, 4, 4), (4, 0, 6, 4), (0, 4, 4, 6), (4, 4, 6, 6)]);
}

#[test]
#[should_panic]
fn leftover_as_wide_as_cell_panics() {
    let mut g = Grid::new(4, 4);
    g.segment(0, 0, 4, 0);
}

#[test]
#[should_panic]
fn leftover_as_tall_as_cell_panics() {
    let mut g = Grid::new(4, 4);
    g.segment(0, 0, 1, 5);
}
