use gridpack_core::grid::Grid;
use gridpack_core::packer::candidate::{Fit, Sides, best, combine_scan, evaluate, exposed_surface};

/// 10x10 canvas after placing 4x4 at the origin: columns [4, 6], rows [4, 6].
fn quartered() -> Grid {
    let mut g = Grid::new(10, 10);
    g.segment(0, 0, 6, 6);
    g.fill_block(0..=0, 0..=0);
    g
}

#[test]
fn fresh_canvas_scores_only_cut_edges() {
    let g = Grid::new(10, 10);
    assert_eq!(exposed_surface(&g, 0, 10, 10, Sides::ALL), 0);
    assert_eq!(exposed_surface(&g, 0, 4, 10, Sides::ALL), 10);
    assert_eq!(exposed_surface(&g, 0, 4, 4, Sides::ALL), 8);
}

#[test]
fn exact_fit_against_filled_neighbour_scores_low() {
    let g = quartered();
    // 6x4 in the top-right cell: left is filled, right is the border,
    // only the free cell below is exposed.
    assert_eq!(exposed_surface(&g, g.index(0, 1), 6, 4, Sides::ALL), 6);
    // 4x6 in the bottom-left cell: only the free cell to the right is exposed.
    assert_eq!(exposed_surface(&g, g.index(1, 0), 4, 6, Sides::ALL), 6);
    // 6x4 in the bottom-right cell touches two free neighbours and leaves a strip.
    assert_eq!(exposed_surface(&g, g.index(1, 1), 6, 4, Sides::ALL), 16);
}

#[test]
fn sides_mask_limits_counted_edges() {
    let g = quartered();
    let only_left = Sides {
        left: true,
        top: false,
        right: false,
        bottom: false,
    };
    assert_eq!(exposed_surface(&g, g.index(1, 1), 6, 4, only_left), 4);
}

#[test]
fn combine_scan_spans_bottom_band() {
    let mut g = quartered();
    // The free cell above the block's right half exposes its 6-wide top edge.
    let (last, score) = combine_scan(&g, g.index(1, 0), 10, 6).expect("band is free");
    assert_eq!(last, g.index(1, 1));
    assert_eq!(score, 6);

    g.fill_block(0..=0, 1..=1);
    let (last, score) = combine_scan(&g, g.index(1, 0), 10, 6).expect("band is free");
    assert_eq!(last, g.index(1, 1));
    assert_eq!(score, 0);
}

#[test]
fn combine_scan_spans_rows() {
    let g = quartered();
    let (last, score) = combine_scan(&g, g.index(0, 1), 4, 6).expect("column is free");
    assert_eq!(last, g.index(1, 1));
    assert_eq!(score, 12);
}

#[test]
fn combine_scan_fails_past_edges_and_filled_cells() {
    let mut g = quartered();
    assert!(combine_scan(&g, g.index(1, 0), 6, 10).is_none());
    assert!(combine_scan(&g, g.index(1, 1), 10, 6).is_none());
    assert!(combine_scan(&g, g.index(1, 0), 4, 10).is_none());

    g.fill_block(1..=1, 1..=1);
    assert!(combine_scan(&g, g.index(1, 0), 6, 4).is_none());
}

#[test]
fn evaluation_lists_direct_and_combined_candidates() {
    let g = quartered();
    let all = evaluate(&g, 6, 4, true);
    assert!(all.iter().all(|c| !g.cell_at(c.index).filled));
    assert!(all.iter().any(|c| c.fit == Fit::Direct && !c.rotated));
    assert!(all.iter().any(|c| matches!(c.fit, Fit::Combined { .. })));

    let winner = best(&g, 6, 4, true, false).expect("some candidate");
    assert_eq!(winner.index, g.index(0, 1));
    assert_eq!(winner.score, 6);
    assert!(!winner.rotated);
    assert_eq!(winner.fit, Fit::Direct);
}

#[test]
fn rotation_disabled_skips_rotated_candidates() {
    let g = quartered();
    assert!(evaluate(&g, 6, 4, false).iter().all(|c| !c.rotated));

    let strip = Grid::new(10, 4);
    assert!(best(&strip, 4, 10, false, false).is_none());
    let rotated = best(&strip, 4, 10, true, false).expect("fits rotated");
    assert!(rotated.rotated);
    assert_eq!((rotated.width, rotated.height), (10, 4));
    assert_eq!(rotated.score, 0);
}
