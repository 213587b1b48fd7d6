use gridpack_core::prelude::*;

fn triple(t: Transform) -> (i32, i32, bool) {
    (t.x_offset, t.y_offset, t.rotated)
}

#[test]
fn fills_ten_by_ten_in_three_requests() {
    let mut p = GridPacker::with_size(10, 10).expect("valid canvas");

    assert_eq!(triple(p.pack(4, 4)), (0, 0, false));
    // Top strip right of the first piece is an exact fit.
    assert_eq!(triple(p.pack(6, 4)), (4, 0, false));
    // Bottom band spans two free cells.
    assert_eq!(triple(p.pack(10, 6)), (0, 4, false));

    assert!((p.occupancy() - 1.0).abs() < f64::EPSILON);
    assert_eq!(p.pack(1, 1), Transform::NONE);
    assert!(p.grid().is_consistent());
}

#[test]
fn first_piece_splits_into_two_by_two_grid() {
    let mut p = GridPacker::with_size(10, 10).unwrap();
    p.pack(4, 4);

    let g = p.grid();
    assert_eq!((g.rows(), g.columns()), (2, 2));
    assert_eq!((g.column_width(0), g.column_width(1)), (4, 6));
    assert_eq!((g.row_height(0), g.row_height(1)), (4, 6));
    assert!(g.cell(0, 0).filled);
    assert!(!g.cell(0, 1).filled);
    assert!(!g.cell(1, 0).filled);
    assert!(!g.cell(1, 1).filled);
}

#[test]
fn too_large_in_both_orientations_fails() {
    let mut p = GridPacker::with_size(5, 5).unwrap();
    assert_eq!(p.pack(3, 6), Transform::NONE);
    assert_eq!(p.pack(6, 3), Transform::NONE);
    assert_eq!(p.occupancy(), 0.0);
    assert_eq!(p.grid().len(), 1);
}

#[test]
fn full_canvas_request_then_anything_fails() {
    let mut p = GridPacker::with_size(32, 16).unwrap();
    assert_eq!(triple(p.pack(32, 16)), (0, 0, false));
    assert_eq!(p.grid().len(), 1);
    assert!(p.pack(1, 1).is_none());
    assert!(p.try_pack(1, 1).is_none());
    assert_eq!(p.occupancy(), 1.0);
}

#[test]
fn zero_sized_request_is_rejected_without_mutation() {
    let mut p = GridPacker::with_size(8, 8).unwrap();
    let before = p.snapshot();
    assert_eq!(p.pack(0, 3), Transform::NONE);
    assert_eq!(p.pack(3, 0), Transform::NONE);
    assert!(!p.can_pack(0, 0));
    assert_eq!(p.snapshot(), before);
}

#[test]
fn failure_is_idempotent() {
    let mut p = GridPacker::with_size(10, 10).unwrap();
    p.pack(6, 6);
    let before = p.snapshot();

    // 7x7 cannot fit next to a 6x6 on a 10x10 canvas.
    assert!(p.pack(7, 7).is_none());
    assert_eq!(p.snapshot(), before);
    assert!(p.pack(7, 7).is_none());
    assert_eq!(p.snapshot(), before);
    assert_eq!(p.placements().len(), 1);
}

#[test]
fn can_pack_does_not_mutate() {
    let mut p = GridPacker::with_size(10, 10).unwrap();
    p.pack(4, 4);
    let before = p.snapshot();
    assert!(p.can_pack(6, 4));
    assert!(p.can_pack(10, 6));
    assert!(!p.can_pack(10, 7));
    assert_eq!(p.snapshot(), before);
}

#[test]
fn transform_and_placement_agree() {
    let mut p = GridPacker::with_size(20, 20).unwrap();
    p.pack(5, 5);
    let placed = p.try_pack(3, 7).expect("fits");
    let t = Transform::from(placed);
    assert_eq!(t.x_offset as u32, placed.frame.x);
    assert_eq!(t.y_offset as u32, placed.frame.y);
    assert_eq!(t.rotated, placed.rotated);
    assert!(t.is_placed());
    assert!(Transform::from(None).is_none());
}
