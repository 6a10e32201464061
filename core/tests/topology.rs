use kakera_core::outline::JUT_OVERHANG;
use kakera_core::{Dimensions, GridSpec, PathSeg, PieceGrid, Side, PIECE_UNIT};

fn spec(width: u32, height: u32) -> GridSpec {
    GridSpec {
        dimensions: Dimensions { width, height },
        piece_size_px: 100,
    }
}

#[test]
fn shared_edges_pair_tab_with_blank() {
    let grid = PieceGrid::generate(spec(6, 4), 0xA5A5_0001);
    for piece in 0..grid.piece_count() {
        for side in Side::ALL {
            let info = grid.side(piece, side);
            match grid.neighbor(piece, side) {
                None => assert!(info.is_edge),
                Some(neighbor) => {
                    assert!(!info.is_edge);
                    let other = grid.side(neighbor, side.opposite());
                    assert_eq!(info.is_outer, !other.is_outer);
                }
            }
        }
    }
}

#[test]
fn outlines_close_back_at_origin() {
    let grid = PieceGrid::generate(spec(5, 3), 99);
    for piece in 0..grid.piece_count() {
        let (mut x, mut y) = (0.0f32, 0.0f32);
        for seg in grid.outline(piece) {
            let (dx, dy) = seg.end_delta();
            x += dx;
            y += dy;
        }
        assert!(x.abs() < 1e-3, "piece {piece} open in x by {x}");
        assert!(y.abs() < 1e-3, "piece {piece} open in y by {y}");
    }
}

#[test]
fn single_piece_is_a_plain_square() {
    let grid = PieceGrid::generate(spec(1, 1), 7);
    let outline = grid.outline(0);
    assert_eq!(outline.len(), 5);
    assert!(matches!(outline[0], PathSeg::Move { .. }));
    assert!(outline[1..]
        .iter()
        .all(|seg| matches!(seg, PathSeg::Line { .. })));
}

#[test]
fn interior_sides_carry_the_jut_curve() {
    let grid = PieceGrid::generate(spec(2, 2), 11);
    // Piece 0: top and left are straight edges, right and bottom carry the
    // five-primitive jut path.
    assert_eq!(grid.outline(0).len(), 1 + 1 + 5 + 5 + 1);
    assert!(grid.side(0, Side::Top).is_edge);
    assert!(grid.side(0, Side::Left).is_edge);
    assert!(!grid.side(0, Side::Right).is_edge);
    assert!(!grid.side(0, Side::Bottom).is_edge);
}

#[test]
fn regenerated_outlines_are_bit_identical() {
    let generated = PieceGrid::generate(spec(4, 3), 0xDEAD_BEEF);
    let flags: Vec<[bool; 4]> = (0..generated.piece_count())
        .map(|piece| generated.outer_flags(piece))
        .collect();
    let rebuilt = PieceGrid::from_flags(spec(4, 3), &flags);
    for piece in 0..generated.piece_count() {
        assert_eq!(generated.outline(piece), rebuilt.outline(piece));
        for side in Side::ALL {
            assert_eq!(generated.side(piece, side), rebuilt.side(piece, side));
        }
    }
}

#[test]
fn generation_is_deterministic_per_seed() {
    let a = PieceGrid::generate(spec(4, 4), 123);
    let b = PieceGrid::generate(spec(4, 4), 123);
    for piece in 0..a.piece_count() {
        assert_eq!(a.outer_flags(piece), b.outer_flags(piece));
    }
}

#[test]
fn sample_rect_overhangs_only_outer_sides() {
    // 2x1 grid with a known seam: piece 0 carries the tab on its right
    // side, so piece 1's left side is the blank.
    let flags = [
        [false, true, false, false],
        [false, false, false, false],
    ];
    let grid = PieceGrid::from_flags(spec(2, 1), &flags);
    let overhang = JUT_OVERHANG / PIECE_UNIT * 100.0;

    let left = grid.sample_rect(0);
    assert_eq!(left.x, 0.0);
    assert_eq!(left.y, 0.0);
    assert!((left.width - (100.0 + overhang)).abs() < 1e-3);
    assert!((left.height - 100.0).abs() < 1e-3);

    let right = grid.sample_rect(1);
    assert_eq!(right.x, 100.0);
    assert!((right.width - 100.0).abs() < 1e-3);
}
