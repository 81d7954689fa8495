//! Piece controller tests

use motion_tetris::core::{hard_drop_target, shape, ActivePiece, Board};
use motion_tetris::types::{ShapeKind, SPAWN_X, SPAWN_Y};

#[test]
fn rotating_through_every_state_returns_home() {
    let board = Board::empty();
    for kind in ShapeKind::ALL {
        let mut piece = ActivePiece {
            kind,
            rotation: 0,
            x: 3,
            y: 5,
        };
        let start = piece;
        for _ in 0..shape(kind).rotation_count() {
            assert!(piece.try_rotate(&board), "{kind:?} blocked on empty board");
        }
        assert_eq!(piece, start, "{kind:?}");
    }
}

#[test]
fn rotation_has_no_wall_kick() {
    // Vertical I hugging the right wall: the horizontal state would overhang.
    let board = Board::empty();
    let mut piece = ActivePiece {
        kind: ShapeKind::I,
        rotation: 1,
        x: 7,
        y: 5,
    };
    assert!(piece.is_valid(&board));
    assert!(!piece.try_rotate(&board));
    assert_eq!(piece.rotation, 1);
    assert_eq!(piece.x, 7);
}

#[test]
fn moves_stop_at_walls() {
    let board = Board::empty();
    let mut piece = ActivePiece::spawn(ShapeKind::O);
    assert_eq!((piece.x, piece.y), (SPAWN_X, SPAWN_Y));

    let mut moved = 0;
    while piece.try_move(&board, -1) {
        moved += 1;
    }
    // O occupies matrix columns 1-2, so the anchor can reach -1.
    assert_eq!(piece.x, -1);
    assert_eq!(moved, SPAWN_X + 1);
    assert!(!piece.try_move(&board, -1));
}

#[test]
fn o_piece_falls_to_the_floor_without_clearing() {
    let mut board = Board::empty();
    let mut piece = ActivePiece::spawn(ShapeKind::O);

    let mut steps = 0;
    while piece.try_soft_drop(&board) {
        steps += 1;
    }
    assert_eq!(steps, 18);
    assert_eq!(piece.y, 18);
    assert_eq!(hard_drop_target(&board, ShapeKind::O, 0, SPAWN_X, SPAWN_Y), 18);

    piece.lock_into(&mut board);
    assert_eq!(board.clear_full_rows(), 0);
    assert_eq!(board.filled_count(), 4);
    for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
        assert_eq!(board.get(x, y), Some(ShapeKind::O.tag()));
    }
}

#[test]
fn two_i_pieces_and_an_o_clear_the_floor_row() {
    let mut board = Board::empty();

    for x in [0, 4] {
        let mut piece = ActivePiece {
            kind: ShapeKind::I,
            rotation: 0,
            x,
            y: 0,
        };
        piece.y = piece.hard_drop_target(&board);
        assert_eq!(piece.y, 18);
        piece.lock_into(&mut board);
    }
    assert_eq!(board.clear_full_rows(), 0);

    let mut o = ActivePiece {
        kind: ShapeKind::O,
        rotation: 0,
        x: 7,
        y: 0,
    };
    o.y = o.hard_drop_target(&board);
    o.lock_into(&mut board);

    assert_eq!(board.clear_full_rows(), 1);
    assert_eq!(motion_tetris::core::score_for(1), 100);
    // The top half of the O drops into the floor row.
    assert_eq!(board.filled_count(), 2);
    assert_eq!(board.get(8, 19), Some(ShapeKind::O.tag()));
    assert_eq!(board.get(9, 19), Some(ShapeKind::O.tag()));
}

#[test]
fn hard_drop_target_stops_on_stack() {
    let board = Board::from_rows(&["....#.....", ".........."]);
    // Row 18 has a block under column 4.
    let target = hard_drop_target(&board, ShapeKind::T, 0, 3, 0);
    // The flat side of the T spans columns 3-5 and comes to rest on row 17.
    assert_eq!(target, 16);
}
