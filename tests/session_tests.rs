//! Game session scenarios driven through the public tick API

use motion_tetris::core::{
    Board, GameSession, GameSnapshot, Phase, PieceSequence, SessionConfig, SpawnPolicy,
};
use motion_tetris::types::{Command, ShapeKind, Signal};

#[test]
fn hard_drop_completing_floor_row_scores_one_line() {
    let board = Board::from_rows(&["###....###"]);
    let mut s = GameSession::from_board(SessionConfig::default(), board);
    assert_eq!(s.active().unwrap().kind, ShapeKind::I);

    let out = s.tick(Command::HardDrop, 0);
    let lock = out.lock.expect("hard drop locks");
    assert_eq!(lock.lines_cleared, 1);
    assert_eq!(lock.score_gained, 100);
    assert_eq!(s.score(), 100);
    assert_eq!(s.lines_cleared_total(), 1);
    assert_eq!(s.board().filled_count(), 0);
}

#[test]
fn gravity_lock_clears_and_scores() {
    let board = Board::from_rows(&["###....###"]);
    let mut s = GameSession::from_board(SessionConfig::default(), board);
    s.tick(Command::None, 0);

    let mut now = 0;
    let lock = loop {
        now += 500;
        if let Some(lock) = s.tick(Command::None, now).lock {
            break lock;
        }
    };
    assert_eq!(lock.lines_cleared, 1);
    assert_eq!(s.score(), 100);
    assert_eq!(s.pieces_locked(), 1);
}

#[test]
fn vertical_i_clears_two_rows_at_once() {
    let board = Board::from_rows(&["#########.", "#########."]);
    let mut s = GameSession::from_board(SessionConfig::default(), board);

    assert_eq!(s.tick(Command::Rotate, 0).command_applied, Some(Command::Rotate));
    for (i, now) in [150, 300, 450, 600].into_iter().enumerate() {
        assert_eq!(s.tick(Command::Right, now).command_applied, Some(Command::Right));
        assert_eq!(s.active().unwrap().x, 4 + i as i8);
    }

    let lock = s.tick(Command::HardDrop, 750).lock.unwrap();
    assert_eq!(lock.lines_cleared, 2);
    assert_eq!(lock.score_gained, 300);
    assert_eq!(s.score(), 300);
    // The upper half of the I slides into the two bottom rows.
    assert_eq!(s.board().filled_count(), 2);
    assert_eq!(s.board().get(9, 18), Some(ShapeKind::I.tag()));
    assert_eq!(s.board().get(9, 19), Some(ShapeKind::I.tag()));
}

#[test]
fn stacking_in_the_middle_ends_the_game() {
    let mut s = GameSession::default();
    let mut now = 0;
    let mut drops = 0;
    while !s.game_over() {
        assert!(drops < 200, "game never ended");
        s.tick(Command::HardDrop, now);
        now += 150;
        drops += 1;
    }

    assert_eq!(s.phase(), Phase::GameOver);
    assert!(s.active().is_none());
    assert_eq!(s.lines_cleared_total(), 0);

    // Frozen until reset.
    let pieces = s.pieces_locked();
    let board = s.board().clone();
    for i in 0..10 {
        let out = s.tick(Signal::new(Command::Left, true), now + i * 1_000);
        assert!(out.game_over);
        assert!(out.lock.is_none());
    }
    assert_eq!(s.pieces_locked(), pieces);
    assert_eq!(s.board(), &board);

    s.reset();
    assert!(!s.game_over());
    assert_eq!(s.score(), 0);
    assert_eq!(s.pieces_locked(), 0);
    assert_eq!(s.board().filled_count(), 0);
    assert_eq!(s.active().unwrap().kind, ShapeKind::I);
}

#[test]
fn strongest_command_wins_within_a_tick() {
    let mut s = GameSession::default();
    let signal = Signal::from(Command::Left).merge(Signal::from(Command::Rotate));
    let out = s.tick(signal, 0);
    assert_eq!(out.command_applied, Some(Command::Rotate));
    assert_eq!(s.active().unwrap().x, 3);
}

#[test]
fn unknown_wire_command_is_ignored() {
    let mut s = GameSession::default();
    let before = s.active();
    let out = s.tick(Command::parse("jump"), 0);
    assert_eq!(out.command_applied, None);
    assert_eq!(s.active(), before);
}

#[test]
fn snapshot_into_reuses_buffer() {
    let mut s = GameSession::default();
    let mut snap = GameSnapshot::default();
    s.snapshot_into(&mut snap);
    assert_eq!(snap.active.unwrap().kind, ShapeKind::I);
    assert_eq!(snap.ghost_y, Some(18));

    s.tick(Command::HardDrop, 0);
    s.snapshot_into(&mut snap);
    assert_eq!(snap.pieces, 1);
    assert_eq!(snap.active.unwrap().kind, ShapeKind::J);
    assert_eq!(snap, s.snapshot());
}

#[test]
fn cycle_order_is_catalog_order() {
    let mut seq = PieceSequence::new(SpawnPolicy::Cycle);
    let kinds: Vec<_> = (0..8).map(|_| seq.next()).collect();
    assert_eq!(
        kinds,
        vec![
            ShapeKind::I,
            ShapeKind::J,
            ShapeKind::L,
            ShapeKind::O,
            ShapeKind::S,
            ShapeKind::T,
            ShapeKind::Z,
            ShapeKind::I,
        ]
    );
}

#[test]
fn seeded_bag_is_replayable_and_complete() {
    let mut a = PieceSequence::new(SpawnPolicy::Bag { seed: 7 });
    let mut b = PieceSequence::new(SpawnPolicy::Bag { seed: 7 });

    for _ in 0..3 {
        let mut bag: Vec<_> = (0..7)
            .map(|_| {
                let peeked = a.peek();
                let kind = a.next();
                assert_eq!(peeked, kind);
                assert_eq!(b.next(), kind);
                kind
            })
            .collect();
        bag.sort_by_key(|k| k.tag());
        assert_eq!(bag, ShapeKind::ALL.to_vec());
    }
}

#[test]
fn config_timings_are_honoured() {
    let config = SessionConfig {
        gravity_interval_ms: 100,
        command_interval_ms: 40,
        ..SessionConfig::default()
    };
    let mut s = GameSession::new(config);
    assert!(!s.tick(Command::Left, 0).fell);
    assert_eq!(s.tick(Command::Left, 39).command_applied, None);
    assert_eq!(s.tick(Command::Left, 40).command_applied, Some(Command::Left));
    assert!(s.tick(Command::None, 100).fell);
}
