use motion_tetris::core::{GameSession, GameSnapshot};
use motion_tetris::term::{AnchorY, FrameBuffer, GameView, GestureStatusView, HudView, Viewport};
use motion_tetris::types::{cell_color, Command, ShapeKind};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_string(y));
        all.push('\n');
    }
    all
}

fn playing_snapshot() -> GameSnapshot {
    GameSession::default().snapshot()
}

#[test]
fn term_view_renders_border_corners() {
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board pixels = 10*2 by 20*1 => 20x20
    // plus border => 22x22
    let fb = view.render(&playing_snapshot(), &HudView::default(), Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_in_tag_color() {
    let mut snap = GameSnapshot::default();
    snap.board[19][0] = ShapeKind::Z.tag();

    let fb = GameView::default().render(&snap, &HudView::default(), Viewport::new(22, 22));

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    for x in [1, 2] {
        let cell = fb.get(x, 20).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, cell_color(ShapeKind::Z.tag()));
    }
    assert_eq!(fb.get(3, 20).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_and_ghost() {
    let snap = playing_snapshot();
    assert_eq!(snap.ghost_y, Some(18));

    let fb = GameView::default().render(&snap, &HudView::default(), Viewport::new(22, 22));

    // I at anchor (3, 0): its cells sit on board row 1, columns 3..=6.
    for x in 7..15 {
        let cell = fb.get(x, 2).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, ShapeKind::I.color());
    }
    // Ghost on board row 19.
    for x in 7..15 {
        assert_eq!(fb.get(x, 20).unwrap().ch, '░');
    }
    assert_eq!(fb.get(5, 20).unwrap().ch, '·');
}

#[test]
fn term_view_draws_hud_when_wide_enough() {
    let mut snap = playing_snapshot();
    snap.score = 1234;
    snap.lines = 10;
    snap.pieces = 37;

    let hud = HudView { fps: 98, gesture: None };
    let fb = GameView::default().render(&snap, &hud, Viewport::new(60, 22));
    let all = screen_text(&fb);

    for needle in ["SCORE", "1234", "LINES", "PIECES", "37", "NEXT", "FPS 98", "GESTURE", "OFF"] {
        assert!(all.contains(needle), "missing {needle}:\n{all}");
    }
    assert!(!all.contains("FAST DROP"));
}

#[test]
fn term_view_shows_gesture_reading_and_fast_drop() {
    let mut snap = playing_snapshot();
    snap.fast_drop = true;

    let waiting = HudView {
        fps: 0,
        gesture: Some(GestureStatusView {
            connected: false,
            reading: None,
            hands: 0,
        }),
    };
    let all = screen_text(&GameView::default().render(&snap, &waiting, Viewport::new(60, 22)));
    assert!(all.contains("waiting"));
    assert!(all.contains("FAST DROP"));

    let reading = HudView {
        fps: 0,
        gesture: Some(GestureStatusView {
            connected: true,
            reading: Some(Command::Rotate),
            hands: 2,
        }),
    };
    let all = screen_text(&GameView::default().render(&snap, &reading, Viewport::new(60, 22)));
    assert!(all.contains("rotate"));
    assert!(all.contains("h2"));
}

#[test]
fn term_view_game_over_overlay_shows_score_and_hint() {
    let mut snap = GameSnapshot::default();
    snap.game_over = true;
    snap.score = 4200;

    let all = screen_text(&GameView::default().render(
        &snap,
        &HudView::default(),
        Viewport::new(22, 22),
    ));
    assert!(all.contains("GAME OVER"));
    assert!(all.contains("SCORE 4200"));
    assert!(all.contains("R restart / Q quit"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let view = GameView::default();

    // Board frame is 22 rows tall (20 + border).
    let fb = view.render(&playing_snapshot(), &HudView::default(), Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&playing_snapshot(), &HudView::default(), Viewport::new(22, 30));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}
