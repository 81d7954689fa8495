//! Gesture source feeding the session through the shared command channel

use motion_tetris::core::GameSession;
use motion_tetris::gesture::{GestureFrame, GestureSource};
use motion_tetris::input::{merge_signals, CommandSource, KeyboardQueue};
use motion_tetris::types::{Command, GESTURE_COOLDOWN_MS};

/// Run one host tick: observe the reading, merge with the keyboard, tick the session
fn host_tick(
    session: &mut GameSession,
    keyboard: &mut KeyboardQueue,
    gestures: &mut GestureSource,
    reading: Option<Command>,
    now: u64,
) -> motion_tetris::core::TickOutcome {
    if let Some(command) = reading {
        gestures.observe(GestureFrame::new(command, now));
    }
    let mut sources: [&mut dyn CommandSource; 2] = [keyboard, gestures];
    let signal = merge_signals(&mut sources, now);
    session.tick(signal, now)
}

#[test]
fn held_left_moves_once_per_gesture_cooldown() {
    let mut session = GameSession::default();
    let mut keyboard = KeyboardQueue::new();
    let mut gestures = GestureSource::default();

    // 10ms host ticks for 700ms with the hand held left the whole time.
    let mut applied = Vec::new();
    for now in (0..=700).step_by(10) {
        let out = host_tick(&mut session, &mut keyboard, &mut gestures, Some(Command::Left), now);
        if out.command_applied == Some(Command::Left) {
            applied.push(now);
        }
    }
    let cooldown = u64::from(GESTURE_COOLDOWN_MS);
    assert_eq!(applied, vec![0, cooldown, 2 * cooldown]);
    assert_eq!(session.active().unwrap().x, 0);
}

#[test]
fn held_fist_speeds_up_gravity_without_hard_dropping() {
    let mut session = GameSession::default();
    let mut keyboard = KeyboardQueue::new();
    let mut gestures = GestureSource::default();

    let mut falls = 0;
    for now in (0..=520).step_by(10) {
        let out = host_tick(&mut session, &mut keyboard, &mut gestures, Some(Command::HardDrop), now);
        assert!(out.lock.is_none());
        assert_eq!(out.command_applied, None);
        if out.fell {
            falls += 1;
        }
    }
    // 500 / 3 = 166ms, so on a 10ms tick the piece falls at 170, 340 and 510.
    assert_eq!(falls, 3);
    assert!(session.fast_drop());
}

#[test]
fn lost_detector_degrades_to_keyboard_only() {
    let mut session = GameSession::default();
    let mut keyboard = KeyboardQueue::new();
    let mut gestures = GestureSource::default();

    host_tick(&mut session, &mut keyboard, &mut gestures, Some(Command::HardDrop), 0);
    assert!(session.fast_drop());

    // No new frames; once the reading is stale fast drop is released.
    host_tick(&mut session, &mut keyboard, &mut gestures, None, 501);
    assert!(!session.fast_drop());

    keyboard.push(Command::Right);
    let out = host_tick(&mut session, &mut keyboard, &mut gestures, None, 510);
    assert_eq!(out.command_applied, Some(Command::Right));
}

#[test]
fn keyboard_hard_drop_beats_gesture_move() {
    let mut session = GameSession::default();
    let mut keyboard = KeyboardQueue::new();
    let mut gestures = GestureSource::default();

    keyboard.push(Command::HardDrop);
    let out = host_tick(&mut session, &mut keyboard, &mut gestures, Some(Command::Left), 0);
    assert_eq!(out.command_applied, Some(Command::HardDrop));
    assert!(out.lock.is_some());
    assert_eq!(session.pieces_locked(), 1);
}
