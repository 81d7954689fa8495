//! Key mapping from terminal events to game input.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press means to the host loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyInput {
    /// A command for the session channel
    Command(Command),
    /// Flip keyboard fast drop (the keyboard analogue of a held fist)
    ToggleFastDrop,
    Restart,
    Quit,
}

/// Map keyboard input to game input.
pub fn handle_key_event(key: KeyEvent) -> Option<KeyInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(KeyInput::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(KeyInput::Command(Command::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(KeyInput::Command(Command::Right))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(KeyInput::Command(Command::SoftDrop))
        }

        // Rotation
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(KeyInput::Command(Command::Rotate))
        }

        // Drops
        KeyCode::Char(' ') => Some(KeyInput::Command(Command::HardDrop)),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(KeyInput::ToggleFastDrop),

        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyInput::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
