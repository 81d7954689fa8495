//! Plain-data view of a session for renderers and tests
//!
//! A snapshot is `Copy` and holds no references, so the host can fill one per
//! frame with [`GameSession::snapshot_into`](crate::GameSession::snapshot_into)
//! and hand it to the view without borrowing the session.

use crate::piece::ActivePiece;
use crate::types::{Cell, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub rotation: usize,
    pub x: i8,
    pub y: i8,
}

impl From<ActivePiece> for ActiveSnapshot {
    fn from(value: ActivePiece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

impl From<ActiveSnapshot> for ActivePiece {
    fn from(value: ActiveSnapshot) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: ShapeKind,
    pub score: u32,
    pub lines: u32,
    pub pieces: u32,
    pub game_over: bool,
    pub fast_drop: bool,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost_y = None;
        self.next = ShapeKind::I;
        self.score = 0;
        self.lines = 0;
        self.pieces = 0;
        self.game_over = false;
        self.fast_drop = false;
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[EMPTY; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: ShapeKind::I,
            score: 0,
            lines: 0,
            pieces: 0,
            game_over: false,
            fast_drop: false,
        }
    }
}
