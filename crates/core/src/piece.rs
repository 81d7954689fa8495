//! Piece controller - the active falling piece
//!
//! An [`ActivePiece`] is a shape kind, a rotation index into the shape's state
//! list and the anchor of its 4x4 box in board coordinates. Every attempt is
//! checked against the board; a rejected attempt leaves the piece untouched
//! and is not an error.

use crate::board::Board;
use crate::shapes::{shape, Matrix};
use crate::types::{ShapeKind, BOARD_HEIGHT, SPAWN_X, SPAWN_Y};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: ShapeKind,
    pub rotation: usize,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece at the spawn anchor with rotation 0
    pub fn spawn(kind: ShapeKind) -> Self {
        Self {
            kind,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Matrix for the current rotation
    pub fn matrix(&self) -> &'static Matrix {
        shape(self.kind).rotation(self.rotation)
    }

    /// Check the current placement against the board
    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid(self.matrix(), self.x, self.y)
    }

    /// Shift horizontally by `dx` if the target placement is valid
    ///
    /// A shift whose anchor does not fit in `i8` is off the board and fails.
    pub fn try_move(&mut self, board: &Board, dx: i8) -> bool {
        match self.x.checked_add(dx) {
            Some(x) if board.is_valid(self.matrix(), x, self.y) => {
                self.x = x;
                true
            }
            _ => false,
        }
    }

    /// Advance to the next rotation state in place
    ///
    /// No wall kicks and no offset search: the next state is tested at the
    /// same anchor and the rotation simply fails if it collides.
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let next = shape(self.kind).next_rotation(self.rotation);
        if board.is_valid(shape(self.kind).rotation(next), self.x, self.y) {
            self.rotation = next;
            true
        } else {
            false
        }
    }

    /// Move one row down; doubles as the gravity step
    pub fn try_soft_drop(&mut self, board: &Board) -> bool {
        match self.y.checked_add(1) {
            Some(y) if board.is_valid(self.matrix(), self.x, y) => {
                self.y = y;
                true
            }
            _ => false,
        }
    }

    /// Landing row for the current placement (see [`hard_drop_target`])
    pub fn hard_drop_target(&self, board: &Board) -> i8 {
        hard_drop_target(board, self.kind, self.rotation, self.x, self.y)
    }

    /// Merge the piece into the board at its current placement
    pub fn lock_into(&self, board: &mut Board) {
        board.lock(self.matrix(), self.x, self.y);
    }
}

/// Lowest valid anchor row reachable by falling straight down from `y`
///
/// Probes `y + 1` until it becomes invalid and returns the last valid row.
/// The probe never goes past the board height. Nothing is mutated; the
/// caller locks at the returned row.
pub fn hard_drop_target(board: &Board, kind: ShapeKind, rotation: usize, x: i8, y: i8) -> i8 {
    let matrix = shape(kind).rotation(rotation);
    let mut target = y;
    while target < BOARD_HEIGHT as i8 && board.is_valid(matrix, x, target + 1) {
        target += 1;
    }
    target
}
