//! Board module - manages the game grid
//!
//! The board is a 10x20 grid of locked cell tags (0 = empty, 1..=7 = shape tag).
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)
//!
//! The board is the sole owner of locked-piece state. It is mutated only by
//! [`Board::lock`] and [`Board::clear_full_rows`] during play.

use crate::shapes::{cells, Matrix};
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn empty() -> Self {
        Self {
            cells: [EMPTY; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    ///
    /// Takes `i16` so anchor plus matrix offset never overflows for any `i8`
    /// anchor.
    #[inline(always)]
    fn index(x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= i16::from(BOARD_WIDTH) || y < 0 || y >= i16::from(BOARD_HEIGHT) {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    /// Board coordinates of a matrix cell with the box anchored at (x, y)
    #[inline(always)]
    fn offset(x: i8, y: i8, r: usize, c: usize) -> (i16, i16) {
        (i16::from(x) + c as i16, i16::from(y) + r as i16)
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x.into(), y.into()).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x.into(), y.into()) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check whether a rotation matrix fits with its anchor at (x, y)
    ///
    /// Only occupied matrix cells are checked: each must land inside the board
    /// on an empty cell. Empty matrix cells impose no constraint even when they
    /// map outside the board, which is what lets a 4x4 bounding box overhang
    /// the walls.
    pub fn is_valid(&self, matrix: &Matrix, x: i8, y: i8) -> bool {
        cells(matrix).all(|(r, c, _)| {
            let (bx, by) = Self::offset(x, y, r, c);
            matches!(Self::index(bx, by), Some(idx) if self.cells[idx] == EMPTY)
        })
    }

    /// Write a matrix's occupied cells into the board
    ///
    /// Callers check [`Board::is_valid`] first. No validation happens here;
    /// writes that would fall outside the board are dropped.
    pub fn lock(&mut self, matrix: &Matrix, x: i8, y: i8) {
        for (r, c, tag) in cells(matrix) {
            let (bx, by) = Self::offset(x, y, r, c);
            if let Some(idx) = Self::index(bx, by) {
                self.cells[idx] = tag;
            }
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    /// One row of cells (panics if `y` is out of range)
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Iterate rows from top (row 0) to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    /// Remove every full row and return how many were removed
    ///
    /// Compacting pass: surviving rows are copied downward in order, bottom to
    /// top, and the rows left over at the top are zeroed. Equivalent to
    /// repeatedly removing one full row and shifting everything above it down.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0u32;
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * WIDTH;
                    let dst_start = write_y * WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + WIDTH, dst_start);
                }
            }
        }

        self.cells[..write_y * WIDTH].fill(EMPTY);
        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    /// Copy the board into a row-major grid for snapshots
    pub fn write_u8_grid(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (dst, src) in out.iter_mut().zip(self.cells.chunks_exact(WIDTH)) {
            dst.copy_from_slice(src);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// Build a board from rows of text, bottom-aligned
    ///
    /// `'.'` or `' '` is empty, `'1'..='7'` is that tag, any other character is tag 1.
    /// Missing rows at the top are empty. Handy for tests and benches.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Self::empty();
        let offset = HEIGHT.saturating_sub(rows.len());
        for (i, line) in rows.iter().enumerate().take(HEIGHT) {
            let y = (offset + i) as i8;
            for (x, ch) in line.chars().take(WIDTH).enumerate() {
                let cell = match ch {
                    '.' | ' ' => EMPTY,
                    d @ '1'..='7' => d as u8 - b'0',
                    _ => 1,
                };
                board.set(x as i8, y, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}
