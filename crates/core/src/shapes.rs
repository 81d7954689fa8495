//! Shape catalog - the seven tetrominoes and their rotation states
//!
//! Every rotation state is a 4x4 matrix of cell values (0 or the shape's tag).
//! The list order is the rotation traversal order; rotating past the last
//! state wraps to index 0. O has one state, I/S/Z have two, J/L/T have four.
//!
//! The exact cell layout per rotation index decides rotation legality, since
//! rotation is kick-free: the new matrix is tested at the same anchor.

use crate::types::{Cell, Rgb, ShapeKind};

/// One rotation state: `matrix[row][col]`
pub type Matrix = [[Cell; 4]; 4];

/// A catalog entry: rotation states plus the display color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub rotations: &'static [Matrix],
    pub color: Rgb,
}

impl Shape {
    /// Number of rotation states (1, 2 or 4)
    pub fn rotation_count(&self) -> usize {
        self.rotations.len()
    }

    /// Matrix for a rotation index; indices wrap around the state list
    pub fn rotation(&self, index: usize) -> &'static Matrix {
        &self.rotations[index % self.rotations.len()]
    }

    /// Index that follows `index` in the rotation cycle
    pub fn next_rotation(&self, index: usize) -> usize {
        (index + 1) % self.rotations.len()
    }
}

/// Occupied cells of a matrix as `(row, col, tag)`
pub fn cells(matrix: &Matrix) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
    matrix.iter().enumerate().flat_map(|(r, row)| {
        row.iter()
            .enumerate()
            .filter(|(_, &v)| v != 0)
            .map(move |(c, &v)| (r, c, v))
    })
}

static I_ROTATIONS: [Matrix; 2] = [
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]],
];

static J_ROTATIONS: [Matrix; 4] = [
    [[2, 0, 0, 0], [2, 2, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 2, 2, 0], [0, 2, 0, 0], [0, 2, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [2, 2, 2, 0], [0, 0, 2, 0], [0, 0, 0, 0]],
    [[0, 2, 0, 0], [0, 2, 0, 0], [2, 2, 0, 0], [0, 0, 0, 0]],
];

static L_ROTATIONS: [Matrix; 4] = [
    [[0, 0, 3, 0], [3, 3, 3, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 3, 0, 0], [0, 3, 0, 0], [0, 3, 3, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [3, 3, 3, 0], [3, 0, 0, 0], [0, 0, 0, 0]],
    [[3, 3, 0, 0], [0, 3, 0, 0], [0, 3, 0, 0], [0, 0, 0, 0]],
];

static O_ROTATIONS: [Matrix; 1] = [[[0, 4, 4, 0], [0, 4, 4, 0], [0, 0, 0, 0], [0, 0, 0, 0]]];

static S_ROTATIONS: [Matrix; 2] = [
    [[0, 5, 5, 0], [5, 5, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 5, 0, 0], [0, 5, 5, 0], [0, 0, 5, 0], [0, 0, 0, 0]],
];

static T_ROTATIONS: [Matrix; 4] = [
    [[0, 6, 0, 0], [6, 6, 6, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 6, 0, 0], [0, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [6, 6, 6, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
    [[0, 6, 0, 0], [6, 6, 0, 0], [0, 6, 0, 0], [0, 0, 0, 0]],
];

static Z_ROTATIONS: [Matrix; 2] = [
    [[7, 7, 0, 0], [0, 7, 7, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 7, 0], [0, 7, 7, 0], [0, 7, 0, 0], [0, 0, 0, 0]],
];

static CATALOG: [Shape; 7] = [
    Shape {
        kind: ShapeKind::I,
        rotations: &I_ROTATIONS,
        color: ShapeKind::I.color(),
    },
    Shape {
        kind: ShapeKind::J,
        rotations: &J_ROTATIONS,
        color: ShapeKind::J.color(),
    },
    Shape {
        kind: ShapeKind::L,
        rotations: &L_ROTATIONS,
        color: ShapeKind::L.color(),
    },
    Shape {
        kind: ShapeKind::O,
        rotations: &O_ROTATIONS,
        color: ShapeKind::O.color(),
    },
    Shape {
        kind: ShapeKind::S,
        rotations: &S_ROTATIONS,
        color: ShapeKind::S.color(),
    },
    Shape {
        kind: ShapeKind::T,
        rotations: &T_ROTATIONS,
        color: ShapeKind::T.color(),
    },
    Shape {
        kind: ShapeKind::Z,
        rotations: &Z_ROTATIONS,
        color: ShapeKind::Z.color(),
    },
];

/// The full catalog, in `ShapeKind::ALL` order
pub fn shapes() -> &'static [Shape; 7] {
    &CATALOG
}

/// Catalog entry for one kind
pub fn shape(kind: ShapeKind) -> &'static Shape {
    &CATALOG[kind.tag() as usize - 1]
}
