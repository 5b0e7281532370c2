//! Pieces module - shape catalog, occupancy matrices and the falling piece
//!
//! Every kind is stored in its minimal bounding box. Rotation is a plain
//! clockwise matrix transform with no offset search: it either fits in place
//! or it is rejected by the caller.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::types::{Color, PieceKind};

/// Side of the largest bounding box any shape can occupy
pub const MAX_MATRIX_SIZE: usize = 4;

/// Occupied cells in every tetromino
pub const MINOS: usize = 4;

/// Offset of a single mino relative to the piece anchor
pub type MinoOffset = (i8, i8);

/// Binary occupancy grid of up to 4x4 cells.
///
/// Cells outside `rows x cols` are always empty, so two matrices with the
/// same visible occupancy compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Matrix {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE],
}

impl Matrix {
    /// Build from 0/1 rows. Only used for the static catalog.
    const fn from_bits(rows: u8, cols: u8, bits: [[u8; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE]) -> Self {
        let mut cells = [[false; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE];
        let mut r = 0;
        while r < rows as usize {
            let mut c = 0;
            while c < cols as usize {
                cells[r][c] = bits[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Occupancy at `(row, col)`; false outside the bounding box
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// Occupied cells as `(dx, dy)` offsets from the top-left corner
    pub fn offsets(&self) -> ArrayVec<MinoOffset, { MAX_MATRIX_SIZE * MAX_MATRIX_SIZE }> {
        let mut out = ArrayVec::new();
        for r in 0..self.rows as usize {
            for c in 0..self.cols as usize {
                if self.cells[r][c] {
                    out.push((c as i8, r as i8));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise: `new[r][c] = old[rows - 1 - c][r]`.
    ///
    /// The bounding box dimensions swap.
    pub fn rotate_cw(&self) -> Self {
        let rows = self.cols;
        let cols = self.rows;
        let mut cells = [[false; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE];
        for (r, row) in cells.iter_mut().enumerate().take(rows as usize) {
            for (c, cell) in row.iter_mut().enumerate().take(cols as usize) {
                *cell = self.cells[self.rows as usize - 1 - c][r];
            }
        }
        Self { rows, cols, cells }
    }
}

/// Immutable catalog entry for one piece kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDefinition {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub color: Color,
}

/// Shape catalog, indexed by [`PieceKind::index`]
pub static SHAPES: [ShapeDefinition; 7] = [
    ShapeDefinition {
        kind: PieceKind::I,
        matrix: Matrix::from_bits(1, 4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]),
        color: Color::Cyan,
    },
    ShapeDefinition {
        kind: PieceKind::O,
        matrix: Matrix::from_bits(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
        color: Color::Yellow,
    },
    ShapeDefinition {
        kind: PieceKind::T,
        matrix: Matrix::from_bits(2, 3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
        color: Color::Purple,
    },
    ShapeDefinition {
        kind: PieceKind::S,
        matrix: Matrix::from_bits(2, 3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
        color: Color::Green,
    },
    ShapeDefinition {
        kind: PieceKind::Z,
        matrix: Matrix::from_bits(2, 3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]),
        color: Color::Red,
    },
    ShapeDefinition {
        kind: PieceKind::J,
        matrix: Matrix::from_bits(2, 3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
        color: Color::Blue,
    },
    ShapeDefinition {
        kind: PieceKind::L,
        matrix: Matrix::from_bits(2, 3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
        color: Color::Orange,
    },
];

/// Look up the catalog entry for a kind
pub fn shape(kind: PieceKind) -> &'static ShapeDefinition {
    &SHAPES[kind.index()]
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a piece in spawn orientation, horizontally centered on row 0
    pub fn spawn(kind: PieceKind, board_width: u8) -> Self {
        let matrix = shape(kind).matrix;
        let x = (board_width / 2) as i8 - (matrix.cols() / 2) as i8;
        Self {
            kind,
            matrix,
            x,
            y: 0,
        }
    }

    pub fn color(&self) -> Color {
        shape(self.kind).color
    }

    /// Clockwise rotation candidate; the piece itself is left untouched
    pub fn rotated(&self) -> Matrix {
        self.matrix.rotate_cw()
    }

    /// Absolute board coordinates of every occupied cell
    pub fn cells(&self) -> ArrayVec<(i8, i8), MINOS> {
        self.matrix
            .offsets()
            .into_iter()
            .take(MINOS)
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }
}
