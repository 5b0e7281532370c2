//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is empty or holds the
//! color of a locked piece. Storage is a flat row-major buffer owned by the
//! board; dimensions never change after construction.
//! Coordinates: (x, y) with x growing to the right and y growing downward.
//! Row 0 is the top; pieces may hang above it (negative y) while spawning.

use crate::config::ConfigError;
use crate::pieces::{Matrix, Tetromino};
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_DIMENSION, MIN_BOARD_DIMENSION};

/// The game board using flat buffer storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat buffer of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board.
    ///
    /// Both dimensions must lie in `MIN_BOARD_DIMENSION..=MAX_BOARD_DIMENSION`;
    /// coordinates are `i8`, so anything larger could not be addressed.
    pub fn new(width: u8, height: u8) -> Result<Self, ConfigError> {
        check_dimensions(width, height)?;
        Ok(Self::empty(width, height))
    }

    fn empty(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8 {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Borrow one row, top row first
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height as usize {
            return None;
        }
        let start = y * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Would `matrix` anchored at `(x, y)` collide?
    ///
    /// Every occupied cell must lie in `[0, width)` horizontally and above
    /// the bottom edge. Cells at negative rows skip the occupancy check, so a
    /// piece may hang above the visible board.
    pub fn collides_at(&self, matrix: &Matrix, x: i8, y: i8) -> bool {
        matrix.offsets().iter().any(|&(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= self.width as i8 || py >= self.height as i8 {
                return true;
            }
            py >= 0 && self.is_occupied(px, py)
        })
    }

    /// Would `piece` translated by `(dx, dy)` collide?
    pub fn collides(&self, piece: &Tetromino, dx: i8, dy: i8) -> bool {
        self.collides_at(&piece.matrix, piece.x + dx, piece.y + dy)
    }

    /// Write the piece's color into every occupied cell at row >= 0.
    ///
    /// Returns the number of cells that were above the board and dropped.
    pub fn commit(&mut self, piece: &Tetromino) -> usize {
        let color = piece.color();
        let mut dropped = 0;
        for (x, y) in piece.cells() {
            if y < 0 {
                dropped += 1;
                continue;
            }
            self.set(x, y, Some(color));
        }
        dropped
    }

    /// Remove every full row and pad the top with empty rows.
    ///
    /// Single stable compaction pass from the bottom up: surviving rows keep
    /// their relative order. Returns the number of rows removed.
    pub fn clear_completed_rows(&mut self) -> usize {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut write_y = height;
        let mut cleared = 0;

        for read_y in (0..height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, write_y * width);
                }
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared
    }

    /// Get a reference to the internal cells buffer
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Count of filled cells
    pub fn filled(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Write the byte grid used by snapshots (0 = empty, see `Color::code`)
    pub fn write_codes(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|&c| crate::types::cell_code(c)));
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

pub(crate) fn check_dimensions(width: u8, height: u8) -> Result<(), ConfigError> {
    let dims = MIN_BOARD_DIMENSION..=MAX_BOARD_DIMENSION;
    if !dims.contains(&width) {
        return Err(ConfigError::Width(width));
    }
    if !dims.contains(&height) {
        return Err(ConfigError::Height(height));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::pieces::shape;
    use crate::types::{Color, PieceKind};

    fn fill_row(board: &mut Board, y: i8, color: Color) {
        for x in 0..board.width() as i8 {
            board.set(x, y, Some(color));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20).unwrap();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_collides_walls_and_floor() {
        let board = Board::default();
        let o = shape(PieceKind::O).matrix;
        assert!(!board.collides_at(&o, 0, 0));
        assert!(!board.collides_at(&o, 8, 18));
        assert!(board.collides_at(&o, -1, 0));
        assert!(board.collides_at(&o, 9, 0));
        assert!(board.collides_at(&o, 0, 19));
    }

    #[test]
    fn test_negative_rows_skip_occupancy_but_not_walls() {
        let mut board = Board::default();
        fill_row(&mut board, 0, Color::Red);
        let i = shape(PieceKind::I).matrix;
        // Entirely above the board: no occupancy check.
        assert!(!board.collides_at(&i, 3, -1));
        // Still bound-checked horizontally.
        assert!(board.collides_at(&i, 7, -1));
        assert!(board.collides_at(&i, -1, -1));
    }

    #[test]
    fn test_collides_with_occupied_cell() {
        let mut board = Board::default();
        board.set(5, 10, Some(Color::Blue));
        let piece = Tetromino {
            y: 8,
            ..Tetromino::spawn(PieceKind::O, 10)
        };
        assert!(!board.collides(&piece, 0, 0));
        assert!(board.collides(&piece, 0, 1));
        assert!(!board.collides(&piece, -1, 1));
    }

    #[test]
    fn test_commit_drops_cells_above_board() {
        let mut board = Board::default();
        let piece = Tetromino {
            y: -1,
            ..Tetromino::spawn(PieceKind::O, 10)
        };
        assert_eq!(board.commit(&piece), 2);
        assert_eq!(board.filled(), 2);
        assert_eq!(board.get(4, 0), Some(Some(Color::Yellow)));
        assert_eq!(board.get(5, 0), Some(Some(Color::Yellow)));
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut board = Board::default();
        fill_row(&mut board, 19, Color::Red);
        board.set(0, 18, Some(Color::Blue));
        fill_row(&mut board, 17, Color::Red);
        board.set(3, 16, Some(Color::Green));

        assert_eq!(board.clear_completed_rows(), 2);
        assert_eq!(board.get(0, 19), Some(Some(Color::Blue)));
        assert_eq!(board.get(3, 18), Some(Some(Color::Green)));
        assert_eq!(board.filled(), 2);
    }

    #[test]
    fn test_clear_adjacent_rows_does_not_skip() {
        let mut board = Board::default();
        for y in 16..20 {
            fill_row(&mut board, y, Color::Cyan);
        }
        board.set(1, 15, Some(Color::Orange));

        assert_eq!(board.clear_completed_rows(), 4);
        assert_eq!(board.get(1, 19), Some(Some(Color::Orange)));
        assert_eq!(board.filled(), 1);
    }

    #[test]
    fn test_new_rejects_unaddressable_dimensions() {
        assert_eq!(Board::new(200, 20), Err(ConfigError::Width(200)));
        assert_eq!(Board::new(128, 20), Err(ConfigError::Width(128)));
        assert_eq!(Board::new(10, 3), Err(ConfigError::Height(3)));
        assert_eq!(Board::new(0, 0), Err(ConfigError::Width(0)));
        assert!(Board::new(MIN_BOARD_DIMENSION, MAX_BOARD_DIMENSION).is_ok());
    }

    #[test]
    fn test_largest_board_is_fully_addressable() {
        let mut board = Board::new(MAX_BOARD_DIMENSION, MAX_BOARD_DIMENSION).unwrap();
        let last = MAX_BOARD_DIMENSION as i8 - 1;
        assert!(board.set(last, last, Some(Color::Red)));
        assert_eq!(board.get(last, last), Some(Some(Color::Red)));
        assert_eq!(board.get(0, 0), Some(None));
        assert_eq!(board.get(last + 1, 0), None);
    }

    #[test]
    fn test_write_codes() {
        let mut board = Board::new(4, 4).unwrap();
        board.set(1, 2, Some(Color::Cyan));
        let mut out = Vec::new();
        board.write_codes(&mut out);
        assert_eq!(out.len(), 16);
        assert_eq!(out[2 * 4 + 1], Color::Cyan.code());
        assert_eq!(out.iter().filter(|&&b| b != 0).count(), 1);
    }

    proptest! {
        #[test]
        fn prop_every_in_bounds_cell_is_addressable(
            width in MIN_BOARD_DIMENSION..=MAX_BOARD_DIMENSION,
            height in MIN_BOARD_DIMENSION..=MAX_BOARD_DIMENSION,
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let mut board = Board::new(width, height).unwrap();
            let x = (fx * width as f64) as i8;
            let y = (fy * height as f64) as i8;

            prop_assert!(board.set(x, y, Some(Color::Green)));
            prop_assert_eq!(board.get(x, y), Some(Some(Color::Green)));
            prop_assert_eq!(board.filled(), 1);
            prop_assert!(!board.set(width as i8, y, Some(Color::Green)));
            prop_assert!(!board.set(x, height as i8, Some(Color::Green)));
            prop_assert_eq!(board.cells().len(), width as usize * height as usize);
        }

        #[test]
        fn prop_out_of_range_dimensions_are_rejected(
            width in prop::sample::select(vec![0u8, 1, 3, 65, 127, 128, 200, 255]),
        ) {
            prop_assert_eq!(Board::new(width, 10), Err(ConfigError::Width(width)));
            prop_assert_eq!(Board::new(10, width), Err(ConfigError::Height(width)));
        }
    }
}
