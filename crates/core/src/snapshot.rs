//! Snapshot module - read-only session view handed to renderers and drivers

use serde::Serialize;

use crate::pieces::{Matrix, Tetromino};
use crate::types::{GameStatus, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub x: i8,
    pub y: i8,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view of a session after the most recent processed event.
///
/// `board` is row-major with one byte per cell (0 = empty, otherwise
/// `Color::code`). The buffer is reused by `GameState::snapshot_into`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    pub board: Vec<u8>,
    /// FNV-1a hash of `board`, for cheap change detection
    pub board_hash: u64,
    pub active: Option<ActiveSnapshot>,
    /// Row the active piece would land on
    pub ghost_y: Option<i8>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub gravity_ms: u64,
    pub status: GameStatus,
    pub game_over: bool,
    pub episode_id: u32,
    pub piece_id: u32,
}

impl GameSnapshot {
    /// Cell byte at (x, y); 0 when empty or out of bounds
    pub fn cell(&self, x: usize, y: usize) -> u8 {
        if x >= self.width as usize || y >= self.height as usize {
            return 0;
        }
        self.board[y * self.width as usize + x]
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            board: Vec::new(),
            board_hash: fnv1a64(&[]),
            active: None,
            ghost_y: None,
            score: 0,
            level: 1,
            lines: 0,
            gravity_ms: 0,
            status: GameStatus::Running,
            game_over: false,
            episode_id: 0,
            piece_id: 0,
        }
    }
}

/// FNV-1a 64-bit
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}
