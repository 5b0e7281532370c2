//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine and by
//! any collaborator that drives it (renderers, input mappers, bots).
//! All types are plain data with no behavior beyond parsing and lookup.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 500 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 50 | Interval reduction per level |
//! | `DROP_INTERVAL_FLOOR_MS` | 100 | Fastest gravity, reached at level 9 |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let action: GameAction = "hardDrop".parse().unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(PieceKind::T.as_str(), "t");
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Smallest accepted board dimension (the I piece is four cells long)
pub const MIN_BOARD_DIMENSION: u8 = 4;

/// Largest accepted board dimension
pub const MAX_BOARD_DIMENSION: u8 = 64;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u64 = 500;

/// Gravity interval reduction per level
pub const DROP_STEP_MS: u64 = 50;

/// Gravity never gets faster than this
pub const DROP_INTERVAL_FLOOR_MS: u64 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table
///
/// Base points for clearing N rows with one lock, multiplied by the level
/// in effect before the clear is counted:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::parse("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::parse("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::parse("unknown"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Position in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }
}

/// Display color tag written into board cells when a piece locks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

impl Color {
    /// Reference RGB value for renderers
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Cyan => (0, 255, 255),
            Color::Yellow => (255, 255, 0),
            Color::Purple => (128, 0, 128),
            Color::Green => (0, 255, 0),
            Color::Red => (255, 0, 0),
            Color::Blue => (0, 0, 255),
            Color::Orange => (255, 165, 0),
        }
    }

    /// Non-zero byte code (1..=7); 0 is reserved for empty cells
    pub fn code(&self) -> u8 {
        match self {
            Color::Cyan => 1,
            Color::Yellow => 2,
            Color::Purple => 3,
            Color::Green => 4,
            Color::Red => 5,
            Color::Blue => 6,
            Color::Orange => 7,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a locked piece of that color
pub type Cell = Option<Color>;

/// Byte encoding of a cell (0 = empty)
pub fn cell_code(cell: Cell) -> u8 {
    cell.map_or(0, |c| c.code())
}

/// Horizontal direction for a move command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta
    pub fn dx(&self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// This is the complete inbound command vocabulary. Each action maps to
/// exactly one engine operation and carries no parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise in place
    Rotate,
    /// Drop piece one cell, locking it if it cannot fall
    SoftDrop,
    /// Drop piece to the lowest free position and lock it
    HardDrop,
    /// Start a fresh session (the only action accepted after game over)
    Reset,
}

impl GameAction {
    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Reset => "reset",
        }
    }
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown command name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown game action: {0:?}")]
pub struct ParseActionError(pub String);

impl FromStr for GameAction {
    type Err = ParseActionError;

    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!("moveLeft".parse(), Ok(GameAction::MoveLeft));
    /// assert_eq!("ROTATE".parse(), Ok(GameAction::Rotate));
    /// assert!("hold".parse::<GameAction>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "moveleft" => Ok(GameAction::MoveLeft),
            "moveright" => Ok(GameAction::MoveRight),
            "rotate" => Ok(GameAction::Rotate),
            "softdrop" => Ok(GameAction::SoftDrop),
            "harddrop" => Ok(GameAction::HardDrop),
            "reset" => Ok(GameAction::Reset),
            _ => Err(ParseActionError(s.to_string())),
        }
    }
}

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Running,
    /// Terminal until reset
    GameOver,
}

/// Event recorded each time a piece locks.
///
/// Consumed by observers through `GameState::take_last_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Points awarded for this lock
    pub points: u32,
    /// Level after the clear was counted
    pub level: u32,
    /// The follow-up spawn was blocked
    pub game_over: bool,
}
