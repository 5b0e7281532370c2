//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on rendering, input polling, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Every rule is reachable without a terminal or window
//! - **Portable**: Any frontend can drive it through commands and ticks
//!
//! # Module Structure
//!
//! - [`board`]: fixed-size grid with collision detection and line clearing
//! - [`game_state`]: the session: active piece, scoring, gravity, game over
//! - [`pieces`]: shape catalog, occupancy matrices and clockwise rotation
//! - [`rng`]: uniform random (or scripted) piece selection
//! - [`scoring`]: line clear points and level progression
//! - [`timing`]: gravity interval by level
//! - [`config`]: validated session configuration
//! - [`snapshot`]: read-only state handed to renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every spawn picks one of seven kinds with equal odds
//! - **Plain rotation**: clockwise in place; a blocked rotation is discarded
//! - **Instant lock**: a piece that cannot fall locks on the next downward step
//! - **Scoring**: 100/300/500/800 for 1-4 rows, times the level before the clear
//! - **Levels**: one level per 10 lines, starting at level 1
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.piece_id(), 2);
//! assert!(!game.game_over());
//! ```
//!
//! # Timing
//!
//! The engine never measures time itself. Call
//! [`GameState::tick`](game_state::GameState::tick) with the elapsed time
//! since the previous call; gravity is 500ms per row at level 1 and speeds up
//! by 50ms per level down to 100ms.

pub mod board;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod timing;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, GameConfig};
pub use game_state::{DropOutcome, GameState};
pub use pieces::{shape, Matrix, ShapeDefinition, Tetromino, SHAPES};
pub use rng::{PieceSource, SimpleRng};
pub use scoring::{apply_clear, calculate_level, calculate_line_score, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use timing::{interval_for_level, TimingPolicy};
