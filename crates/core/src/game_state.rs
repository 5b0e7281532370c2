//! Game state module - manages the complete session
//!
//! This module ties together the board, the active piece, the piece source,
//! scoring and gravity timing. It exposes one operation per inbound command
//! plus `tick` for automatic gravity, and it enforces the terminal
//! game-over state.

use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::config::{ConfigError, GameConfig};
use crate::pieces::Tetromino;
use crate::rng::PieceSource;
use crate::scoring::apply_clear;
use crate::snapshot::{fnv1a64, ActiveSnapshot, GameSnapshot};
use crate::types::{Direction, GameAction, GameStatus, LockEvent};
use crate::Board;

/// Result of a downward step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece moved down one row
    Falling,
    /// The piece could not fall and was merged into the board
    Locked,
    /// No active piece (game over)
    Ignored,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<Tetromino>,
    source: PieceSource,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Successful spawns in the current episode.
    piece_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    level: u32,
    lines: u32,
    gravity: Duration,
    /// Time banked toward the next automatic fall
    gravity_acc: Duration,
    status: GameStatus,
}

impl GameState {
    /// Create a new game on the default board with the given RNG seed
    pub fn new(seed: u32) -> Self {
        let config = GameConfig {
            seed,
            ..GameConfig::default()
        };
        let source = PieceSource::random(seed);
        Self::build(config, Board::default(), source)
    }

    /// Create a new game from a configuration, using a random piece source
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        let source = PieceSource::random(config.seed);
        Self::with_source(config, source)
    }

    /// Create a new game with an explicit piece source
    pub fn with_source(config: GameConfig, source: PieceSource) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.width, config.height)?;
        Ok(Self::build(config, board, source))
    }

    fn build(config: GameConfig, board: Board, source: PieceSource) -> Self {
        let mut state = Self {
            board,
            active: None,
            source,
            episode_id: 0,
            piece_id: 0,
            last_event: None,
            score: 0,
            level: 1,
            lines: 0,
            gravity: config.timing.interval_for_level(1),
            gravity_acc: Duration::ZERO,
            status: GameStatus::Running,
            config,
        };
        state.spawn_piece();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Current gravity interval
    pub fn gravity_interval(&self) -> Duration {
        self.gravity
    }

    /// Time banked toward the next automatic fall
    pub fn gravity_accumulator(&self) -> Duration {
        self.gravity_acc
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_codes(&mut out.board);
        out.board_hash = fnv1a64(&out.board);
        out.width = self.board.width();
        out.height = self.board.height();
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.gravity_ms = self.gravity.as_millis() as u64;
        out.status = self.status;
        out.game_over = self.game_over();
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn a new piece from the source.
    ///
    /// A blocked spawn ends the game; the blocked piece is never left in play.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.source.draw();
        let piece = Tetromino::spawn(kind, self.board.width());

        if self.board.collides(&piece, 0, 0) {
            self.active = None;
            self.status = GameStatus::GameOver;
            info!(
                kind = kind.as_str(),
                score = self.score,
                lines = self.lines,
                level = self.level,
                "spawn blocked, game over"
            );
            return false;
        }

        trace!(kind = kind.as_str(), x = piece.x, y = piece.y, "spawned piece");
        self.active = Some(piece);
        self.piece_id = self.piece_id.wrapping_add(1);
        true
    }

    /// Shift the active piece one column
    pub fn move_piece(&mut self, direction: Direction) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if self.board.collides(&active, direction.dx(), 0) {
            return false;
        }

        self.active = Some(Tetromino {
            x: active.x + direction.dx(),
            ..active
        });
        true
    }

    /// Rotate the active piece clockwise in place (no wall kicks)
    pub fn rotate_piece(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.rotated();
        if self.board.collides_at(&candidate, active.x, active.y) {
            return false;
        }

        self.active = Some(Tetromino {
            matrix: candidate,
            ..active
        });
        true
    }

    /// Move down one row, or lock if the piece cannot fall
    pub fn soft_drop_step(&mut self) -> DropOutcome {
        let Some(active) = self.active else {
            return DropOutcome::Ignored;
        };

        if self.board.collides(&active, 0, 1) {
            self.lock_piece();
            return DropOutcome::Locked;
        }

        self.active = Some(Tetromino {
            y: active.y + 1,
            ..active
        });
        DropOutcome::Falling
    }

    /// Drop the active piece to its landing row and lock it once
    pub fn hard_drop(&mut self) -> DropOutcome {
        let Some(mut active) = self.active else {
            return DropOutcome::Ignored;
        };

        let start_y = active.y;
        while !self.board.collides(&active, 0, 1) {
            active.y += 1;
        }
        trace!(distance = active.y - start_y, "hard drop");

        self.active = Some(active);
        self.lock_piece();
        DropOutcome::Locked
    }

    /// Merge the active piece, clear rows, score, and spawn the next piece
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let dropped = self.board.commit(&active);
        if dropped > 0 {
            warn!(
                kind = active.kind.as_str(),
                dropped, "locked piece overflowed the top of the board"
            );
        }

        let cleared = self.board.clear_completed_rows();
        let result = apply_clear(cleared, self.lines, self.level);
        self.score = self.score.saturating_add(result.points);
        self.lines = result.lines;
        self.level = result.level;
        self.gravity = self.config.timing.interval_for_level(self.level);

        debug!(
            kind = active.kind.as_str(),
            lines_cleared = cleared,
            points = result.points,
            level = self.level,
            score = self.score,
            "piece locked"
        );

        let spawned = self.spawn_piece();
        self.last_event = Some(LockEvent {
            lines_cleared: cleared as u32,
            points: result.points,
            level: self.level,
            game_over: !spawned,
        });
    }

    /// Calculate the row the active piece would land on
    pub fn ghost_y(&self) -> Option<i8> {
        let mut piece = self.active?;
        while !self.board.collides(&piece, 0, 1) {
            piece.y += 1;
        }
        Some(piece.y)
    }

    /// Advance automatic gravity by `elapsed`.
    ///
    /// Performs one soft-drop step per whole gravity interval banked and
    /// keeps the remainder. Returns the number of steps performed.
    pub fn tick(&mut self, elapsed: Duration) -> u32 {
        if !self.is_running() {
            return 0;
        }

        self.gravity_acc = self.gravity_acc.saturating_add(elapsed);

        let mut steps = 0;
        while self.is_running() && self.gravity_acc >= self.gravity {
            self.gravity_acc -= self.gravity;
            self.soft_drop_step();
            steps += 1;
        }

        if !self.is_running() {
            self.gravity_acc = Duration::ZERO;
        }
        steps
    }

    /// Start a fresh episode on an empty board
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.piece_id = 0;
        self.last_event = None;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.gravity = self.config.timing.interval_for_level(1);
        self.gravity_acc = Duration::ZERO;
        self.status = GameStatus::Running;
        debug!(episode = self.episode_id, "session reset");
        self.spawn_piece();
    }

    /// Apply a game action
    ///
    /// Returns whether the action changed the session.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(Direction::Left),
            GameAction::MoveRight => self.move_piece(Direction::Right),
            GameAction::Rotate => self.rotate_piece(),
            GameAction::SoftDrop => self.soft_drop_step() != DropOutcome::Ignored,
            GameAction::HardDrop => self.hard_drop() != DropOutcome::Ignored,
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
