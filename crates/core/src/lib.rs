//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule, plus a fake-scheduler game loop
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with merging and line sweeping
//! - [`piece`]: the falling piece and collision detection
//! - [`pieces`]: shape catalog and the rotation resolver (horizontal kicks only)
//! - [`rng`]: 7-bag random piece generation
//! - [`scoring`]: classic line scores, levels and gravity
//! - [`game_state`]: one session: spawn, move, rotate, drop, lock, game over
//! - [`game_loop`]: frame scheduling and the start/restart lifecycle
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: every run of seven pieces contains each kind once
//! - **Rotation**: clockwise only; a blocked rotation tries a few sideways kicks
//! - **Locking**: a piece locks as soon as it cannot fall one more row
//! - **Scoring**: 40/100/300/1200 times (level + 1); a level every 10 lines
//!
//! # Example
//!
//! ```
//! use neon_tetris_core::GameState;
//! use neon_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // The dropped piece is now part of the board.
//! assert_eq!(game.board().cells().iter().filter(|c| c.is_filled()).count(), 4);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) with the elapsed
//! milliseconds, or let a [`GameLoop`] do it from frame timestamps. A piece
//! falls one row each time the accumulated time exceeds the drop interval
//! (1000ms at level 0, 50ms faster per level, never below 100ms).

pub mod board;
pub mod game_loop;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use neon_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_loop::{FrameHandle, FrameOutcome, FrameScheduler, GameLoop, LoopPhase};
pub use game_state::GameState;
pub use piece::ActivePiece;
pub use pieces::{get_shape, try_rotate, Shape};
pub use rng::{PieceBag, SimpleRng};
pub use scoring::{calculate_line_score, get_drop_interval_ms, Progress, ScoreResult};
pub use snapshot::GameSnapshot;
