//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Every key
//! press is one discrete request; repeats come from the terminal's own
//! auto-repeat.

pub mod map;

pub use neon_tetris_types as types;

pub use map::{handle_key_event, should_quit};
