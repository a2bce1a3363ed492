//! Neon Tetris (workspace facade crate).
//!
//! Re-exports the `neon_tetris::{core,input,term,types}` API from the crates
//! under `crates/`, and hosts the binary's own plumbing: environment config,
//! the JSONL event log and the wall-clock frame scheduler.

pub use neon_tetris_core as core;
pub use neon_tetris_input as input;
pub use neon_tetris_term as term;
pub use neon_tetris_types as types;

pub mod config;
pub mod event_log;
pub mod scheduler;
