//! Terminal "game renderer" module.
//!
//! Renders a [`core::GameSnapshot`] into a framebuffer of styled character
//! cells, then flushes only the cells that changed to the terminal.
//!
//! - [`fb`]: framebuffer and styles (pure)
//! - [`game_view`]: board, preview, status panel and overlays (pure)
//! - [`renderer`]: raw-mode terminal output via crossterm

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use neon_tetris_core as core;
pub use neon_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_changes_into, TerminalRenderer};
