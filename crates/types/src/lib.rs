//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, event logging).
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//!
//! New pieces spawn horizontally centered on row 0.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Default frame cadence (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity at level 0 |
//! | `DROP_INTERVAL_STEP_MS` | 50 | Gravity speed-up per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity floor |
//!
//! # Examples
//!
//! ```
//! use neon_tetris_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Default frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u64 = 16;

/// Base gravity interval at level 0 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity gets this much faster with every level
pub const DROP_INTERVAL_STEP_MS: u32 = 50;

/// Absolute minimum drop interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Cleared lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// 24-bit color of a settled block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and a neon color:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Magenta
/// - **S**: Lime
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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
    /// All kinds in catalog order.
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
    /// use neon_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
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

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Neon palette color of the piece.
    ///
    /// ```
    /// use neon_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::L.color().to_hex(), "#ff8000");
    /// ```
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::new(0x00, 0xff, 0xff),
            PieceKind::O => Color::new(0xff, 0xff, 0x00),
            PieceKind::T => Color::new(0xff, 0x00, 0xff),
            PieceKind::S => Color::new(0x00, 0xff, 0x00),
            PieceKind::Z => Color::new(0xff, 0x00, 0x00),
            PieceKind::J => Color::new(0x00, 0x00, 0xff),
            PieceKind::L => Color::new(0xff, 0x80, 0x00),
        }
    }
}

/// A cell on the game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    /// Settled block with the color of the piece that left it.
    Filled(Color),
}

impl Cell {
    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(*color),
        }
    }
}

/// Discrete player requests
///
/// Everything except `Start` is ignored while no session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down, locking it if it cannot fall
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Start a new session (only honored when the start control is enabled)
    Start,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use neon_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "start" => Some(GameAction::Start),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Start => "start",
        }
    }
}

/// Core-side event emitted after a piece locks.
///
/// Consumed by observers such as the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    pub points: u32,
    /// Level after the clear was applied.
    pub level: u32,
    pub level_up: bool,
    /// The spawn that followed the lock was blocked.
    pub game_over: bool,
}
