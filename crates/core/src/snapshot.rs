use crate::piece::ActivePiece;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Row-major copy of the settled cells
pub type BoardGrid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

/// Everything a renderer needs for one frame, copied out of `GameState`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: BoardGrid,
    pub active: Option<ActivePiece>,
    pub next: ActivePiece,
    pub started: bool,
    pub game_over: bool,
    pub seed: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: ActivePiece::new(PieceKind::I),
            started: false,
            game_over: false,
            seed: 0,
            score: 0,
            level: 0,
            lines: 0,
            drop_interval_ms: 0,
        }
    }
}
