//! Active piece and collision detection

use crate::board::Board;
use crate::pieces::{get_shape, Shape};
use crate::types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// A falling piece: its own copy of the shape plus an offset on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Current orientation.
    pub shape: Shape,
    pub color: Color,
    /// Column of the matrix origin.
    pub x: i8,
    /// Row of the matrix origin.
    pub y: i8,
}

impl ActivePiece {
    /// Create a piece in spawn orientation at the origin (not yet centered)
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            shape: get_shape(kind),
            color: kind.color(),
            x: 0,
            y: 0,
        }
    }

    /// Column that horizontally centers the matrix on the board
    pub fn spawn_x(&self) -> i8 {
        (BOARD_WIDTH / 2) as i8 - (self.shape.size() / 2) as i8
    }

    /// Absolute board coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .minos()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Would this piece overlap a wall, the floor, or a settled cell?
    ///
    /// Rows above the board (`y < 0`) only get the wall check; they are never
    /// looked up on the board.
    pub fn collides(&self, board: &Board) -> bool {
        self.cells().any(|(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
                return true;
            }
            y >= 0 && board.is_occupied(x, y)
        })
    }

    /// Same piece shifted by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    #[test]
    fn test_spawn_x_centers_matrix() {
        assert_eq!(ActivePiece::new(PieceKind::I).spawn_x(), 3);
        assert_eq!(ActivePiece::new(PieceKind::O).spawn_x(), 4);
        assert_eq!(ActivePiece::new(PieceKind::T).spawn_x(), 4);
    }

    #[test]
    fn test_cells_are_offset() {
        let piece = ActivePiece {
            x: 4,
            y: 18,
            ..ActivePiece::new(PieceKind::O)
        };
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(4, 18), (5, 18), (4, 19), (5, 19)]);
    }

    #[test]
    fn test_collides_with_walls_and_floor() {
        let board = Board::new();
        let o = ActivePiece::new(PieceKind::O);

        assert!(!o.shifted(0, 0).collides(&board));
        assert!(o.shifted(-1, 0).collides(&board));
        assert!(o.shifted(9, 0).collides(&board));
        assert!(!o.shifted(8, 18).collides(&board));
        assert!(o.shifted(8, 19).collides(&board));
    }

    #[test]
    fn test_rows_above_board_are_not_tested() {
        let mut board = Board::new();
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, 0, Cell::Filled(PieceKind::Z.color()));
        }

        // O at y = -2 lies entirely above the board.
        let above = ActivePiece::new(PieceKind::O).shifted(4, -2);
        assert!(!above.collides(&board));

        // Still bounded by the walls up there.
        let left = ActivePiece::new(PieceKind::O).shifted(-1, -2);
        assert!(left.collides(&board));

        // Reaching row 0 hits the filled row.
        let touching = ActivePiece::new(PieceKind::O).shifted(4, -1);
        assert!(touching.collides(&board));
    }

    #[test]
    fn test_collides_with_settled_cell() {
        let mut board = Board::new();
        board.set(5, 10, Cell::Filled(PieceKind::T.color()));

        let o = ActivePiece::new(PieceKind::O);
        assert!(o.shifted(4, 9).collides(&board));
        assert!(o.shifted(5, 10).collides(&board));
        assert!(!o.shifted(6, 10).collides(&board));
        // Empty matrix cells never collide: the I row sits at local y = 1.
        let i = ActivePiece::new(PieceKind::I).shifted(3, 10);
        assert!(!i.collides(&board));
    }
}
