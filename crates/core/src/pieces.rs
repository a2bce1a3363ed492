//! Pieces module - Tetromino shape catalog and the rotation resolver
//!
//! Shapes are square occupancy matrices (2x2 for O, 4x4 for I, 3x3 otherwise).
//! Rotation is a plain 90° clockwise matrix rotation followed by a narrow,
//! horizontal-only kick search; there is no kick table.

use arrayvec::ArrayVec;

use crate::piece::ActivePiece;
use crate::types::PieceKind;

/// Largest matrix side in the catalog (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a single mino relative to the matrix origin (x, y)
pub type MinoOffset = (i8, i8);

/// Square occupancy matrix of a piece in one orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    /// `rows[y][x]`, only the top-left `size x size` block is meaningful.
    rows: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from string rows where `#` marks an occupied cell.
    ///
    /// Panics if the rows are not square or larger than [`MAX_SHAPE_SIZE`];
    /// only used with the static catalog and tests.
    pub fn from_rows(rows: &[&str]) -> Self {
        let size = rows.len();
        assert!(size <= MAX_SHAPE_SIZE, "shape too large: {size}");
        let mut out = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), size, "shape must be square");
            for (x, ch) in row.chars().enumerate() {
                out[y][x] = ch == '#';
            }
        }
        Self {
            size: size as u8,
            rows: out,
        }
    }

    /// Matrix side length (width == height).
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Is the local cell (x, y) occupied? Out-of-matrix cells are not.
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        let n = self.size as usize;
        x < n && y < n && self.rows[y][x]
    }

    /// Occupied cells as (x, y) offsets, row-major order.
    pub fn minos(&self) -> ArrayVec<MinoOffset, 16> {
        let n = self.size as usize;
        let mut out = ArrayVec::new();
        for y in 0..n {
            for x in 0..n {
                if self.rows[y][x] {
                    out.push((x as i8, y as i8));
                }
            }
        }
        out
    }

    /// Rotate 90° clockwise: transpose, then reverse each row.
    pub fn rotate_cw(&self) -> Self {
        let n = self.size as usize;
        let mut out = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (y, row) in out.iter_mut().enumerate().take(n) {
            for (x, cell) in row.iter_mut().enumerate().take(n) {
                *cell = self.rows[n - 1 - x][y];
            }
        }
        Self {
            size: self.size,
            rows: out,
        }
    }
}

/// Get the spawn-orientation shape for a piece kind
pub fn get_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&["....", "####", "....", "...."]),
        PieceKind::O => Shape::from_rows(&["##", "##"]),
        PieceKind::T => Shape::from_rows(&[".#.", "###", "..."]),
        PieceKind::S => Shape::from_rows(&[".##", "##.", "..."]),
        PieceKind::Z => Shape::from_rows(&["##.", ".##", "..."]),
        PieceKind::J => Shape::from_rows(&["#..", "###", "..."]),
        PieceKind::L => Shape::from_rows(&["..#", "###", "..."]),
    }
}

/// Horizontal kick positions tried after a blocked rotation
///
/// Steps go `+1, -2, +3, -4, ...` and accumulate onto `x`, so the tried columns
/// zig-zag around the origin. The search ends as soon as the *next* step would
/// be larger than `width`; the position reached by the step that produced it
/// is not tried.
pub fn kick_positions(x: i8, width: u8) -> ArrayVec<i8, 8> {
    let mut out = ArrayVec::new();
    let mut x = x as i16;
    let mut step: i16 = 1;
    loop {
        x += step;
        step = -(step + step.signum());
        if step > width as i16 || out.is_full() {
            return out;
        }
        out.push(x as i8);
    }
}

/// Try to rotate a piece clockwise with the horizontal kick search
///
/// Returns the rotated candidate if the plain rotation or one of the kick
/// positions is legal, `None` if every position collides. The input piece is
/// never modified.
pub fn try_rotate(
    piece: &ActivePiece,
    collides: impl Fn(&ActivePiece) -> bool,
) -> Option<ActivePiece> {
    let mut candidate = ActivePiece {
        shape: piece.shape.rotate_cw(),
        ..*piece
    };

    if !collides(&candidate) {
        return Some(candidate);
    }

    for x in kick_positions(piece.x, candidate.shape.size()) {
        candidate.x = x;
        if !collides(&candidate) {
            return Some(candidate);
        }
    }

    None
}
