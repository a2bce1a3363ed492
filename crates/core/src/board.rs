//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is either empty or filled with the
//! color of the piece that settled there.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use crate::piece::ActivePiece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Cell::Filled(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(Cell::is_filled)
    }

    /// Cells of one row, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = BOARD_WIDTH as usize;
        let start = y * width;
        &self.cells[start..start + width]
    }

    /// Remove row `y`, shift every row above it down by one, and insert an
    /// empty row at the top
    pub fn clear_row(&mut self, y: usize) {
        if y >= BOARD_HEIGHT as usize {
            return;
        }

        let width = BOARD_WIDTH as usize;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(Cell::Empty);
    }

    /// Remove every full row below the top row and return how many went
    ///
    /// Rows are scanned bottom to top; after a removal the same index is
    /// checked again because the row above has moved into it. Row 0 is never
    /// eligible for clearing, even when full.
    pub fn sweep_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT as usize - 1;
        while y > 0 {
            if self.is_row_full(y) {
                self.clear_row(y);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Write the piece's color into every cell it occupies
    ///
    /// Only called at a legal resting position, so nothing is re-validated;
    /// cells outside the board are dropped by `set`.
    pub fn merge(&mut self, piece: &ActivePiece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Cell::Filled(piece.color));
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Copy into a row-major 2D grid (for snapshots)
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
