//! Board module - manages the 4x4 tile grid
//!
//! The board is a 4x4 grid where each cell is either empty (`0`) or holds a
//! power-of-two tile value. Uses a flat array for zero-allocation copies.
//! Coordinates: (row, col) where row ranges 0..3 (top to bottom) and col
//! ranges 0..3 (left to right).

use std::fmt;

use crate::types::{Cell, BOARD_SIZE, CELL_COUNT};

/// The game board - 4 rows x 4 columns using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * SIZE + col)
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [0; CELL_COUNT],
        }
    }

    /// Build a board from rows of cell values.
    ///
    /// Every nonzero value must be a power of two `>= 2`.
    pub fn from_rows(rows: [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize]) -> Self {
        let mut board = Self::new();
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                debug_assert!(is_tile_value(value), "invalid tile value {}", value);
                board.cells[row * BOARD_SIZE as usize + col] = value;
            }
        }
        board
    }

    /// Copy the board out as rows of cell values.
    pub fn to_rows(&self) -> [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        let mut rows = [[0; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        self.write_grid(&mut rows);
        rows
    }

    /// Write the board into a caller-owned grid (no allocation).
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_SIZE as usize]; BOARD_SIZE as usize]) {
        let size = BOARD_SIZE as usize;
        for (row, dst) in out.iter_mut().enumerate() {
            dst.copy_from_slice(&self.cells[row * size..(row + 1) * size]);
        }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    pub(crate) fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_SIZE as i8 || col < 0 || col >= BOARD_SIZE as i8 {
            return None;
        }
        Some((row as usize) * (BOARD_SIZE as usize) + (col as usize))
    }

    /// (row, col) of a flat index
    #[inline(always)]
    pub(crate) fn position(idx: usize) -> (u8, u8) {
        (
            (idx / BOARD_SIZE as usize) as u8,
            (idx % BOARD_SIZE as usize) as u8,
        )
    }

    /// Side length of the board
    pub fn size(&self) -> u8 {
        BOARD_SIZE
    }

    /// Get cell at position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at position (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i8, col: i8, value: Cell) -> bool {
        debug_assert!(is_tile_value(value), "invalid tile value {}", value);
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and empty
    pub fn is_empty_at(&self, row: i8, col: i8) -> bool {
        matches!(self.get(row, col), Some(0))
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    pub(crate) fn cell_at(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    pub(crate) fn set_at(&mut self, idx: usize, value: Cell) {
        self.cells[idx] = value;
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 0).count()
    }

    /// Number of tiles on the board
    pub fn tile_count(&self) -> usize {
        CELL_COUNT - self.empty_count()
    }

    /// Sum of all tile values
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&c| c as u64).sum()
    }

    /// Largest tile on the board (0 when empty)
    pub fn max_tile(&self) -> Cell {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != 0)
    }

    /// Check if any two orthogonally adjacent tiles have the same value
    pub fn has_adjacent_pair(&self) -> bool {
        let size = BOARD_SIZE as i8;
        for row in 0..size {
            for col in 0..size {
                let Some(value) = self.get(row, col) else {
                    continue;
                };
                if value == 0 {
                    continue;
                }
                if self.get(row, col + 1) == Some(value) || self.get(row + 1, col) == Some(value)
                {
                    return true;
                }
            }
        }
        false
    }

    /// Check if at least one direction would change the board
    ///
    /// A slide needs an empty cell; a merge needs an equal adjacent pair.
    pub fn has_legal_move(&self) -> bool {
        !self.is_full() || self.has_adjacent_pair()
    }

    /// Board has no empty cells and no possible merge
    pub fn is_terminal(&self) -> bool {
        !self.has_legal_move()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [0; CELL_COUNT];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = BOARD_SIZE as usize;
        for row in 0..size {
            for col in 0..size {
                if col > 0 {
                    f.write_str(" ")?;
                }
                match self.cells[row * size + col] {
                    0 => write!(f, "{:>5}", ".")?,
                    v => write!(f, "{:>5}", v)?,
                }
            }
            if row + 1 < size {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

/// `0` or a power of two `>= 2`
pub fn is_tile_value(value: Cell) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}
