//! Core type definitions used throughout the codebase

use serde::Serialize;

use crate::core::error::{AdvisorError, Result};

/// Number of rows in the grid (one per selectable option)
pub const GRID_ROWS: usize = 4;

/// Number of columns in every row
pub const GRID_COLS: usize = 4;

/// Total cell count of a well-formed grid
pub const GRID_CELLS: usize = GRID_ROWS * GRID_COLS;

/// Probability assumed for a cell when the detector reported none
pub const DEFAULT_BASE_PROBABILITY: f64 = 0.25;

/// Grid coordinate, zero-based
///
/// Only constructible through `Position::new`, so it always lies inside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// Build a position, rejecting indices outside the grid
    pub fn new(row: usize, col: usize) -> Result<Self> {
        if row >= GRID_ROWS || col >= GRID_COLS {
            return Err(AdvisorError::CellOutOfBounds { row, col });
        }
        Ok(Self { row, col })
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Row-major index into a flat 16-cell array
    pub fn index(&self) -> usize {
        self.row * GRID_COLS + self.col
    }
}

/// Check a row index before using it to address the grid
pub fn check_row(row: usize) -> Result<usize> {
    if row >= GRID_ROWS {
        return Err(AdvisorError::InvalidRow(row));
    }
    Ok(row)
}
