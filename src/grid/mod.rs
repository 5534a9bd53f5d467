//! The 4x4 grid as seen by the engine
//!
//! Cell classification happens upstream. By the time a grid reaches this
//! module every cell is a definite `CellType` (ambiguous detections arrive
//! as `Empty`) and the shape has been checked.

pub mod vision;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::{AdvisorError, Result};
use crate::core::types::{
    check_row, Position, DEFAULT_BASE_PROBABILITY, GRID_CELLS, GRID_COLS, GRID_ROWS,
};

pub use vision::{GameSnapshot, VisionReport};

/// Per-cell base probabilities, indexed `[row][col]`
pub type BaseProbabilities = [[f64; GRID_COLS]; GRID_ROWS];

/// What a cell holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellType {
    PhysicalMonster,
    MagicMonster,
    Chest,
    Berry,
    Trap,
    Empty,
}

impl CellType {
    /// All cell types
    pub fn all() -> &'static [CellType] {
        &[
            CellType::PhysicalMonster,
            CellType::MagicMonster,
            CellType::Chest,
            CellType::Berry,
            CellType::Trap,
            CellType::Empty,
        ]
    }

    /// Monsters are the only cells that carry an opposing stat
    pub fn is_monster(&self) -> bool {
        matches!(self, CellType::PhysicalMonster | CellType::MagicMonster)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CellType::PhysicalMonster => "physical_monster",
            CellType::MagicMonster => "magic_monster",
            CellType::Chest => "chest",
            CellType::Berry => "berry",
            CellType::Trap => "trap",
            CellType::Empty => "empty",
        }
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellType,
    /// Opposing stat of a monster; always `None` for other cells
    pub monster_value: Option<i32>,
}

impl Cell {
    /// Build a cell, dropping any value attached to a non-monster
    pub fn new(kind: CellType, monster_value: Option<i32>) -> Self {
        Self {
            kind,
            monster_value: if kind.is_monster() { monster_value } else { None },
        }
    }

    pub fn of(kind: CellType) -> Self {
        Self::new(kind, None)
    }

    pub fn empty() -> Self {
        Self::of(CellType::Empty)
    }

    pub fn physical_monster(value: i32) -> Self {
        Self::new(CellType::PhysicalMonster, Some(value))
    }

    pub fn magic_monster(value: i32) -> Self {
        Self::new(CellType::MagicMonster, Some(value))
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

/// Immutable snapshot of the grid for one analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridState {
    cells: [[Cell; GRID_COLS]; GRID_ROWS],
    base_probability: BaseProbabilities,
}

impl GridState {
    /// Grid with uniform base probabilities
    pub fn new(cells: [[Cell; GRID_COLS]; GRID_ROWS]) -> Self {
        Self {
            cells,
            base_probability: [[DEFAULT_BASE_PROBABILITY; GRID_COLS]; GRID_ROWS],
        }
    }

    /// Build from nested rows, rejecting anything that is not exactly 4x4
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let found: usize = rows.iter().map(Vec::len).sum();
        if found != GRID_CELLS {
            return Err(AdvisorError::MalformedGrid {
                expected: GRID_CELLS,
                found,
            });
        }

        let mut cells = [[Cell::empty(); GRID_COLS]; GRID_ROWS];
        for (row, row_cells) in rows.into_iter().enumerate() {
            for (col, cell) in row_cells.into_iter().enumerate() {
                let pos = Position::new(row, col)?;
                cells[pos.row()][pos.col()] = cell;
            }
        }
        Ok(Self::new(cells))
    }

    /// Build from cells tagged with their position
    ///
    /// Exactly 16 cells covering every position once.
    pub fn from_positioned<I>(cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Position, Cell)>,
    {
        let mut slots: [[Option<Cell>; GRID_COLS]; GRID_ROWS] = [[None; GRID_COLS]; GRID_ROWS];
        let mut found = 0;

        for (pos, cell) in cells {
            found += 1;
            let slot = &mut slots[pos.row()][pos.col()];
            if slot.is_some() {
                return Err(AdvisorError::DuplicateCell {
                    row: pos.row(),
                    col: pos.col(),
                });
            }
            *slot = Some(cell);
        }

        if found != GRID_CELLS {
            return Err(AdvisorError::MalformedGrid {
                expected: GRID_CELLS,
                found,
            });
        }

        // 16 distinct in-bounds positions means every slot is filled
        let cells = slots.map(|row| row.map(|cell| cell.unwrap_or_default()));
        Ok(Self::new(cells))
    }

    /// Replace the base probabilities with detected values
    pub fn with_base_probabilities(mut self, probabilities: BaseProbabilities) -> Result<Self> {
        for (row, values) in probabilities.iter().enumerate() {
            for (col, &value) in values.iter().enumerate() {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(AdvisorError::InvalidProbability { row, col, value });
                }
            }
        }
        self.base_probability = probabilities;
        Ok(self)
    }

    pub fn cell(&self, pos: Position) -> &Cell {
        &self.cells[pos.row()][pos.col()]
    }

    /// The four cells of a row
    pub fn row(&self, row: usize) -> Result<&[Cell; GRID_COLS]> {
        Ok(&self.cells[check_row(row)?])
    }

    pub fn rows(&self) -> &[[Cell; GRID_COLS]; GRID_ROWS] {
        &self.cells
    }

    pub fn base_probabilities(&self) -> &BaseProbabilities {
        &self.base_probability
    }

    /// Does any cell in the row hold `kind`?
    pub fn row_contains(&self, row: usize, kind: CellType) -> Result<bool> {
        Ok(self.row(row)?.iter().any(|cell| cell.kind == kind))
    }

    /// Is every cell in the row `kind`?
    pub fn row_is_all(&self, row: usize, kind: CellType) -> Result<bool> {
        Ok(self.row(row)?.iter().all(|cell| cell.kind == kind))
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self::new([[Cell::empty(); GRID_COLS]; GRID_ROWS])
    }
}
