//! Modifier-adjusted selection probabilities for one row
//!
//! Base probabilities are scaled by every active modifier, then the row is
//! renormalised so its four entries sum to one.

use crate::core::error::Result;
use crate::core::types::{DEFAULT_BASE_PROBABILITY, GRID_COLS};
use crate::grid::{BaseProbabilities, GridState};
use crate::modifier::Modifier;

/// Adjusted probability per column of a row
pub type RowProbabilities = [f64; GRID_COLS];

#[derive(Debug, Clone, Copy, Default)]
pub struct ProbabilityCalculator;

impl ProbabilityCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Probabilities for each column of `row` after applying `modifiers`
    ///
    /// Modifiers compose multiplicatively in the order given. Floating point
    /// makes that order observable in the last bits; this is accepted.
    /// A row whose weights all collapse to zero falls back to uniform.
    pub fn compute(
        &self,
        row: usize,
        grid: &GridState,
        modifiers: &[Modifier],
        base_probabilities: &BaseProbabilities,
    ) -> Result<RowProbabilities> {
        let cells = grid.row(row)?;
        let base = &base_probabilities[row];

        let mut weights = [0.0; GRID_COLS];
        for (col, cell) in cells.iter().enumerate() {
            weights[col] = modifiers
                .iter()
                .fold(base[col], |weight, modifier| weight * modifier.factor(cell.kind));
        }

        Ok(normalize(weights, row))
    }
}

fn normalize(weights: RowProbabilities, row: usize) -> RowProbabilities {
    let total: f64 = weights.iter().sum();
    if total > 0.0 && total.is_finite() {
        weights.map(|w| w / total)
    } else {
        tracing::debug!("Row {} has no selection weight, using uniform probabilities", row);
        [DEFAULT_BASE_PROBABILITY; GRID_COLS]
    }
}
