//! Per-cell payoffs and their row expectations
//!
//! Damage depends on the player's stats; gain does not. Both expectations
//! are probability-weighted sums over the row's four columns.

use crate::core::error::Result;
use crate::engine::probability::RowProbabilities;
use crate::grid::{Cell, CellType, GridState};
use crate::player::PlayerStats;

/// Damage taken from a trap, regardless of stats
pub const TRAP_DAMAGE: f64 = 3.0;
/// Gain from opening a chest
pub const CHEST_GAIN: f64 = 10.0;
/// Gain from eating a berry
pub const BERRY_GAIN: f64 = 1.0;
/// Combat reward for any monster
pub const MONSTER_GAIN: f64 = 5.0;

/// Damage a single cell deals to the player
///
/// A monster hits for the amount its stat exceeds the matching player stat.
/// A monster with no known value deals nothing.
pub fn cell_damage(cell: &Cell, stats: &PlayerStats) -> f64 {
    match (cell.kind, cell.monster_value) {
        (CellType::PhysicalMonster, Some(value)) => value.saturating_sub(stats.force).max(0) as f64,
        (CellType::MagicMonster, Some(value)) => value.saturating_sub(stats.magic).max(0) as f64,
        (CellType::Trap, _) => TRAP_DAMAGE,
        _ => 0.0,
    }
}

/// Reward a single cell yields
pub fn cell_gain(cell: &Cell) -> f64 {
    match cell.kind {
        CellType::Chest => CHEST_GAIN,
        CellType::Berry => BERRY_GAIN,
        CellType::PhysicalMonster | CellType::MagicMonster => MONSTER_GAIN,
        CellType::Trap | CellType::Empty => 0.0,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PayoffModel;

impl PayoffModel {
    pub fn new() -> Self {
        Self
    }

    pub fn expected_damage(
        &self,
        row: usize,
        grid: &GridState,
        stats: &PlayerStats,
        probabilities: &RowProbabilities,
    ) -> Result<f64> {
        Ok(grid
            .row(row)?
            .iter()
            .zip(probabilities)
            .map(|(cell, p)| cell_damage(cell, stats) * p)
            .sum())
    }

    pub fn expected_gain(
        &self,
        row: usize,
        grid: &GridState,
        probabilities: &RowProbabilities,
    ) -> Result<f64> {
        Ok(grid
            .row(row)?
            .iter()
            .zip(probabilities)
            .map(|(cell, p)| cell_gain(cell) * p)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{GRID_COLS, GRID_ROWS};

    fn single_row_grid(cells: [Cell; GRID_COLS]) -> GridState {
        let mut rows = [[Cell::empty(); GRID_COLS]; GRID_ROWS];
        rows[0] = cells;
        GridState::new(rows)
    }

    #[test]
    fn test_monster_damage_uses_matching_stat() {
        let stats = PlayerStats::new(10, 5, 3);
        assert_eq!(cell_damage(&Cell::physical_monster(8), &stats), 3.0);
        assert_eq!(cell_damage(&Cell::magic_monster(8), &stats), 5.0);
    }

    #[test]
    fn test_weaker_monster_deals_nothing() {
        let stats = PlayerStats::new(10, 5, 3);
        assert_eq!(cell_damage(&Cell::physical_monster(2), &stats), 0.0);
        assert_eq!(cell_damage(&Cell::magic_monster(3), &stats), 0.0);
    }

    #[test]
    fn test_monster_without_value_deals_nothing() {
        let stats = PlayerStats::new(10, 0, 0);
        let unknown = Cell::new(CellType::PhysicalMonster, None);
        assert_eq!(cell_damage(&unknown, &stats), 0.0);
        assert_eq!(cell_gain(&unknown), MONSTER_GAIN);
    }

    #[test]
    fn test_gain_table() {
        assert_eq!(cell_gain(&Cell::of(CellType::Chest)), 10.0);
        assert_eq!(cell_gain(&Cell::of(CellType::Berry)), 1.0);
        assert_eq!(cell_gain(&Cell::magic_monster(1)), 5.0);
        assert_eq!(cell_gain(&Cell::of(CellType::Trap)), 0.0);
        assert_eq!(cell_gain(&Cell::empty()), 0.0);
    }

    #[test]
    fn test_expectations_weight_by_probability() {
        let grid = single_row_grid([
            Cell::of(CellType::Trap),
            Cell::of(CellType::Chest),
            Cell::physical_monster(9),
            Cell::empty(),
        ]);
        let stats = PlayerStats::new(10, 5, 3);
        let probs = [0.25; GRID_COLS];
        let model = PayoffModel::new();

        let damage = model.expected_damage(0, &grid, &stats, &probs).unwrap();
        let gain = model.expected_gain(0, &grid, &probs).unwrap();

        assert!((damage - (3.0 + 4.0) * 0.25).abs() < 1e-12);
        assert!((gain - (10.0 + 5.0) * 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_trap_at_quarter_probability() {
        let grid = single_row_grid([
            Cell::of(CellType::Trap),
            Cell::empty(),
            Cell::empty(),
            Cell::empty(),
        ]);
        let damage = PayoffModel::new()
            .expected_damage(0, &grid, &PlayerStats::new(3, 5, 3), &[0.25; GRID_COLS])
            .unwrap();
        assert_eq!(damage, 0.75);
    }
}
