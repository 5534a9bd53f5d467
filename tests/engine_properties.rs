//! Property-based tests for the decision engine.

use proptest::prelude::*;

use sol_cesto_advisor::core::types::{GRID_COLS, GRID_ROWS};
use sol_cesto_advisor::engine::{self, ProbabilityCalculator, ScoringEngine};
use sol_cesto_advisor::grid::{BaseProbabilities, Cell, CellType, GridState};
use sol_cesto_advisor::modifier::Modifier;
use sol_cesto_advisor::player::PlayerStats;

/// Strategy: any cell, monsters carrying a value in 0..=20.
fn cell_strategy() -> impl Strategy<Value = Cell> {
    prop_oneof![
        (0..=20i32).prop_map(Cell::physical_monster),
        (0..=20i32).prop_map(Cell::magic_monster),
        Just(Cell::of(CellType::Chest)),
        Just(Cell::of(CellType::Berry)),
        Just(Cell::of(CellType::Trap)),
        Just(Cell::empty()),
    ]
}

fn grid_strategy() -> impl Strategy<Value = GridState> {
    prop::array::uniform4(prop::array::uniform4(cell_strategy())).prop_map(GridState::new)
}

fn base_strategy() -> impl Strategy<Value = BaseProbabilities> {
    prop::array::uniform4(prop::array::uniform4(0.0..=1.0f64))
}

fn modifier_strategy() -> impl Strategy<Value = Modifier> {
    prop_oneof![
        Just(Modifier::StoneTooth),
        any::<bool>().prop_map(|combo| Modifier::MetalTooth { combo }),
        Just(Modifier::UnknownTooth),
    ]
}

fn stats_strategy() -> impl Strategy<Value = PlayerStats> {
    (1..=20i32, 0..=15i32, 0..=15i32).prop_map(|(hp, force, magic)| PlayerStats::new(hp, force, magic))
}

proptest! {
    // 1. Adjusted probabilities form a distribution
    #[test]
    fn probabilities_sum_to_one(
        grid in grid_strategy(),
        base in base_strategy(),
        modifiers in prop::collection::vec(modifier_strategy(), 0..6),
        row in 0..GRID_ROWS,
    ) {
        let probs = ProbabilityCalculator::new().compute(row, &grid, &modifiers, &base).unwrap();
        let total: f64 = probs.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-6, "total={total} probs={probs:?}");
        prop_assert!(probs.iter().all(|p| *p >= 0.0));
        prop_assert_eq!(probs.len(), GRID_COLS);
    }

    // 2. More damage never scores higher
    #[test]
    fn score_non_increasing_in_damage(
        gain in 0.0..50.0f64,
        damage in 0.0..30.0f64,
        extra in 0.0..30.0f64,
        hp in 1..=20i32,
    ) {
        let engine = ScoringEngine::new();
        let low = engine.score(gain, damage, hp);
        let high = engine.score(gain, damage + extra, hp);
        prop_assert!(high <= low, "damage {damage} -> {low}, {} -> {high}", damage + extra);
    }

    // 3. More gain never scores lower
    #[test]
    fn score_non_decreasing_in_gain(
        gain in 0.0..50.0f64,
        extra in 0.0..50.0f64,
        damage in 0.0..30.0f64,
        hp in 1..=20i32,
    ) {
        let engine = ScoringEngine::new();
        prop_assert!(engine.score(gain + extra, damage, hp) >= engine.score(gain, damage, hp));
    }

    // 4. Survival stays in [0, 1] and falls with damage
    #[test]
    fn survival_bounded_and_monotone(
        damage in 0.0..1000.0f64,
        extra in 0.0..1000.0f64,
        hp in 1..=20i32,
    ) {
        let engine = ScoringEngine::new();
        let before = engine.survival_probability(damage, hp);
        let after = engine.survival_probability(damage + extra, hp);
        prop_assert!((0.0..=1.0).contains(&before));
        prop_assert!((0.0..=1.0).contains(&after));
        prop_assert!(after <= before);
    }

    // 5. Recommendation is a pure function and the best row holds the top score
    #[test]
    fn recommend_deterministic(
        grid in grid_strategy(),
        stats in stats_strategy(),
        modifiers in prop::collection::vec(modifier_strategy(), 0..3),
    ) {
        let first = engine::recommend(&grid, &stats, &modifiers).unwrap();
        let second = engine::recommend(&grid, &stats, &modifiers).unwrap();
        prop_assert_eq!(&first, &second);

        let best = first.evaluations[first.best_row].score;
        for evaluation in &first.evaluations[..first.best_row] {
            prop_assert!(evaluation.score < best);
        }
        for evaluation in &first.evaluations[first.best_row..] {
            prop_assert!(evaluation.score <= best);
        }
    }
}
