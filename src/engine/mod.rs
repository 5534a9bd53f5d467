//! Decision engine: probabilities, payoffs, scoring and row selection

pub mod payoff;
pub mod probability;
pub mod recommender;
pub mod scoring;
pub mod strategy;

pub use payoff::PayoffModel;
pub use probability::{ProbabilityCalculator, RowProbabilities};
pub use recommender::{MoveRecommender, Rationale, Recommendation, RowEvaluation};
pub use scoring::ScoringEngine;
pub use strategy::{
    GamePhase, LoadoutEvaluation, PhaseWeights, RankedLoadout, StrategicAssessment,
    StrategyManager,
};

use crate::core::error::Result;
use crate::grid::GridState;
use crate::modifier::Modifier;
use crate::player::{EquippedItem, PlayerStats};

/// Recommend a row with the built-in tuning
pub fn recommend(grid: &GridState, stats: &PlayerStats, modifiers: &[Modifier]) -> Result<Recommendation> {
    MoveRecommender::new().recommend(grid, stats, modifiers)
}

/// Effective stats and synergy of a loadout with the built-in tuning
pub fn evaluate_item_loadout(stats: &PlayerStats, items: &[EquippedItem]) -> LoadoutEvaluation {
    StrategyManager::new().evaluate_item_loadout(stats, items)
}
