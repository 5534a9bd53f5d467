//! Move Recommender
//!
//! Evaluates every row of the grid in one pass and picks the one to explore.
//! The pass is a pure function of its inputs: no caches, no shared state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::config::AdvisorConfig;
use crate::core::error::Result;
use crate::core::types::{check_row, GRID_ROWS};
use crate::engine::payoff::PayoffModel;
use crate::engine::probability::ProbabilityCalculator;
use crate::engine::scoring::ScoringEngine;
use crate::engine::strategy::StrategyManager;
use crate::grid::{CellType, GridState};
use crate::modifier::Modifier;
use crate::player::PlayerStats;

/// A chest row is "balanced" while expected damage stays under this share of hp
pub const TREASURE_DAMAGE_SHARE: f64 = 0.3;
/// Expected gain above which a row is called high-gain
pub const HIGH_GAIN: f64 = 15.0;
/// Gain/risk ratio above which a row is called excellent
pub const EXCELLENT_RATIO: f64 = 3.0;

/// Everything computed for one row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowEvaluation {
    pub row: usize,
    pub score: f64,
    pub expected_gain: f64,
    pub expected_damage: f64,
    pub survival_probability: f64,
}

/// The selected row, why it was selected, and all four evaluations in row order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub best_row: usize,
    pub justification: String,
    pub evaluations: Vec<RowEvaluation>,
}

impl Recommendation {
    /// Evaluation of the selected row
    pub fn best(&self) -> Option<&RowEvaluation> {
        self.evaluations.iter().find(|e| e.row == self.best_row)
    }
}

/// Why a row was chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rationale {
    CriticalRiskFree,
    CriticalMinimalRisk { expected_damage: f64 },
    BalancedTreasure,
    PureHealing,
    HighGain { expected_gain: f64 },
    ZeroDamage,
    ExcellentRatio { ratio: f64 },
    Compromise { ratio: f64 },
}

impl fmt::Display for Rationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rationale::CriticalRiskFree => {
                write!(f, "Risk-free row, guaranteed survival at critical health")
            }
            Rationale::CriticalMinimalRisk { expected_damage } => write!(
                f,
                "Minimal risk ({:.1} expected damage) at critical health",
                expected_damage
            ),
            Rationale::BalancedTreasure => write!(f, "Balanced risk/reward with treasure"),
            Rationale::PureHealing => write!(f, "Pure healing row"),
            Rationale::HighGain { expected_gain } => write!(
                f,
                "High expected gain ({:.0}) with acceptable risk",
                expected_gain
            ),
            Rationale::ZeroDamage => write!(f, "Zero damage risk"),
            Rationale::ExcellentRatio { ratio } => {
                write!(f, "Excellent gain/risk ratio ({:.1}:1)", ratio)
            }
            Rationale::Compromise { ratio } => {
                write!(f, "Best available compromise (ratio {:.1}:1)", ratio)
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MoveRecommender {
    calculator: ProbabilityCalculator,
    payoff: PayoffModel,
    scoring: ScoringEngine,
    strategy: StrategyManager,
}

impl MoveRecommender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &AdvisorConfig) -> Self {
        Self {
            calculator: ProbabilityCalculator::new(),
            payoff: PayoffModel::new(),
            scoring: ScoringEngine::with_tuning(config.scoring.clone()),
            strategy: StrategyManager::with_config(config),
        }
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    pub fn strategy(&self) -> &StrategyManager {
        &self.strategy
    }

    pub fn evaluate_row(
        &self,
        grid: &GridState,
        stats: &PlayerStats,
        modifiers: &[Modifier],
        row: usize,
    ) -> Result<RowEvaluation> {
        let row = check_row(row)?;
        let probabilities =
            self.calculator
                .compute(row, grid, modifiers, grid.base_probabilities())?;

        let expected_damage = self
            .payoff
            .expected_damage(row, grid, stats, &probabilities)?;
        let expected_gain = self.payoff.expected_gain(row, grid, &probabilities)?;

        Ok(RowEvaluation {
            row,
            score: self.scoring.score(expected_gain, expected_damage, stats.hp),
            expected_gain,
            expected_damage,
            survival_probability: self
                .scoring
                .survival_probability(expected_damage, stats.hp),
        })
    }

    /// Evaluate all rows and select the best
    ///
    /// Only a strictly greater score displaces the current best, so the
    /// lowest row index wins ties.
    pub fn recommend(
        &self,
        grid: &GridState,
        stats: &PlayerStats,
        modifiers: &[Modifier],
    ) -> Result<Recommendation> {
        let mut evaluations = Vec::with_capacity(GRID_ROWS);
        let mut best_index = 0;
        let mut best_score = f64::NEG_INFINITY;

        for row in 0..GRID_ROWS {
            let evaluation = self.evaluate_row(grid, stats, modifiers, row)?;
            tracing::debug!(
                "Row {}: gain={:.2} damage={:.2} score={:.2} survival={:.2}",
                row,
                evaluation.expected_gain,
                evaluation.expected_damage,
                evaluation.score,
                evaluation.survival_probability
            );

            if evaluation.score > best_score {
                best_score = evaluation.score;
                best_index = evaluations.len();
            }
            evaluations.push(evaluation);
        }

        let best = evaluations[best_index];
        let rationale = self.justify(&best, grid, stats)?;
        tracing::debug!("Selected row {} ({})", best.row, rationale);

        Ok(Recommendation {
            best_row: best.row,
            justification: rationale.to_string(),
            evaluations,
        })
    }

    /// First matching rule of the justification cascade
    pub fn justify(
        &self,
        evaluation: &RowEvaluation,
        grid: &GridState,
        stats: &PlayerStats,
    ) -> Result<Rationale> {
        let critical = stats.hp <= self.scoring.tuning().critical_hp;
        let damage = evaluation.expected_damage;
        let gain = evaluation.expected_gain;

        let rationale = if critical && damage == 0.0 {
            Rationale::CriticalRiskFree
        } else if critical {
            Rationale::CriticalMinimalRisk {
                expected_damage: damage,
            }
        } else if grid.row_contains(evaluation.row, CellType::Chest)?
            && damage < stats.hp as f64 * TREASURE_DAMAGE_SHARE
        {
            Rationale::BalancedTreasure
        } else if grid.row_is_all(evaluation.row, CellType::Berry)? {
            Rationale::PureHealing
        } else if gain > HIGH_GAIN {
            Rationale::HighGain {
                expected_gain: gain,
            }
        } else if damage == 0.0 {
            Rationale::ZeroDamage
        } else {
            let ratio = gain / (damage + 1.0);
            if ratio > EXCELLENT_RATIO {
                Rationale::ExcellentRatio { ratio }
            } else {
                Rationale::Compromise { ratio }
            }
        };

        Ok(rationale)
    }
}
