//! Row Scoring
//!
//! Turns a row's expected gain and damage into a single comparable score,
//! weighted by how much health the player has left.

use crate::core::config::ScoringTuning;

#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    tuning: ScoringTuning,
}

impl ScoringEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tuning(tuning: ScoringTuning) -> Self {
        Self { tuning }
    }

    pub fn tuning(&self) -> &ScoringTuning {
        &self.tuning
    }

    /// Penalty multiplier on expected damage for the given health
    pub fn survival_weight(&self, current_hp: i32) -> f64 {
        if current_hp <= self.tuning.critical_hp {
            self.tuning.critical_survival_weight
        } else if current_hp <= self.tuning.low_hp {
            self.tuning.low_survival_weight
        } else {
            self.tuning.base_survival_weight
        }
    }

    /// Score a row from its expectations
    ///
    /// Non-increasing in `expected_damage`, non-decreasing in `expected_gain`.
    /// The risk-free bonus is applied after the lethal multiplier.
    pub fn score(&self, expected_gain: f64, expected_damage: f64, current_hp: i32) -> f64 {
        let mut penalty = expected_damage * self.survival_weight(current_hp);

        if expected_damage >= current_hp as f64 {
            penalty *= self.tuning.lethal_multiplier;
        }

        let mut score = expected_gain - penalty;

        if expected_damage == 0.0 && expected_gain > 0.0 {
            score *= self.tuning.risk_free_bonus;
        }

        score
    }

    /// Heuristic chance of surviving the row, in [0, 1]
    pub fn survival_probability(&self, expected_damage: f64, current_hp: i32) -> f64 {
        let hp = current_hp as f64;
        if expected_damage >= hp {
            0.0
        } else if expected_damage == 0.0 {
            1.0
        } else {
            (1.0 - expected_damage / hp).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survival_weight_tiers() {
        let engine = ScoringEngine::new();
        assert_eq!(engine.survival_weight(1), 10.0);
        assert_eq!(engine.survival_weight(3), 10.0);
        assert_eq!(engine.survival_weight(4), 5.0);
        assert_eq!(engine.survival_weight(5), 5.0);
        assert_eq!(engine.survival_weight(6), 2.0);
    }

    #[test]
    fn test_risk_free_chest_bonus() {
        let engine = ScoringEngine::new();
        assert_eq!(engine.score(10.0, 0.0, 10), 15.0);
    }

    #[test]
    fn test_empty_row_scores_zero() {
        let engine = ScoringEngine::new();
        assert_eq!(engine.score(0.0, 0.0, 10), 0.0);
    }

    #[test]
    fn test_penalty_by_health() {
        let engine = ScoringEngine::new();
        assert_eq!(engine.score(5.0, 1.0, 10), 3.0);
        assert_eq!(engine.score(5.0, 1.0, 5), 0.0);
        assert_eq!(engine.score(5.0, 1.0, 2), -5.0);
    }

    #[test]
    fn test_lethal_row_is_near_veto() {
        let engine = ScoringEngine::new();
        // 2 damage at 2 hp: 2 * 10 * 100
        assert_eq!(engine.score(5.0, 2.0, 2), 5.0 - 2000.0);
        // Just below lethal
        assert_eq!(engine.score(5.0, 1.5, 2), 5.0 - 15.0);
    }

    #[test]
    fn test_custom_tuning() {
        let tuning = ScoringTuning {
            base_survival_weight: 3.0,
            ..ScoringTuning::default()
        };
        let engine = ScoringEngine::with_tuning(tuning);
        assert_eq!(engine.score(10.0, 1.0, 10), 7.0);
    }

    #[test]
    fn test_survival_probability() {
        let engine = ScoringEngine::new();
        assert_eq!(engine.survival_probability(0.0, 10), 1.0);
        assert_eq!(engine.survival_probability(0.75, 3), 0.75);
        assert_eq!(engine.survival_probability(3.0, 3), 0.0);
        assert_eq!(engine.survival_probability(500.0, 3), 0.0);
    }
}
