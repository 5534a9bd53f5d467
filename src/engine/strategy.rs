//! Phase classification, strategic weights and item evaluation
//!
//! Everything here is advisory: phase weights and synergy scores inform the
//! host and the item comparison, they do not alter row probabilities.

use ahash::AHashSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::config::{AdvisorConfig, PhaseTable};
use crate::player::{EffectKind, EffectiveStats, EquippedItem, PlayerStats};

/// From this level on the game is in the boss phase
pub const BOSS_LEVEL: u32 = 10;
/// Up to this level the game is in the start phase
pub const START_LEVEL_MAX: u32 = 3;

/// Synergy multiplier for force combined with damage reduction
pub const SYNERGY_FORCE_ARMOR: f64 = 1.3;
/// Synergy multiplier for magic combined with probability modifiers
pub const SYNERGY_MAGIC_LUCK: f64 = 1.25;
/// Synergy multiplier for a diverse loadout
pub const SYNERGY_DIVERSITY: f64 = 1.15;
/// Distinct effect kinds needed for the diversity multiplier
pub const SYNERGY_DIVERSITY_KINDS: usize = 4;

/// Below this much gold chests stay a priority outside the critical phase
pub const CHEST_PRIORITY_GOLD: u32 = 50;
/// Below this force or magic chests stay a priority
pub const CHEST_PRIORITY_STAT: i32 = 10;

/// Coarse game risk context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    Start,
    Mid,
    Boss,
    Critical,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::Start => "start",
            GamePhase::Mid => "mid",
            GamePhase::Boss => "boss",
            GamePhase::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// Strategic weighting for a phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseWeights {
    pub gain_weight: f64,
    pub survival_weight: f64,
    pub exploration_weight: f64,
}

impl PhaseWeights {
    pub const fn new(gain_weight: f64, survival_weight: f64, exploration_weight: f64) -> Self {
        Self {
            gain_weight,
            survival_weight,
            exploration_weight,
        }
    }

    /// All weights finite and non-negative
    pub fn is_valid(&self) -> bool {
        [self.gain_weight, self.survival_weight, self.exploration_weight]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

/// Advisory outputs for the host in one bundle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategicAssessment {
    pub phase: GamePhase,
    pub weights: PhaseWeights,
    pub prioritize_chests: bool,
}

/// Effective stats and synergy of one loadout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadoutEvaluation {
    pub effective: EffectiveStats,
    pub synergy: f64,
}

/// A loadout's evaluation and its position in the caller's input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedLoadout {
    pub index: usize,
    pub evaluation: LoadoutEvaluation,
}

#[derive(Debug, Clone)]
pub struct StrategyManager {
    phases: PhaseTable,
    /// Critical-health threshold, taken from the scoring tuning
    critical_hp: i32,
}

impl Default for StrategyManager {
    fn default() -> Self {
        Self::with_config(&AdvisorConfig::default())
    }
}

impl StrategyManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &AdvisorConfig) -> Self {
        Self {
            phases: config.phases.clone(),
            critical_hp: config.scoring.critical_hp,
        }
    }

    /// Classify the game phase
    ///
    /// Critical health (the tuning's `critical_hp`) overrides every
    /// level-based phase.
    pub fn determine_phase(&self, stats: &PlayerStats, level: u32) -> GamePhase {
        if stats.hp <= self.critical_hp {
            GamePhase::Critical
        } else if level >= BOSS_LEVEL {
            GamePhase::Boss
        } else if level <= START_LEVEL_MAX {
            GamePhase::Start
        } else {
            GamePhase::Mid
        }
    }

    pub fn phase_weights(&self, phase: GamePhase) -> PhaseWeights {
        match phase {
            GamePhase::Start => self.phases.start,
            GamePhase::Mid => self.phases.mid,
            GamePhase::Boss => self.phases.boss,
            GamePhase::Critical => self.phases.critical,
        }
    }

    /// Should chests be chased this turn?
    pub fn prioritize_chests(&self, stats: &PlayerStats, gold: u32, phase: GamePhase) -> bool {
        if phase == GamePhase::Start {
            return true;
        }
        if gold < CHEST_PRIORITY_GOLD && phase != GamePhase::Critical {
            return true;
        }
        stats.force < CHEST_PRIORITY_STAT || stats.magic < CHEST_PRIORITY_STAT
    }

    /// Phase, weights and chest priority for the current situation
    ///
    /// Unknown gold counts as zero.
    pub fn assess(&self, stats: &PlayerStats, level: u32, gold: Option<u32>) -> StrategicAssessment {
        let phase = self.determine_phase(stats, level);
        StrategicAssessment {
            phase,
            weights: self.phase_weights(phase),
            prioritize_chests: self.prioritize_chests(stats, gold.unwrap_or(0), phase),
        }
    }

    /// Fold item effects into the stats record
    ///
    /// Damage reduction is accumulated but not applied; the caller subtracts
    /// it when damage actually resolves. Effects with no stat counterpart
    /// are ignored.
    pub fn apply_item_effects(&self, base: &PlayerStats, items: &[EquippedItem]) -> EffectiveStats {
        let mut stats = EffectiveStats::from(*base);

        for item in items {
            // `as` saturates out-of-range values and maps NaN to 0
            let amount = item.value as i32;
            match item.effect {
                EffectKind::Force => stats.force = stats.force.saturating_add(amount),
                EffectKind::Magic => stats.magic = stats.magic.saturating_add(amount),
                EffectKind::AllStats => {
                    stats.force = stats.force.saturating_add(amount);
                    stats.magic = stats.magic.saturating_add(amount);
                }
                EffectKind::MaxHP => {
                    let ceiling = stats.hp_max.unwrap_or(stats.hp);
                    stats.hp_max = Some(ceiling.saturating_add(amount));
                }
                EffectKind::DamageReduction => stats.damage_reduction += item.value,
                EffectKind::ProbabilityModifier
                | EffectKind::Evasion
                | EffectKind::GoldBonus
                | EffectKind::Invisibility
                | EffectKind::Resurrection
                | EffectKind::Healing
                | EffectKind::Regeneration => {}
            }
        }

        stats
    }

    /// Comparative synergy of a set of items, starting at 1.0
    pub fn synergy_score(&self, items: &[EquippedItem]) -> f64 {
        let kinds: AHashSet<EffectKind> = items.iter().map(|item| item.effect).collect();
        let mut score = 1.0;

        if kinds.contains(&EffectKind::Force) && kinds.contains(&EffectKind::DamageReduction) {
            score *= SYNERGY_FORCE_ARMOR;
        }
        if kinds.contains(&EffectKind::Magic) && kinds.contains(&EffectKind::ProbabilityModifier) {
            score *= SYNERGY_MAGIC_LUCK;
        }
        if kinds.len() >= SYNERGY_DIVERSITY_KINDS {
            score *= SYNERGY_DIVERSITY;
        }

        score
    }

    pub fn evaluate_item_loadout(&self, stats: &PlayerStats, items: &[EquippedItem]) -> LoadoutEvaluation {
        LoadoutEvaluation {
            effective: self.apply_item_effects(stats, items),
            synergy: self.synergy_score(items),
        }
    }

    /// Evaluate candidate loadouts in parallel, best synergy first
    ///
    /// Loadouts with equal synergy keep their input order.
    pub fn rank_loadouts(&self, stats: &PlayerStats, loadouts: &[Vec<EquippedItem>]) -> Vec<RankedLoadout> {
        let mut ranked: Vec<RankedLoadout> = loadouts
            .par_iter()
            .enumerate()
            .map(|(index, items)| RankedLoadout {
                index,
                evaluation: self.evaluate_item_loadout(stats, items),
            })
            .collect();

        ranked.sort_by(|a, b| b.evaluation.synergy.total_cmp(&a.evaluation.synergy));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(effect: EffectKind, value: f64) -> EquippedItem {
        EquippedItem::new(format!("{}", effect), effect, value)
    }

    #[test]
    fn test_critical_overrides_level() {
        let manager = StrategyManager::new();
        let weak = PlayerStats::new(3, 5, 3);
        assert_eq!(manager.determine_phase(&weak, 1), GamePhase::Critical);
        assert_eq!(manager.determine_phase(&weak, 12), GamePhase::Critical);
    }

    #[test]
    fn test_level_phases() {
        let manager = StrategyManager::new();
        let healthy = PlayerStats::new(4, 5, 3);
        assert_eq!(manager.determine_phase(&healthy, 1), GamePhase::Start);
        assert_eq!(manager.determine_phase(&healthy, 3), GamePhase::Start);
        assert_eq!(manager.determine_phase(&healthy, 4), GamePhase::Mid);
        assert_eq!(manager.determine_phase(&healthy, 9), GamePhase::Mid);
        assert_eq!(manager.determine_phase(&healthy, 10), GamePhase::Boss);
    }

    #[test]
    fn test_phase_weight_shape() {
        let manager = StrategyManager::new();
        let critical = manager.phase_weights(GamePhase::Critical);
        assert!(critical.survival_weight > 10.0 * critical.gain_weight);

        let start = manager.phase_weights(GamePhase::Start);
        assert!(start.gain_weight > start.survival_weight);
        assert!(start.exploration_weight > start.survival_weight);

        let boss = manager.phase_weights(GamePhase::Boss);
        assert!(boss.survival_weight > boss.gain_weight);
        assert!(boss.exploration_weight < manager.phase_weights(GamePhase::Mid).exploration_weight);

        let mid = manager.phase_weights(GamePhase::Mid);
        assert_eq!(mid.gain_weight, mid.survival_weight);
    }

    #[test]
    fn test_weights_follow_config() {
        let mut config = AdvisorConfig::default();
        config.phases.boss = PhaseWeights::new(1.0, 9.0, 0.0);
        let manager = StrategyManager::with_config(&config);
        assert_eq!(manager.phase_weights(GamePhase::Boss).survival_weight, 9.0);
    }

    #[test]
    fn test_item_effects_fold() {
        let manager = StrategyManager::new();
        let base = PlayerStats::new(8, 5, 3);
        let items = vec![
            item(EffectKind::Force, 2.0),
            item(EffectKind::Magic, 3.0),
            item(EffectKind::AllStats, 1.0),
            item(EffectKind::MaxHP, 3.0),
            item(EffectKind::DamageReduction, 1.0),
            item(EffectKind::DamageReduction, 2.0),
            item(EffectKind::Evasion, 0.2),
        ];

        let effective = manager.apply_item_effects(&base, &items);
        assert_eq!(effective.force, 8);
        assert_eq!(effective.magic, 7);
        assert_eq!(effective.hp, 8);
        assert_eq!(effective.hp_max, Some(11));
        assert_eq!(effective.damage_reduction, 3.0);
    }

    #[test]
    fn test_max_hp_extends_existing_ceiling() {
        let manager = StrategyManager::new();
        let base = PlayerStats::new(8, 5, 3).with_hp_max(15);
        let effective = manager.apply_item_effects(&base, &[item(EffectKind::MaxHP, 10.0)]);
        assert_eq!(effective.hp_max, Some(25));
    }

    #[test]
    fn test_huge_item_values_saturate() {
        let manager = StrategyManager::new();
        let base = PlayerStats::new(10, 5, 3);
        let items = vec![
            item(EffectKind::Force, 1e12),
            item(EffectKind::AllStats, 1e12),
            item(EffectKind::MaxHP, 1e12),
            item(EffectKind::Magic, -1e12),
            item(EffectKind::Magic, -1e12),
        ];

        let effective = manager.evaluate_item_loadout(&base, &items).effective;
        assert_eq!(effective.force, i32::MAX);
        assert_eq!(effective.magic, i32::MIN);
        assert_eq!(effective.hp_max, Some(i32::MAX));
        assert_eq!(effective.hp, 10);
    }

    #[test]
    fn test_nan_item_value_is_ignored() {
        let manager = StrategyManager::new();
        let base = PlayerStats::new(10, 5, 3);
        let effective = manager.apply_item_effects(&base, &[item(EffectKind::Force, f64::NAN)]);
        assert_eq!(effective.force, 5);
    }

    #[test]
    fn test_critical_threshold_follows_tuning() {
        let mut config = AdvisorConfig::default();
        config.scoring.critical_hp = 4;
        config.scoring.low_hp = 6;
        let manager = StrategyManager::with_config(&config);
        let stats = PlayerStats::new(4, 5, 3);

        assert_eq!(manager.determine_phase(&stats, 5), GamePhase::Critical);
        assert_eq!(StrategyManager::new().determine_phase(&stats, 5), GamePhase::Mid);
    }

    #[test]
    fn test_no_items_no_change() {
        let manager = StrategyManager::new();
        let base = PlayerStats::new(8, 5, 3);
        assert_eq!(manager.apply_item_effects(&base, &[]), EffectiveStats::from(base));
        assert_eq!(manager.synergy_score(&[]), 1.0);
    }

    #[test]
    fn test_synergy_multipliers_compose() {
        let manager = StrategyManager::new();

        let armored = vec![item(EffectKind::Force, 2.0), item(EffectKind::DamageReduction, 1.0)];
        assert!((manager.synergy_score(&armored) - 1.3).abs() < 1e-12);

        let mystic = vec![item(EffectKind::Magic, 2.0), item(EffectKind::ProbabilityModifier, 0.1)];
        assert!((manager.synergy_score(&mystic) - 1.25).abs() < 1e-12);

        let all: Vec<_> = armored.into_iter().chain(mystic).collect();
        assert!((manager.synergy_score(&all) - 1.3 * 1.25 * 1.15).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_kinds_count_once() {
        let manager = StrategyManager::new();
        let items = vec![
            item(EffectKind::Force, 2.0),
            item(EffectKind::Force, 3.0),
            item(EffectKind::Magic, 2.0),
            item(EffectKind::Magic, 3.0),
        ];
        assert_eq!(manager.synergy_score(&items), 1.0);
    }

    #[test]
    fn test_chest_priority() {
        let manager = StrategyManager::new();
        let strong = PlayerStats::new(10, 12, 12);
        let weak = PlayerStats::new(10, 4, 12);

        assert!(manager.prioritize_chests(&strong, 500, GamePhase::Start));
        assert!(manager.prioritize_chests(&strong, 10, GamePhase::Mid));
        assert!(!manager.prioritize_chests(&strong, 10, GamePhase::Critical));
        assert!(!manager.prioritize_chests(&strong, 80, GamePhase::Boss));
        assert!(manager.prioritize_chests(&weak, 80, GamePhase::Boss));
    }

    #[test]
    fn test_assess_bundles_outputs() {
        let manager = StrategyManager::new();
        let stats = PlayerStats::new(2, 12, 12);
        let assessment = manager.assess(&stats, 5, Some(100));
        assert_eq!(assessment.phase, GamePhase::Critical);
        assert_eq!(assessment.weights, manager.phase_weights(GamePhase::Critical));
        assert!(!assessment.prioritize_chests);
    }

    #[test]
    fn test_rank_loadouts_orders_by_synergy() {
        let manager = StrategyManager::new();
        let stats = PlayerStats::default();
        let loadouts = vec![
            vec![item(EffectKind::GoldBonus, 0.5)],
            vec![item(EffectKind::Force, 2.0), item(EffectKind::DamageReduction, 1.0)],
            vec![item(EffectKind::Evasion, 0.2)],
        ];

        let ranked = manager.rank_loadouts(&stats, &loadouts);
        let order: Vec<_> = ranked.iter().map(|r| r.index).collect();
        assert_eq!(order, vec![1, 0, 2]);
        assert_eq!(ranked[0].evaluation.effective.force, 7);
    }
}
