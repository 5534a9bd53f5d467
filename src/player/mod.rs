//! Player statistics as read from the screen and as modified by items

pub mod items;

use serde::{Deserialize, Serialize};

pub use items::{EffectKind, EquippedItem, ItemSource};

/// Hp assumed when the detector could not read it
pub const DEFAULT_HP: i32 = 10;
/// Force assumed when the detector could not read it
pub const DEFAULT_FORCE: i32 = 5;
/// Magic assumed when the detector could not read it
pub const DEFAULT_MAGIC: i32 = 3;

/// Player stats for one evaluation
///
/// Hp changes between turns outside the engine; here it is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub hp: i32,
    pub force: i32,
    pub magic: i32,
    #[serde(default)]
    pub hp_max: Option<i32>,
}

impl PlayerStats {
    pub fn new(hp: i32, force: i32, magic: i32) -> Self {
        Self {
            hp,
            force,
            magic,
            hp_max: None,
        }
    }

    pub fn with_hp_max(mut self, hp_max: i32) -> Self {
        self.hp_max = Some(hp_max);
        self
    }
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self::new(DEFAULT_HP, DEFAULT_FORCE, DEFAULT_MAGIC)
    }
}

/// Stats after folding in equipped items
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveStats {
    pub hp: i32,
    pub force: i32,
    pub magic: i32,
    pub hp_max: Option<i32>,
    /// Accumulated reduction, subtracted by the caller when damage resolves
    pub damage_reduction: f64,
}

impl EffectiveStats {
    /// The stats the row evaluator consumes (damage reduction is not part of them)
    pub fn player_stats(&self) -> PlayerStats {
        PlayerStats {
            hp: self.hp,
            force: self.force,
            magic: self.magic,
            hp_max: self.hp_max,
        }
    }
}

impl From<PlayerStats> for EffectiveStats {
    fn from(stats: PlayerStats) -> Self {
        Self {
            hp: stats.hp,
            force: stats.force,
            magic: stats.magic,
            hp_max: stats.hp_max,
            damage_reduction: 0.0,
        }
    }
}
