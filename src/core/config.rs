//! Tuning tables with documented constants
//!
//! The scoring thresholds and phase weights are externally fixed tuning
//! values. They are loaded once (or taken from `Default`) and then only
//! ever read, so every evaluation stays a pure function of its inputs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::{AdvisorError, Result};
use crate::engine::strategy::PhaseWeights;

/// Directory holding named tuning files
pub const TUNING_DIR: &str = "data/tuning";

/// Constants consumed by the scoring engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    /// At or below this hp the player is at critical health
    pub critical_hp: i32,

    /// At or below this hp (and above `critical_hp`) health is low
    pub low_hp: i32,

    /// Penalty multiplier on expected damage at critical health
    pub critical_survival_weight: f64,

    /// Penalty multiplier on expected damage at low health
    pub low_survival_weight: f64,

    /// Penalty multiplier on expected damage otherwise
    pub base_survival_weight: f64,

    /// Applied to the penalty when expected damage reaches current hp
    ///
    /// This is a near-veto, not an exclusion: a lethal row can still win
    /// when every other row is worse.
    pub lethal_multiplier: f64,

    /// Applied to the final score of rows with gain and no damage
    ///
    /// Runs after the lethal multiplier. The ordering matters for ties.
    pub risk_free_bonus: f64,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            critical_hp: 3,
            low_hp: 5,
            critical_survival_weight: 10.0,
            low_survival_weight: 5.0,
            base_survival_weight: 2.0,
            lethal_multiplier: 100.0,
            risk_free_bonus: 1.5,
        }
    }
}

/// Per-phase strategic weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseTable {
    pub start: PhaseWeights,
    pub mid: PhaseWeights,
    pub boss: PhaseWeights,
    pub critical: PhaseWeights,
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self {
            start: PhaseWeights::new(3.0, 1.0, 2.0),
            mid: PhaseWeights::new(2.0, 2.0, 1.0),
            boss: PhaseWeights::new(0.5, 5.0, 0.2),
            critical: PhaseWeights::new(0.1, 10.0, 0.0),
        }
    }
}

/// Complete advisor tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Name of this tuning (set from the file stem when loaded)
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub scoring: ScoringTuning,
    #[serde(default)]
    pub phases: PhaseTable,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            scoring: ScoringTuning::default(),
            phases: PhaseTable::default(),
        }
    }
}

impl AdvisorConfig {
    /// Reject tunings that would break the scoring monotonicity guarantees
    pub fn validate(&self) -> Result<()> {
        let s = &self.scoring;
        if s.low_hp < s.critical_hp {
            return Err(AdvisorError::Config(format!(
                "low_hp ({}) must not be below critical_hp ({})",
                s.low_hp, s.critical_hp
            )));
        }

        let weights = [
            ("critical_survival_weight", s.critical_survival_weight),
            ("low_survival_weight", s.low_survival_weight),
            ("base_survival_weight", s.base_survival_weight),
        ];
        for (field, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(AdvisorError::Config(format!(
                    "{} must be a non-negative number, got {}",
                    field, value
                )));
            }
        }

        if s.lethal_multiplier.is_nan() || s.lethal_multiplier < 1.0 {
            return Err(AdvisorError::Config(format!(
                "lethal_multiplier must be at least 1, got {}",
                s.lethal_multiplier
            )));
        }
        if s.risk_free_bonus.is_nan() || s.risk_free_bonus < 1.0 {
            return Err(AdvisorError::Config(format!(
                "risk_free_bonus must be at least 1, got {}",
                s.risk_free_bonus
            )));
        }

        let phases = [
            ("start", &self.phases.start),
            ("mid", &self.phases.mid),
            ("boss", &self.phases.boss),
            ("critical", &self.phases.critical),
        ];
        for (phase, weights) in phases {
            if !weights.is_valid() {
                return Err(AdvisorError::Config(format!(
                    "phase '{}' has a negative or non-finite weight",
                    phase
                )));
            }
        }

        Ok(())
    }
}

/// Parse tuning from TOML text
pub fn parse_tuning(contents: &str) -> Result<AdvisorConfig> {
    let config: AdvisorConfig = toml::from_str(contents)?;
    config.validate()?;
    Ok(config)
}

/// Load tuning from a TOML file
pub fn load_tuning(path: &Path) -> Result<AdvisorConfig> {
    let contents = fs::read_to_string(path)?;
    let mut config = parse_tuning(&contents)?;

    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        config.name = stem.to_string();
    }
    tracing::debug!("Loaded tuning '{}' from {:?}", config.name, path);
    Ok(config)
}

/// Load tuning by name from `data/tuning/{name}.toml`
pub fn load_named_tuning(name: &str) -> Result<AdvisorConfig> {
    load_tuning(&tuning_path(name))
}

fn tuning_path(name: &str) -> PathBuf {
    PathBuf::from(TUNING_DIR).join(format!("{}.toml", name))
}
