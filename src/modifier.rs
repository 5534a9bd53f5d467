//! Active modifiers ("teeth") and their probability effects
//!
//! Each modifier scales the selection weight of a cell by a fixed factor
//! that may depend on what the cell holds. Factors are MULTIPLICATIVE and
//! compose in the order the modifiers are supplied.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::CellType;

/// Stone tooth factor on physical monsters
pub const STONE_TOOTH_PHYSICAL: f64 = 1.21;
/// Stone tooth factor on traps
pub const STONE_TOOTH_TRAP: f64 = 1.09;
/// Stone tooth factor on everything else
pub const STONE_TOOTH_OTHER: f64 = 0.70;
/// Metal tooth factor when its combo is active
pub const METAL_TOOTH_COMBO: f64 = 1.5;
/// Weak untyped boost from a tooth the detector could not identify
pub const UNKNOWN_TOOTH: f64 = 1.10;

/// An active modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Modifier {
    /// Pulls selection toward physical monsters and traps
    StoneTooth,
    /// Type-independent boost, only while its combo is running
    MetalTooth {
        #[serde(default)]
        combo: bool,
    },
    UnknownTooth,
}

impl Modifier {
    /// Weight factor this modifier applies to a cell of `kind`
    pub fn factor(&self, kind: CellType) -> f64 {
        match self {
            Modifier::StoneTooth => match kind {
                CellType::PhysicalMonster => STONE_TOOTH_PHYSICAL,
                CellType::Trap => STONE_TOOTH_TRAP,
                _ => STONE_TOOTH_OTHER,
            },
            Modifier::MetalTooth { combo: true } => METAL_TOOTH_COMBO,
            Modifier::MetalTooth { combo: false } => 1.0,
            Modifier::UnknownTooth => UNKNOWN_TOOTH,
        }
    }

    /// Map a detector label to a modifier; unrecognised labels are unknown teeth
    pub fn from_label(label: &str, combo: bool) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "stone_tooth" | "dent_pierre" => Modifier::StoneTooth,
            "metal_tooth" | "dent_metal" => Modifier::MetalTooth { combo },
            _ => Modifier::UnknownTooth,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::StoneTooth => f.write_str("stone tooth"),
            Modifier::MetalTooth { combo: true } => f.write_str("metal tooth (combo)"),
            Modifier::MetalTooth { combo: false } => f.write_str("metal tooth"),
            Modifier::UnknownTooth => f.write_str("unknown tooth"),
        }
    }
}
