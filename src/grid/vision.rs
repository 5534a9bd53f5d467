//! Data contract with the screen reader
//!
//! The screen reader emits loosely typed labels and optional numbers. This
//! module turns that record into engine inputs. Shape problems are errors;
//! missing or unreadable values are recovered with fixed defaults.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::{Position, GRID_CELLS, GRID_COLS, GRID_ROWS};
use crate::grid::{BaseProbabilities, Cell, CellType, GridState};
use crate::modifier::Modifier;
use crate::player::items::resolve_items;
use crate::player::{EquippedItem, PlayerStats, DEFAULT_FORCE, DEFAULT_HP, DEFAULT_MAGIC};

/// Opposing stat assumed for a monster whose number could not be read
pub const DEFAULT_MONSTER_VALUE: i32 = 5;

/// Level assumed when none was reported
pub const DEFAULT_LEVEL: u32 = 1;

/// One detected cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedCell {
    pub row: usize,
    pub col: usize,
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub value: Option<i32>,
}

/// Stats as read by OCR; any of them may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetectedStats {
    #[serde(default, deserialize_with = "lenient_number")]
    pub hp: Option<i32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub force: Option<i32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub magic: Option<i32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub hp_max: Option<i32>,
}

/// One detected tooth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedModifier {
    pub kind: String,
    #[serde(default)]
    pub combo: bool,
}

/// Everything the screen reader produced for one screenshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisionReport {
    pub cells: Vec<DetectedCell>,
    #[serde(default)]
    pub stats: DetectedStats,
    #[serde(default)]
    pub modifiers: Vec<DetectedModifier>,
    /// Row-major on-screen percentages converted to [0, 1]
    #[serde(default)]
    pub probabilities: Option<Vec<f64>>,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub gold: Option<u32>,
    #[serde(default)]
    pub items: Vec<String>,
}

/// Engine inputs recovered from a vision report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub grid: GridState,
    pub stats: PlayerStats,
    pub modifiers: Vec<Modifier>,
    pub level: u32,
    pub gold: Option<u32>,
    pub items: Vec<EquippedItem>,
}

/// Read an OCR number, treating anything that is not an integer as unread
///
/// Integer strings ("7") are accepted; floats, garbage strings and nulls
/// become `None` and are recovered with defaults later.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let number = match &value {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    if number.is_none() && !value.is_null() {
        tracing::debug!("Unreadable number {} treated as missing", value);
    }
    Ok(number)
}

/// Map a detector label to a cell type; anything unrecognised is empty
pub fn parse_cell_type(label: &str) -> CellType {
    match label.trim().to_ascii_lowercase().as_str() {
        "physical_monster" | "monstre_physique" => CellType::PhysicalMonster,
        "magic_monster" | "monstre_magique" => CellType::MagicMonster,
        "chest" | "coffre" => CellType::Chest,
        "berry" | "fraise" => CellType::Berry,
        "trap" | "piege" => CellType::Trap,
        "empty" | "vide" => CellType::Empty,
        other => {
            tracing::debug!("Unrecognised cell label '{}' treated as empty", other);
            CellType::Empty
        }
    }
}

impl DetectedCell {
    fn to_cell(&self) -> Cell {
        let kind = parse_cell_type(&self.kind);
        let value = if kind.is_monster() {
            Some(self.value.unwrap_or_else(|| {
                tracing::warn!(
                    "No value read for monster at ({}, {}), assuming {}",
                    self.row,
                    self.col,
                    DEFAULT_MONSTER_VALUE
                );
                DEFAULT_MONSTER_VALUE
            }))
        } else {
            None
        };
        Cell::new(kind, value)
    }
}

impl DetectedStats {
    /// Fill unread stats with the documented defaults
    ///
    /// All three core stats reading as zero means OCR found nothing at all,
    /// so the whole record falls back to defaults.
    pub fn resolve(&self) -> PlayerStats {
        if self.hp == Some(0) && self.force == Some(0) && self.magic == Some(0) {
            tracing::warn!("All stats read as zero, using default stats");
            return PlayerStats::default();
        }

        let hp = self.hp.unwrap_or_else(|| missing_stat("hp", DEFAULT_HP));
        let force = self.force.unwrap_or_else(|| missing_stat("force", DEFAULT_FORCE));
        let magic = self.magic.unwrap_or_else(|| missing_stat("magic", DEFAULT_MAGIC));

        PlayerStats {
            hp,
            force,
            magic,
            hp_max: self.hp_max,
        }
    }
}

fn missing_stat(name: &str, default: i32) -> i32 {
    tracing::warn!("Stat '{}' missing from vision report, assuming {}", name, default);
    default
}

impl VisionReport {
    /// Read a report from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Build the grid, rejecting reports that do not describe a full 4x4 grid
    pub fn grid(&self) -> Result<GridState> {
        let cells = self
            .cells
            .iter()
            .map(|detected| -> Result<(Position, Cell)> {
                Ok((Position::new(detected.row, detected.col)?, detected.to_cell()))
            })
            .collect::<Result<Vec<_>>>()?;

        let grid = GridState::from_positioned(cells)?;
        match self.base_probabilities() {
            Some(probabilities) => grid.with_base_probabilities(probabilities),
            None => Ok(grid),
        }
    }

    /// Detected probabilities, if a full set was read
    fn base_probabilities(&self) -> Option<BaseProbabilities> {
        let values = self.probabilities.as_ref()?;
        if values.len() < GRID_CELLS {
            tracing::debug!(
                "Only {} probabilities read, falling back to uniform",
                values.len()
            );
            return None;
        }

        let mut matrix = [[0.0; GRID_COLS]; GRID_ROWS];
        for (i, &value) in values.iter().take(GRID_CELLS).enumerate() {
            matrix[i / GRID_COLS][i % GRID_COLS] = value;
        }
        Some(matrix)
    }

    pub fn modifiers(&self) -> Vec<Modifier> {
        self.modifiers
            .iter()
            .map(|m| Modifier::from_label(&m.kind, m.combo))
            .collect()
    }

    /// Convert the whole report into engine inputs
    pub fn into_snapshot(self) -> Result<GameSnapshot> {
        let grid = self.grid()?;
        let stats = self.stats.resolve();
        let modifiers = self.modifiers();
        let items = resolve_items(self.items.as_slice());

        Ok(GameSnapshot {
            grid,
            stats,
            modifiers,
            level: self.level.unwrap_or(DEFAULT_LEVEL),
            gold: self.gold,
            items,
        })
    }
}
