//! Equippable items and the merchant/blessing catalog
//!
//! Items are supplied per evaluation; the engine never owns an inventory.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What an item does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Force,
    Magic,
    #[serde(rename = "max_hp")]
    MaxHP,
    DamageReduction,
    ProbabilityModifier,
    AllStats,
    Evasion,
    GoldBonus,
    Invisibility,
    Resurrection,
    /// One-shot heal; does not change stats
    Healing,
    /// Heal over time; does not change stats
    Regeneration,
}

impl EffectKind {
    pub fn label(&self) -> &'static str {
        match self {
            EffectKind::Force => "force",
            EffectKind::Magic => "magic",
            EffectKind::MaxHP => "max_hp",
            EffectKind::DamageReduction => "damage_reduction",
            EffectKind::ProbabilityModifier => "probability_modifier",
            EffectKind::AllStats => "all_stats",
            EffectKind::Evasion => "evasion",
            EffectKind::GoldBonus => "gold_bonus",
            EffectKind::Invisibility => "invisibility",
            EffectKind::Resurrection => "resurrection",
            EffectKind::Healing => "healing",
            EffectKind::Regeneration => "regeneration",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An item currently equipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub id: String,
    pub effect: EffectKind,
    pub value: f64,
}

impl EquippedItem {
    pub fn new(id: impl Into<String>, effect: EffectKind, value: f64) -> Self {
        Self {
            id: id.into(),
            effect,
            value,
        }
    }

    /// Look an item up in the catalog by id
    pub fn from_catalog(id: &str) -> Option<Self> {
        catalog_entry(id).map(CatalogEntry::to_item)
    }
}

/// Where a catalog item comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemSource {
    Merchant,
    Blessing,
}

/// Static catalog row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub source: ItemSource,
    pub effect: EffectKind,
    pub value: f64,
}

impl CatalogEntry {
    const fn new(id: &'static str, source: ItemSource, effect: EffectKind, value: f64) -> Self {
        Self {
            id,
            source,
            effect,
            value,
        }
    }

    pub fn to_item(&self) -> EquippedItem {
        EquippedItem::new(self.id, self.effect, self.value)
    }
}

use EffectKind as E;
use ItemSource::{Blessing, Merchant};

/// Every known item
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry::new("rusty_sword", Merchant, E::Force, 2.0),
    CatalogEntry::new("magic_staff", Merchant, E::Magic, 2.0),
    CatalogEntry::new("light_armor", Merchant, E::DamageReduction, 1.0),
    CatalogEntry::new("healing_potion", Merchant, E::Healing, 5.0),
    CatalogEntry::new("luck_ring", Merchant, E::ProbabilityModifier, 0.1),
    CatalogEntry::new("speed_boots", Merchant, E::Evasion, 0.2),
    CatalogEntry::new("life_amulet", Merchant, E::MaxHP, 3.0),
    CatalogEntry::new("shadow_cloak", Merchant, E::Invisibility, 0.3),
    CatalogEntry::new("grimoire", Merchant, E::Magic, 3.0),
    CatalogEntry::new("shield", Merchant, E::DamageReduction, 2.0),
    CatalogEntry::new("elixir", Merchant, E::AllStats, 1.0),
    CatalogEntry::new("soul_stone", Merchant, E::Resurrection, 1.0),
    CatalogEntry::new("crown", Merchant, E::GoldBonus, 0.5),
    CatalogEntry::new("strength_gloves", Merchant, E::Force, 3.0),
    CatalogEntry::new("blessing_strength", Blessing, E::Force, 5.0),
    CatalogEntry::new("blessing_magic", Blessing, E::Magic, 5.0),
    CatalogEntry::new("blessing_life", Blessing, E::MaxHP, 10.0),
    CatalogEntry::new("blessing_luck", Blessing, E::ProbabilityModifier, 0.25),
    CatalogEntry::new("blessing_protection", Blessing, E::DamageReduction, 3.0),
    CatalogEntry::new("blessing_wealth", Blessing, E::GoldBonus, 1.0),
    CatalogEntry::new("blessing_healing", Blessing, E::Regeneration, 2.0),
];

pub fn catalog_entry(id: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|entry| entry.id == id)
}

/// Resolve catalog ids, skipping (and logging) ids that are not in the catalog
pub fn resolve_items<S: AsRef<str>>(ids: &[S]) -> Vec<EquippedItem> {
    ids.iter()
        .filter_map(|id| {
            let id = id.as_ref();
            let item = EquippedItem::from_catalog(id);
            if item.is_none() {
                tracing::warn!("Unknown item '{}' ignored", id);
            }
            item
        })
        .collect()
}
