//! Core type definitions used throughout the codebase
//!
//! Every identifier the simulation reasons about is a closed enum, so
//! "for all kinds" iteration is a compile-time-checked loop rather than a
//! dynamic string lookup.

use serde::{Deserialize, Serialize};

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Unique identifier for external actors (neighboring settlements)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NeighborId(pub u32);

impl NeighborId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// The nine resource kinds: four raw, four processed, one currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    // Raw
    RawWood,
    RawStone,
    IronOre,
    Wheat,
    // Processed
    Planks,
    Blocks,
    IronIngots,
    Bread,
    // Currency
    Gold,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::RawWood,
        ResourceKind::RawStone,
        ResourceKind::IronOre,
        ResourceKind::Wheat,
        ResourceKind::Planks,
        ResourceKind::Blocks,
        ResourceKind::IronIngots,
        ResourceKind::Bread,
        ResourceKind::Gold,
    ];

    /// All kinds subject to storage caps and market pricing
    pub const TRADEABLE: [ResourceKind; 8] = [
        ResourceKind::RawWood,
        ResourceKind::RawStone,
        ResourceKind::IronOre,
        ResourceKind::Wheat,
        ResourceKind::Planks,
        ResourceKind::Blocks,
        ResourceKind::IronIngots,
        ResourceKind::Bread,
    ];

    pub fn is_currency(&self) -> bool {
        matches!(self, ResourceKind::Gold)
    }
}

/// The seventeen building kinds across four categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    // Civil
    TownCenter,
    House,
    Warehouse,
    Wall,
    Cathedral,
    Market,
    // Extraction
    LumberCamp,
    Quarry,
    IronMine,
    Farm,
    // Industry
    Sawmill,
    Masonry,
    Foundry,
    Windmill,
    // Military
    Barracks,
    Stable,
    Blacksmith,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 17] = [
        BuildingKind::TownCenter,
        BuildingKind::House,
        BuildingKind::Warehouse,
        BuildingKind::Wall,
        BuildingKind::Cathedral,
        BuildingKind::Market,
        BuildingKind::LumberCamp,
        BuildingKind::Quarry,
        BuildingKind::IronMine,
        BuildingKind::Farm,
        BuildingKind::Sawmill,
        BuildingKind::Masonry,
        BuildingKind::Foundry,
        BuildingKind::Windmill,
        BuildingKind::Barracks,
        BuildingKind::Stable,
        BuildingKind::Blacksmith,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingCategory {
    Civil,
    Extraction,
    Industry,
    Military,
}

/// Recruitable unit kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Lancer,
    Archer,
    Knight,
}

impl UnitKind {
    pub const ALL: [UnitKind; 3] = [UnitKind::Lancer, UnitKind::Archer, UnitKind::Knight];
}

/// Tax pressure schedule, from exempt to extortionate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxLevel {
    None,
    Low,
    Normal,
    High,
    Extortion,
}

impl TaxLevel {
    /// Gold collected per population per minute
    pub fn gold_per_pop(&self) -> f64 {
        match self {
            TaxLevel::None => 0.0,
            TaxLevel::Low => 0.2,
            TaxLevel::Normal => 0.5,
            TaxLevel::High => 1.2,
            TaxLevel::Extortion => 2.5,
        }
    }

    /// Additive happiness change per tick
    pub fn happiness_change(&self) -> f32 {
        match self {
            TaxLevel::None => 2.0,
            TaxLevel::Low => 0.5,
            TaxLevel::Normal => -0.5,
            TaxLevel::High => -2.0,
            TaxLevel::Extortion => -5.0,
        }
    }
}

/// Mutually-independent policy toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyKind {
    Rationing,
    ForcedLabor,
    Festivals,
    MilitaryTraining,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::Rationing,
        PolicyKind::ForcedLabor,
        PolicyKind::Festivals,
        PolicyKind::MilitaryTraining,
    ];
}

/// Terrain flavor of an external settlement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Forest,
    Mountain,
    Plains,
    Swamp,
    Desert,
}

impl Biome {
    pub const ALL: [Biome; 5] = [
        Biome::Forest,
        Biome::Mountain,
        Biome::Plains,
        Biome::Swamp,
        Biome::Desert,
    ];
}

/// Relationship classification for a neighbor
///
/// `War` and `Vassal` are absorbing: the periodic score-based classifier
/// never overwrites them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationStatus {
    War,
    Hostile,
    Neutral,
    Friendly,
    Ally,
    Vassal,
}

impl RelationStatus {
    pub fn is_absorbing(&self) -> bool {
        matches!(self, RelationStatus::War | RelationStatus::Vassal)
    }
}

/// Selectable military posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmyStance {
    Defensive,
    Balanced,
    Aggressive,
}

impl ArmyStance {
    /// Fixed multiplier applied to computed combat power
    pub fn power_multiplier(&self) -> f64 {
        match self {
            ArmyStance::Defensive => 1.0,
            ArmyStance::Balanced => 1.0,
            ArmyStance::Aggressive => 1.2,
        }
    }
}

/// Espionage-derived knowledge tier about a neighbor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum IntelLevel {
    None,
    Basic,
    Full,
}
