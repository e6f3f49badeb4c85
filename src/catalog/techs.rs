//! Technology tree: a closed set of identifiers with a static definition table
//!
//! Effects are not stored on the definitions; each subsystem queries the
//! unlocked set for the techs it cares about (see the `bonus_*` helpers on
//! `WorldState`), so adding a tech is a compile-time-checked change.

use serde::{Deserialize, Serialize};

use crate::core::types::BuildingKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechId {
    // Economy
    CropRotation,
    HeavyPlough,
    TradeGuilds,
    DeepMining,
    // Military
    IronWeapons,
    StandingArmy,
    StoneWalls,
    // Civil
    UrbanPlanning,
    Sanitation,
    FeudalCode,
}

impl TechId {
    pub const ALL: [TechId; 10] = [
        TechId::CropRotation,
        TechId::HeavyPlough,
        TechId::TradeGuilds,
        TechId::DeepMining,
        TechId::IronWeapons,
        TechId::StandingArmy,
        TechId::StoneWalls,
        TechId::UrbanPlanning,
        TechId::Sanitation,
        TechId::FeudalCode,
    ];

    pub fn def(&self) -> &'static TechDef {
        use TechId::*;
        match self {
            CropRotation => &CROP_ROTATION,
            HeavyPlough => &HEAVY_PLOUGH,
            TradeGuilds => &TRADE_GUILDS,
            DeepMining => &DEEP_MINING,
            IronWeapons => &IRON_WEAPONS,
            StandingArmy => &STANDING_ARMY,
            StoneWalls => &STONE_WALLS,
            UrbanPlanning => &URBAN_PLANNING,
            Sanitation => &SANITATION,
            FeudalCode => &FEUDAL_CODE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechCategory {
    Economy,
    Military,
    Civil,
}

/// Static definition of one technology
#[derive(Debug)]
pub struct TechDef {
    pub category: TechCategory,
    /// Research points consumed when starting
    pub cost: f64,
    /// Gold consumed when starting
    pub gold_cost: f64,
    /// Ticks of active research until completion
    pub duration: u32,
    /// Technologies that must already be unlocked
    pub required_techs: &'static [TechId],
    /// Minimum building levels that must exist
    pub required_buildings: &'static [(BuildingKind, u32)],
}

static CROP_ROTATION: TechDef = TechDef {
    category: TechCategory::Economy,
    cost: 50.0,
    gold_cost: 20.0,
    duration: 30,
    required_techs: &[],
    required_buildings: &[(BuildingKind::Farm, 1)],
};

static HEAVY_PLOUGH: TechDef = TechDef {
    category: TechCategory::Economy,
    cost: 150.0,
    gold_cost: 100.0,
    duration: 60,
    required_techs: &[TechId::CropRotation],
    required_buildings: &[(BuildingKind::Blacksmith, 1)],
};

static TRADE_GUILDS: TechDef = TechDef {
    category: TechCategory::Economy,
    cost: 200.0,
    gold_cost: 150.0,
    duration: 90,
    required_techs: &[],
    required_buildings: &[(BuildingKind::Market, 1)],
};

static DEEP_MINING: TechDef = TechDef {
    category: TechCategory::Economy,
    cost: 100.0,
    gold_cost: 50.0,
    duration: 45,
    required_techs: &[],
    required_buildings: &[(BuildingKind::IronMine, 1)],
};

static IRON_WEAPONS: TechDef = TechDef {
    category: TechCategory::Military,
    cost: 80.0,
    gold_cost: 50.0,
    duration: 40,
    required_techs: &[],
    required_buildings: &[(BuildingKind::Barracks, 1)],
};

static STANDING_ARMY: TechDef = TechDef {
    category: TechCategory::Military,
    cost: 200.0,
    gold_cost: 200.0,
    duration: 100,
    required_techs: &[TechId::IronWeapons],
    required_buildings: &[(BuildingKind::Barracks, 2)],
};

static STONE_WALLS: TechDef = TechDef {
    category: TechCategory::Military,
    cost: 150.0,
    gold_cost: 100.0,
    duration: 60,
    required_techs: &[],
    required_buildings: &[(BuildingKind::Wall, 1)],
};

static URBAN_PLANNING: TechDef = TechDef {
    category: TechCategory::Civil,
    cost: 60.0,
    gold_cost: 30.0,
    duration: 30,
    required_techs: &[],
    required_buildings: &[(BuildingKind::TownCenter, 1)],
};

static SANITATION: TechDef = TechDef {
    category: TechCategory::Civil,
    cost: 120.0,
    gold_cost: 80.0,
    duration: 50,
    required_techs: &[TechId::UrbanPlanning],
    required_buildings: &[],
};

static FEUDAL_CODE: TechDef = TechDef {
    category: TechCategory::Civil,
    cost: 250.0,
    gold_cost: 150.0,
    duration: 120,
    required_techs: &[],
    required_buildings: &[(BuildingKind::TownCenter, 2)],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_lists_every_tech_once() {
        assert_eq!(TechId::ALL.len(), 10);
        for (i, a) in TechId::ALL.iter().enumerate() {
            for b in &TechId::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_prerequisite_chains_stay_inside_the_set() {
        for tech in TechId::ALL {
            for req in tech.def().required_techs {
                assert!(TechId::ALL.contains(req), "{tech:?} requires unknown {req:?}");
            }
        }
    }

    #[test]
    fn test_durations_are_positive() {
        for tech in TechId::ALL {
            assert!(tech.def().duration > 0, "{tech:?} would complete instantly");
        }
    }
}
