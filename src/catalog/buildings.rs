//! Building definitions: costs, categories, and production rates
//!
//! Costs scale geometrically with the current level. Buildings the initial
//! settlement already owns get their first purchased level at base cost, so
//! the discount exponent is offset by one for those kinds.

use crate::core::config::SimConfig;
use crate::core::types::{BuildingCategory, BuildingKind, ResourceKind};

/// Construction cost in the four build materials
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildingCost {
    pub planks: f64,
    pub blocks: f64,
    pub ingots: f64,
    pub gold: f64,
}

impl BuildingCost {
    pub const fn new(planks: f64, blocks: f64, ingots: f64, gold: f64) -> Self {
        Self { planks, blocks, ingots, gold }
    }

    pub fn as_pairs(&self) -> [(ResourceKind, f64); 4] {
        [
            (ResourceKind::Planks, self.planks),
            (ResourceKind::Blocks, self.blocks),
            (ResourceKind::IronIngots, self.ingots),
            (ResourceKind::Gold, self.gold),
        ]
    }
}

/// Base (level-zero) construction cost for a building kind
pub fn base_cost(kind: BuildingKind) -> BuildingCost {
    use BuildingKind::*;
    match kind {
        // Extraction starts cheap
        LumberCamp => BuildingCost::new(0.0, 0.0, 0.0, 10.0),
        Farm => BuildingCost::new(0.0, 0.0, 0.0, 10.0),
        Quarry => BuildingCost::new(0.0, 0.0, 0.0, 10.0),
        // Mines need wood to shore up tunnels
        IronMine => BuildingCost::new(50.0, 0.0, 0.0, 100.0),

        // Industry progression: sawmill -> masonry -> foundry
        Sawmill => BuildingCost::new(0.0, 0.0, 0.0, 100.0),
        Masonry => BuildingCost::new(50.0, 0.0, 0.0, 100.0),
        Windmill => BuildingCost::new(30.0, 10.0, 0.0, 50.0),
        Foundry => BuildingCost::new(200.0, 100.0, 0.0, 300.0),

        // Civil
        House => BuildingCost::new(20.0, 0.0, 0.0, 10.0),
        Warehouse => BuildingCost::new(100.0, 0.0, 0.0, 50.0),
        Market => BuildingCost::new(100.0, 0.0, 0.0, 100.0),
        TownCenter => BuildingCost::new(500.0, 500.0, 200.0, 1000.0),
        Cathedral => BuildingCost::new(400.0, 800.0, 100.0, 1000.0),
        Wall => BuildingCost::new(50.0, 200.0, 10.0, 50.0),

        // Military
        Barracks => BuildingCost::new(200.0, 50.0, 0.0, 150.0),
        Stable => BuildingCost::new(400.0, 100.0, 50.0, 300.0),
        Blacksmith => BuildingCost::new(300.0, 300.0, 50.0, 300.0),
    }
}

pub fn category(kind: BuildingKind) -> BuildingCategory {
    use BuildingKind::*;
    match kind {
        TownCenter | House | Warehouse | Wall | Cathedral | Market => BuildingCategory::Civil,
        LumberCamp | Quarry | IronMine | Farm => BuildingCategory::Extraction,
        Sawmill | Masonry | Foundry | Windmill => BuildingCategory::Industry,
        Barracks | Stable | Blacksmith => BuildingCategory::Military,
    }
}

/// Level the initial settlement starts with for this kind
pub fn starting_level(kind: BuildingKind) -> u32 {
    use BuildingKind::*;
    match kind {
        TownCenter | House | LumberCamp | Farm => 1,
        _ => 0,
    }
}

/// Cost of the next level given the current one
///
/// The exponent is offset by one for kinds the settlement starts with, so
/// their first player-built level still costs the base amount.
pub fn scaled_cost(kind: BuildingKind, current_level: u32, config: &SimConfig) -> BuildingCost {
    let discount = if starting_level(kind) > 0 { 1 } else { 0 };
    let exponent = current_level.saturating_sub(discount);
    let multiplier = config.cost_scaling_factor.powi(exponent as i32);
    let base = base_cost(kind);
    BuildingCost {
        planks: (base.planks * multiplier).floor(),
        blocks: (base.blocks * multiplier).floor(),
        ingots: (base.ingots * multiplier).floor(),
        gold: (base.gold * multiplier).floor(),
    }
}

/// Per-level extraction output: (building, produced resource, rate per tick)
pub const EXTRACTORS: [(BuildingKind, ResourceKind, f64); 4] = [
    (BuildingKind::LumberCamp, ResourceKind::RawWood, 12.0),
    (BuildingKind::Quarry, ResourceKind::RawStone, 10.0),
    (BuildingKind::IronMine, ResourceKind::IronOre, 8.0),
    (BuildingKind::Farm, ResourceKind::Wheat, 15.0),
];

/// A factory conversion: consumes the full input batch or does nothing
#[derive(Debug, Clone, Copy)]
pub struct FactoryRecipe {
    pub building: BuildingKind,
    pub input: ResourceKind,
    pub input_rate: f64,
    pub output: ResourceKind,
    pub output_rate: f64,
}

pub const FACTORIES: [FactoryRecipe; 4] = [
    FactoryRecipe {
        building: BuildingKind::Sawmill,
        input: ResourceKind::RawWood,
        input_rate: 12.0,
        output: ResourceKind::Planks,
        output_rate: 10.0,
    },
    FactoryRecipe {
        building: BuildingKind::Masonry,
        input: ResourceKind::RawStone,
        input_rate: 10.0,
        output: ResourceKind::Blocks,
        output_rate: 8.0,
    },
    FactoryRecipe {
        building: BuildingKind::Foundry,
        input: ResourceKind::IronOre,
        input_rate: 8.0,
        output: ResourceKind::IronIngots,
        output_rate: 5.0,
    },
    FactoryRecipe {
        building: BuildingKind::Windmill,
        input: ResourceKind::Wheat,
        input_rate: 10.0,
        output: ResourceKind::Bread,
        output_rate: 10.0,
    },
];

/// Flat gold income per town-center level per tick
pub const TOWN_CENTER_GOLD_RATE: f64 = 10.0;

/// Flat gold income per market level per tick (before guild bonus)
pub const MARKET_GOLD_RATE: f64 = 15.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_building_has_a_category() {
        // Exhaustive match in category() guarantees this; spot-check a few
        assert_eq!(category(BuildingKind::Quarry), BuildingCategory::Extraction);
        assert_eq!(category(BuildingKind::Windmill), BuildingCategory::Industry);
        assert_eq!(category(BuildingKind::Stable), BuildingCategory::Military);
        assert_eq!(category(BuildingKind::Cathedral), BuildingCategory::Civil);
    }

    #[test]
    fn test_starting_building_costs_base_at_level_zero_and_one() {
        let config = SimConfig::default();
        // House starts owned: both level 0 and level 1 cost the base amount
        let at_zero = scaled_cost(BuildingKind::House, 0, &config);
        let at_one = scaled_cost(BuildingKind::House, 1, &config);
        assert_eq!(at_zero, base_cost(BuildingKind::House));
        assert_eq!(at_one, base_cost(BuildingKind::House));
        // Level 2 is one scaling step up
        let at_two = scaled_cost(BuildingKind::House, 2, &config);
        assert_eq!(at_two.planks, (20.0 * 1.25f64).floor());
    }

    #[test]
    fn test_non_starting_building_scales_from_level_zero() {
        let config = SimConfig::default();
        let at_zero = scaled_cost(BuildingKind::Barracks, 0, &config);
        assert_eq!(at_zero, base_cost(BuildingKind::Barracks));
        let at_one = scaled_cost(BuildingKind::Barracks, 1, &config);
        assert_eq!(at_one.gold, (150.0 * 1.25f64).floor());
    }

    #[test]
    fn test_factory_recipes_cover_all_processed_goods() {
        let outputs: Vec<_> = FACTORIES.iter().map(|f| f.output).collect();
        assert!(outputs.contains(&ResourceKind::Planks));
        assert!(outputs.contains(&ResourceKind::Blocks));
        assert!(outputs.contains(&ResourceKind::IronIngots));
        assert!(outputs.contains(&ResourceKind::Bread));
    }
}
