//! World state - the authoritative snapshot of all simulated quantities
//!
//! One mutable aggregate owned by the engine. Subsystems borrow it for the
//! duration of a tick and must leave every invariant intact. Derived values
//! (storage cap, housing, military power) are recomputed from base state on
//! access, never cached.

pub mod ledger;
pub mod neighbor;

use ahash::{AHashMap, AHashSet};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::buildings::starting_level;
use crate::catalog::prices::base_price;
use crate::catalog::techs::TechId;
use crate::combat::PendingAttack;
use crate::core::config::SimConfig;
use crate::core::types::{
    ArmyStance, BuildingKind, NeighborId, PolicyKind, ResourceKind, TaxLevel, Tick, UnitKind,
};
use ledger::ResourceLedger;
use neighbor::{generate_roster, Neighbor};

/// Direction of the last periodic price move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceTrend {
    Up,
    Down,
    Stable,
}

/// Market quote for one non-currency resource
///
/// Invariant: `current_buy > current_sell` (the spread models transaction
/// cost). Both are recomputed periodically from scarcity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketPrice {
    pub base: f64,
    pub current_buy: f64,
    pub current_sell: f64,
    pub trend: PriceTrend,
}

/// The single in-progress research project, if any
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveResearch {
    pub tech: TechId,
    /// Whole ticks of progress, `0..=duration`
    pub progress: u32,
    pub paused: bool,
}

/// Forge upgrade levels applied to the whole army
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ArmyUpgrades {
    pub weapons: u32,
    pub armor: u32,
}

fn detached_rng() -> ChaCha8Rng {
    // Snapshots don't carry the rng stream; a restored world reseeds
    ChaCha8Rng::seed_from_u64(0)
}

/// Everything the simulation knows about the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub tick: Tick,

    pub ledger: ResourceLedger,
    pub buildings: AHashMap<BuildingKind, u32>,
    pub troops: AHashMap<UnitKind, u32>,

    /// Fractional growth accumulates; display truncates
    pub population: f32,
    /// Clamped to [0, 100] every tick
    pub happiness: f32,
    pub tax_level: TaxLevel,
    pub policies: AHashSet<PolicyKind>,

    pub research_points: f64,
    /// Grow-only: ids are never removed
    pub unlocked_techs: AHashSet<TechId>,
    pub active_research: Option<ActiveResearch>,

    pub army_stance: ArmyStance,
    pub army_upgrades: ArmyUpgrades,

    pub market_prices: AHashMap<ResourceKind, MarketPrice>,
    pub neighbors: Vec<Neighbor>,
    /// Deferred combat resolutions, consumed by the tick pipeline
    pub pending_attacks: Vec<PendingAttack>,

    #[serde(skip, default = "detached_rng")]
    pub rng: ChaCha8Rng,
}

impl WorldState {
    /// Found the initial settlement: a town center, a house, a lumber camp
    /// and a farm, five villagers, and a small stock of planks, bread, gold.
    pub fn new(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut ledger = ResourceLedger::new();
        ledger.set(ResourceKind::Planks, 200.0);
        ledger.set(ResourceKind::Bread, 300.0);
        ledger.set(ResourceKind::Gold, 150.0);

        let mut buildings = AHashMap::new();
        for kind in BuildingKind::ALL {
            buildings.insert(kind, starting_level(kind));
        }

        let mut troops = AHashMap::new();
        for kind in UnitKind::ALL {
            troops.insert(kind, 0);
        }

        let mut market_prices = AHashMap::new();
        for kind in ResourceKind::TRADEABLE {
            let base = base_price(kind);
            market_prices.insert(
                kind,
                MarketPrice {
                    base,
                    current_buy: base * 1.2,
                    current_sell: base * 0.8,
                    trend: PriceTrend::Stable,
                },
            );
        }

        let neighbors = generate_roster(&mut rng);

        Self {
            tick: 0,
            ledger,
            buildings,
            troops,
            population: 5.0,
            happiness: 100.0,
            tax_level: TaxLevel::Normal,
            policies: AHashSet::new(),
            research_points: 0.0,
            unlocked_techs: AHashSet::new(),
            active_research: None,
            army_stance: ArmyStance::Balanced,
            army_upgrades: ArmyUpgrades::default(),
            market_prices,
            neighbors,
            pending_attacks: Vec::new(),
            rng,
        }
    }

    // === Derived values (pure functions of base state) ===

    pub fn building_level(&self, kind: BuildingKind) -> u32 {
        self.buildings.get(&kind).copied().unwrap_or(0)
    }

    pub fn troop_count(&self, kind: UnitKind) -> u32 {
        self.troops.get(&kind).copied().unwrap_or(0)
    }

    pub fn has_tech(&self, tech: TechId) -> bool {
        self.unlocked_techs.contains(&tech)
    }

    pub fn has_policy(&self, policy: PolicyKind) -> bool {
        self.policies.contains(&policy)
    }

    /// Storage cap applied to every non-currency resource
    pub fn max_storage(&self, config: &SimConfig) -> f64 {
        config.base_storage
            + self.building_level(BuildingKind::Warehouse) as f64 * config.storage_per_warehouse
    }

    /// Housing capacity; urban planning fits two more villagers per house
    pub fn max_population(&self, config: &SimConfig) -> f32 {
        let house_bonus = if self.has_tech(TechId::UrbanPlanning) { 2.0 } else { 0.0 };
        self.building_level(BuildingKind::House) as f32 * (config.house_capacity + house_bonus)
            + self.building_level(BuildingKind::TownCenter) as f32 * config.town_center_capacity
    }

    pub fn neighbor(&self, id: NeighborId) -> Option<&Neighbor> {
        self.neighbors.iter().find(|n| n.id == id)
    }

    pub fn neighbor_mut(&mut self, id: NeighborId) -> Option<&mut Neighbor> {
        self.neighbors.iter_mut().find(|n| n.id == id)
    }

    // === Technology bonuses read as multipliers by the subsystems ===

    /// Additive wheat-extraction bonus from agronomy techs
    pub fn wheat_bonus(&self) -> f64 {
        let mut bonus = 0.0;
        if self.has_tech(TechId::CropRotation) {
            bonus += 0.2;
        }
        if self.has_tech(TechId::HeavyPlough) {
            bonus += 0.3;
        }
        bonus
    }

    /// Additive stone/ore-extraction bonus
    pub fn mining_bonus(&self) -> f64 {
        if self.has_tech(TechId::DeepMining) { 0.2 } else { 0.0 }
    }

    /// Additive windmill-output bonus
    pub fn bread_bonus(&self) -> f64 {
        if self.has_tech(TechId::HeavyPlough) { 0.3 } else { 0.0 }
    }

    /// Flat extra gold on markets and trade routes
    pub fn guild_bonus(&self) -> f64 {
        if self.has_tech(TechId::TradeGuilds) { 2.0 } else { 0.0 }
    }

    /// Tax collection efficiency factor
    pub fn tax_efficiency(&self) -> f64 {
        if self.has_tech(TechId::FeudalCode) { 1.1 } else { 1.0 }
    }
}
