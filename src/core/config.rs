//! Simulation configuration with documented constants
//!
//! All tuning numbers are collected here with explanations of their purpose
//! and how they interact with each other. The driver can override them from
//! a TOML file; the engine itself never reads the environment.

use serde::Deserialize;

/// Configuration for the simulation systems
///
/// These values have been tuned to produce a playable pacing at one tick per
/// second. Changing them shifts the economy's equilibrium points.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === ECONOMY ===
    /// Bread eaten per population point per tick
    ///
    /// At 0.5, ten villagers consume 5 bread/tick; a single windmill at
    /// level 1 (10 bread/tick) feeds twenty.
    pub bread_per_pop: f64,

    /// Geometric scaling applied to building costs per existing level
    pub cost_scaling_factor: f64,

    /// Geometric scaling applied to army forge upgrades per existing level
    pub upgrade_cost_scaling: f64,

    /// Storage available before any warehouse is built
    pub base_storage: f64,

    /// Additional storage per warehouse level
    pub storage_per_warehouse: f64,

    // === POPULATION ===
    /// Base probability of +1 population on a tick where food and housing allow
    pub base_population_growth: f64,

    /// Population never drops below this once the settlement is founded
    pub min_population: f32,

    /// Housing provided per house level (urban planning adds to this)
    pub house_capacity: f32,

    /// Housing provided per town-center level
    pub town_center_capacity: f32,

    // === HAPPINESS ===
    /// Happiness lost per tick while bread stock is empty
    pub starvation_penalty: f32,

    /// Happiness lost per tick while population exceeds housing
    pub overcrowding_penalty: f32,

    /// Step by which happiness drifts toward 50 when no modifier applies
    pub happiness_drift_step: f32,

    // === MARKET ===
    /// Ticks between scarcity-driven price recomputes
    ///
    /// Prices are deliberately sticky: manual trades nudge them immediately,
    /// but the scarcity model only re-anchors on this period.
    pub market_interval: u64,

    /// Lower bound for sell prices after manual-trade decrements
    pub sell_price_floor: f64,

    // === RESEARCH ===
    /// Research points accrued per tick before building bonuses
    pub base_research_rate: f64,

    /// Gold cost of one research acceleration
    pub research_rush_cost: f64,

    /// Progress ticks granted by one acceleration (clamped to duration)
    pub research_rush_progress: u32,

    // === DIPLOMACY & TRADE ROUTES ===
    /// Ticks between relationship decay / reclassification passes
    pub diplomacy_interval: u64,

    /// Step by which relation scores decay toward zero each pass
    pub relation_decay_step: f64,

    /// Military power a peaceful neighbor gains each pass
    pub neighbor_power_growth: f64,

    /// Power-growth multiplier for neighbors at war (mobilization)
    pub wartime_mobilization_factor: f64,

    /// One-time gold cost to open a trade route (closing is free)
    pub trade_route_cost: f64,

    /// Flat gold income per active route per tick
    pub route_base_income: f64,

    /// Markup over base price paid for route imports
    pub import_markup: f64,

    /// Markdown under base price received for route exports
    pub export_markdown: f64,

    /// Gold cost of a diplomatic gift
    pub gift_cost: f64,

    /// Relation score gained by a gift
    pub gift_relation_boost: f64,

    /// Relation score lost by an insult
    pub insult_relation_penalty: f64,

    // === ESPIONAGE ===
    /// Gold cost of sending spies
    pub spy_cost: f64,

    /// Chance that spies are caught, penalizing relations instead
    pub scout_failure_chance: f64,

    /// Relation score lost when spies are caught
    pub scout_failure_penalty: f64,

    // === COMBAT ===
    /// Flat defensive power per wall level (before technology)
    pub wall_defense_bonus: f64,

    /// Ticks between ordering an attack and its resolution (travel time)
    pub attack_travel_ticks: u64,

    /// Fraction of the target's wealth plundered by a successful raid
    pub raid_plunder_fraction: f64,

    /// Fraction of every troop kind lost after a defeat
    pub defeat_loss_fraction: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            // Economy
            bread_per_pop: 0.5,
            cost_scaling_factor: 1.25,
            upgrade_cost_scaling: 1.5,
            base_storage: 500.0,
            storage_per_warehouse: 1000.0,

            // Population
            base_population_growth: 0.1,
            min_population: 2.0,
            house_capacity: 5.0,
            town_center_capacity: 10.0,

            // Happiness
            starvation_penalty: 10.0,
            overcrowding_penalty: 5.0,
            happiness_drift_step: 0.5,

            // Market
            market_interval: 60,
            sell_price_floor: 0.1,

            // Research
            base_research_rate: 1.0,
            research_rush_cost: 100.0,
            research_rush_progress: 15,

            // Diplomacy
            diplomacy_interval: 60,
            relation_decay_step: 0.5,
            neighbor_power_growth: 1.0,
            wartime_mobilization_factor: 5.0,
            trade_route_cost: 200.0,
            route_base_income: 1.0,
            import_markup: 1.5,
            export_markdown: 0.8,
            gift_cost: 150.0,
            gift_relation_boost: 15.0,
            insult_relation_penalty: 30.0,

            // Espionage
            spy_cost: 100.0,
            scout_failure_chance: 0.2,
            scout_failure_penalty: 20.0,

            // Combat
            wall_defense_bonus: 100.0,
            attack_travel_ticks: 2,
            raid_plunder_fraction: 0.3,
            defeat_loss_fraction: 0.3,
        }
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML override file; unspecified keys keep their defaults
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.cost_scaling_factor < 1.0 {
            return Err(format!(
                "cost_scaling_factor ({}) must be >= 1.0 or costs shrink with progress",
                self.cost_scaling_factor
            ));
        }
        if self.market_interval == 0 || self.diplomacy_interval == 0 {
            return Err("throttle intervals must be non-zero".into());
        }
        if !(0.0..=1.0).contains(&self.raid_plunder_fraction)
            || !(0.0..=1.0).contains(&self.defeat_loss_fraction)
            || !(0.0..=1.0).contains(&self.scout_failure_chance)
        {
            return Err("fractional rates must lie in [0, 1]".into());
        }
        if self.import_markup < 1.0 || self.export_markdown > 1.0 {
            return Err(format!(
                "route prices must straddle base price (markup {} markdown {})",
                self.import_markup, self.export_markdown
            ));
        }
        if self.min_population < 0.0 {
            return Err("min_population must be non-negative".into());
        }
        Ok(())
    }
}
