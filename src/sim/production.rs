//! Production & logistics - extraction, conversion, trade flows, and upkeep
//!
//! One pass per tick in a fixed order: extraction, factory conversion,
//! trade-route flows, gold income, upkeep, then floors and storage clamps.
//! Factories run all-or-nothing batches: short input or a full output store
//! means the whole batch is skipped, never split.
//!
//! Every delta is accumulated into a net-production map for observability;
//! that record is not authoritative state.

use ahash::AHashMap;
use tracing::trace;

use crate::catalog::buildings::{
    FactoryRecipe, EXTRACTORS, FACTORIES, MARKET_GOLD_RATE, TOWN_CENTER_GOLD_RATE,
};
use crate::catalog::prices::base_price;
use crate::catalog::techs::TechId;
use crate::catalog::units;
use crate::core::config::SimConfig;
use crate::core::types::{BuildingKind, PolicyKind, ResourceKind, UnitKind};
use crate::state::WorldState;

fn track(report: &mut AHashMap<ResourceKind, f64>, kind: ResourceKind, delta: f64) {
    *report.entry(kind).or_insert(0.0) += delta;
}

/// Advance the whole resource economy one tick, returning net deltas
pub fn tick_production(
    state: &mut WorldState,
    config: &SimConfig,
) -> AHashMap<ResourceKind, f64> {
    let mut report = AHashMap::new();
    let cap = state.max_storage(config);
    let labor_multiplier = if state.has_policy(PolicyKind::ForcedLabor) { 1.2 } else { 1.0 };

    run_extraction(state, cap, labor_multiplier, &mut report);
    run_factories(state, cap, labor_multiplier, &mut report);
    run_trade_routes(state, config, cap, &mut report);
    collect_income(state, config, &mut report);
    pay_upkeep(state, config, &mut report);

    // Floors and caps: negative balances never persist, and excess
    // production above the storage cap is silently discarded.
    state.ledger.clamp_all(cap);

    report
}

fn extraction_bonus(state: &WorldState, resource: ResourceKind) -> f64 {
    match resource {
        ResourceKind::Wheat => state.wheat_bonus(),
        ResourceKind::RawStone | ResourceKind::IronOre => state.mining_bonus(),
        _ => 0.0,
    }
}

fn run_extraction(
    state: &mut WorldState,
    cap: f64,
    labor_multiplier: f64,
    report: &mut AHashMap<ResourceKind, f64>,
) {
    for (building, resource, rate) in EXTRACTORS {
        let level = state.building_level(building);
        if level == 0 {
            continue;
        }
        let bonus = extraction_bonus(state, resource);
        let output = rate * level as f64 * (labor_multiplier + bonus);
        if state.ledger.get(resource) < cap {
            state.ledger.add(resource, output);
            track(report, resource, output);
            trace!(?building, ?resource, output, "extracted");
        }
    }
}

fn factory_bonus(state: &WorldState, recipe: &FactoryRecipe) -> f64 {
    match recipe.output {
        ResourceKind::Bread => state.bread_bonus(),
        _ => 0.0,
    }
}

fn run_factories(
    state: &mut WorldState,
    cap: f64,
    labor_multiplier: f64,
    report: &mut AHashMap<ResourceKind, f64>,
) {
    for recipe in FACTORIES {
        let level = state.building_level(recipe.building);
        if level == 0 {
            continue;
        }
        let input_needed = recipe.input_rate * level as f64 * labor_multiplier;
        let output = recipe.output_rate * level as f64 * (labor_multiplier + factory_bonus(state, &recipe));

        // Full batch or nothing: both input stock and output headroom required
        if state.ledger.get(recipe.input) >= input_needed && state.ledger.get(recipe.output) < cap {
            state.ledger.deduct(recipe.input, input_needed);
            state.ledger.add(recipe.output, output);
            track(report, recipe.input, -input_needed);
            track(report, recipe.output, output);
            trace!(building = ?recipe.building, output, "converted");
        }
    }
}

fn run_trade_routes(
    state: &mut WorldState,
    config: &SimConfig,
    cap: f64,
    report: &mut AHashMap<ResourceKind, f64>,
) {
    let guild_bonus = state.guild_bonus();

    // Snapshot flow configs first; routes read neighbors while the ledger
    // is being mutated.
    let flows: Vec<(Option<ResourceKind>, Option<ResourceKind>)> = state
        .neighbors
        .iter()
        .filter(|n| n.trade_route_active && !n.is_at_war())
        .map(|n| (n.trade_config.import_res, n.trade_config.export_res))
        .collect();

    let mut route_income = 0.0;
    for (import_res, export_res) in flows {
        // Tariff income per open route
        route_income += config.route_base_income + guild_bonus;

        // Import: spend gold for one unit, best-effort
        if let Some(resource) = import_res {
            let cost = base_price(resource) * config.import_markup;
            if state.ledger.gold() >= cost && state.ledger.get(resource) < cap {
                state.ledger.deduct(ResourceKind::Gold, cost);
                state.ledger.add(resource, 1.0);
                track(report, ResourceKind::Gold, -cost);
                track(report, resource, 1.0);
            }
        }

        // Export: sell one unit wholesale, best-effort
        if let Some(resource) = export_res {
            let price = base_price(resource) * config.export_markdown;
            if state.ledger.get(resource) >= 1.0 {
                state.ledger.deduct(resource, 1.0);
                state.ledger.add(ResourceKind::Gold, price);
                track(report, resource, -1.0);
                track(report, ResourceKind::Gold, price);
            }
        }
    }

    state.ledger.add(ResourceKind::Gold, route_income);
    track(report, ResourceKind::Gold, route_income);
}

fn collect_income(
    state: &mut WorldState,
    _config: &SimConfig,
    report: &mut AHashMap<ResourceKind, f64>,
) {
    let town_center_gold =
        state.building_level(BuildingKind::TownCenter) as f64 * TOWN_CENTER_GOLD_RATE;
    let market_gold =
        state.building_level(BuildingKind::Market) as f64 * (MARKET_GOLD_RATE + state.guild_bonus());
    // Tax rates are per minute; one tick is a sixtieth
    let tax_gold =
        state.population as f64 * (state.tax_level.gold_per_pop() / 60.0) * state.tax_efficiency();

    let income = town_center_gold + market_gold + tax_gold;
    state.ledger.add(ResourceKind::Gold, income);
    track(report, ResourceKind::Gold, income);

    if state.has_policy(PolicyKind::Festivals) {
        let festival_cost = state.population as f64 / 60.0;
        state.ledger.deduct(ResourceKind::Gold, festival_cost);
        track(report, ResourceKind::Gold, -festival_cost);
    }
}

fn pay_upkeep(
    state: &mut WorldState,
    config: &SimConfig,
    report: &mut AHashMap<ResourceKind, f64>,
) {
    // Civilian bread, halved under rationing
    let mut bread_consumed = state.population as f64 * config.bread_per_pop;
    if state.has_policy(PolicyKind::Rationing) {
        bread_consumed *= 0.5;
    }

    // Military wages and rations, per-minute rates spread over ticks
    let mut upkeep_multiplier =
        if state.has_policy(PolicyKind::MilitaryTraining) { 1.5 } else { 1.0 };
    if state.has_tech(TechId::StandingArmy) {
        upkeep_multiplier *= 0.9;
    }

    let (mut upkeep_gold, mut upkeep_bread) = (0.0, 0.0);
    for kind in UnitKind::ALL {
        let count = state.troop_count(kind) as f64;
        let stats = units::stats(kind);
        upkeep_gold += count * stats.upkeep_gold;
        upkeep_bread += count * stats.upkeep_bread;
    }
    upkeep_gold = upkeep_gold / 60.0 * upkeep_multiplier;
    upkeep_bread /= 60.0;

    state.ledger.deduct(ResourceKind::Bread, bread_consumed + upkeep_bread);
    state.ledger.deduct(ResourceKind::Gold, upkeep_gold);
    track(report, ResourceKind::Bread, -(bread_consumed + upkeep_bread));
    track(report, ResourceKind::Gold, -upkeep_gold);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> (WorldState, SimConfig) {
        (WorldState::new(17), SimConfig::default())
    }

    #[test]
    fn test_extraction_produces_raw_goods() {
        let (mut state, config) = fresh();
        // Starting settlement: lumber camp 1, farm 1
        tick_production(&mut state, &config);
        assert_eq!(state.ledger.get(ResourceKind::RawWood), 12.0);
        assert_eq!(state.ledger.get(ResourceKind::Wheat), 15.0);
        assert_eq!(state.ledger.get(ResourceKind::RawStone), 0.0);
    }

    #[test]
    fn test_factory_skips_short_input_batch() {
        let (mut state, config) = fresh();
        state.buildings.insert(BuildingKind::LumberCamp, 0);
        state.buildings.insert(BuildingKind::Farm, 0);
        state.buildings.insert(BuildingKind::Sawmill, 1);
        // Sawmill needs 12 raw wood; 5 is not enough for the batch
        state.ledger.set(ResourceKind::RawWood, 5.0);

        let report = tick_production(&mut state, &config);
        assert_eq!(state.ledger.get(ResourceKind::RawWood), 5.0, "input must not be consumed");
        assert_eq!(state.ledger.get(ResourceKind::Planks), 200.0, "no partial batch output");
        assert!(!report.contains_key(&ResourceKind::Planks));
    }

    #[test]
    fn test_factory_converts_full_batch() {
        let (mut state, config) = fresh();
        state.buildings.insert(BuildingKind::LumberCamp, 0);
        state.buildings.insert(BuildingKind::Sawmill, 1);
        state.ledger.set(ResourceKind::RawWood, 20.0);
        state.ledger.set(ResourceKind::Planks, 0.0);

        tick_production(&mut state, &config);
        assert_eq!(state.ledger.get(ResourceKind::RawWood), 8.0);
        assert_eq!(state.ledger.get(ResourceKind::Planks), 10.0);
    }

    #[test]
    fn test_factory_blocked_by_full_output_store() {
        let (mut state, config) = fresh();
        state.buildings.insert(BuildingKind::LumberCamp, 0);
        state.buildings.insert(BuildingKind::Sawmill, 1);
        state.ledger.set(ResourceKind::RawWood, 100.0);
        state.ledger.set(ResourceKind::Planks, state.max_storage(&config));

        tick_production(&mut state, &config);
        assert_eq!(state.ledger.get(ResourceKind::RawWood), 100.0);
    }

    #[test]
    fn test_rationing_halves_bread_consumption() {
        let (mut state_a, config) = fresh();
        let mut state_b = WorldState::new(17);
        state_b.policies.insert(PolicyKind::Rationing);
        // Remove farms so no wheat/bread production interferes
        for state in [&mut state_a, &mut state_b] {
            state.buildings.insert(BuildingKind::Farm, 0);
            state.buildings.insert(BuildingKind::LumberCamp, 0);
        }

        tick_production(&mut state_a, &config);
        tick_production(&mut state_b, &config);

        let eaten_a = 300.0 - state_a.ledger.get(ResourceKind::Bread);
        let eaten_b = 300.0 - state_b.ledger.get(ResourceKind::Bread);
        assert!((eaten_a - 2.0 * eaten_b).abs() < 1e-9, "rationing must halve consumption");
    }

    #[test]
    fn test_gold_and_bread_never_go_negative() {
        let (mut state, config) = fresh();
        state.ledger.set(ResourceKind::Gold, 0.0);
        state.ledger.set(ResourceKind::Bread, 0.1);
        state.population = 100.0;
        state.troops.insert(UnitKind::Knight, 50);

        tick_production(&mut state, &config);
        assert!(state.ledger.gold() >= 0.0);
        assert!(state.ledger.get(ResourceKind::Bread) >= 0.0);
    }

    #[test]
    fn test_storage_cap_discards_excess() {
        let (mut state, config) = fresh();
        let cap = state.max_storage(&config);
        state.ledger.set(ResourceKind::RawWood, cap - 1.0);

        tick_production(&mut state, &config);
        assert_eq!(state.ledger.get(ResourceKind::RawWood), cap);
    }

    #[test]
    fn test_route_flows_are_best_effort() {
        let (mut state, config) = fresh();
        let resource = ResourceKind::Blocks;
        state.neighbors[0].trade_route_active = true;
        state.neighbors[0].trade_config.import_res = Some(resource);
        state.neighbors[0].trade_config.export_res = Some(ResourceKind::IronIngots);
        state.buildings.insert(BuildingKind::Farm, 0);
        state.buildings.insert(BuildingKind::LumberCamp, 0);
        // No ingots in stock: export silently skipped, import proceeds
        state.ledger.set(ResourceKind::IronIngots, 0.0);

        let gold_before = state.ledger.gold();
        tick_production(&mut state, &config);
        assert_eq!(state.ledger.get(resource), 1.0);
        assert_eq!(state.ledger.get(ResourceKind::IronIngots), 0.0);

        // Route income 1, town center 10, import cost 9 (blocks 6 * 1.5),
        // taxes and upkeep adjust the rest; just assert gold moved sanely
        assert!(state.ledger.gold() > gold_before - 10.0);
    }

    #[test]
    fn test_war_blocks_route_flows() {
        let (mut state, config) = fresh();
        state.neighbors[0].trade_route_active = true;
        state.neighbors[0].trade_config.import_res = Some(ResourceKind::Blocks);
        state.neighbors[0].relation_status = crate::core::types::RelationStatus::War;

        tick_production(&mut state, &config);
        assert_eq!(state.ledger.get(ResourceKind::Blocks), 0.0);
    }

    #[test]
    fn test_forced_labor_boosts_output() {
        let (mut state, config) = fresh();
        let mut boosted = WorldState::new(17);
        boosted.policies.insert(PolicyKind::ForcedLabor);

        tick_production(&mut state, &config);
        tick_production(&mut boosted, &config);

        let plain = state.ledger.get(ResourceKind::RawWood);
        let pushed = boosted.ledger.get(ResourceKind::RawWood);
        assert!((pushed - plain * 1.2).abs() < 1e-9);
    }
}
