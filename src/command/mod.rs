//! Command layer - validated, atomic mutations of the world
//!
//! Every command validates against current state first and only then
//! applies its whole effect; a rejected command leaves the world untouched
//! and surfaces a typed `CommandError`. Commands run between ticks, never
//! inside one.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{buildings, techs::TechId, units};
use crate::combat::{self, AttackMode, PendingAttack};
use crate::core::config::SimConfig;
use crate::core::error::{CommandError, Result};
use crate::core::types::{
    ArmyStance, BuildingKind, IntelLevel, NeighborId, PolicyKind, RelationStatus, ResourceKind,
    TaxLevel, UnitKind,
};
use crate::sim::events::EngineEvent;
use crate::sim::market;
use crate::state::WorldState;

/// Which army-wide forge track to improve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeKind {
    Weapons,
    Armor,
}

/// Which half of a trade route a resource is assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteSlot {
    Import,
    Export,
}

/// Everything a player (or script) can ask the engine to do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Construct(BuildingKind),
    Recruit(UnitKind),
    Dismiss(UnitKind),
    ForgeUpgrade(UpgradeKind),

    SetTaxLevel(TaxLevel),
    TogglePolicy(PolicyKind),
    SetStance(ArmyStance),

    StartResearch(TechId),
    PauseResearch,
    ResumeResearch,
    AccelerateResearch,
    CancelResearch,

    Buy { resource: ResourceKind, amount: f64 },
    Sell { resource: ResourceKind, amount: f64 },

    ConfigureRoute { neighbor: NeighborId, slot: RouteSlot, resource: Option<ResourceKind> },
    ToggleRoute(NeighborId),
    Gift(NeighborId),
    Insult(NeighborId),
    DeclareWar(NeighborId),
    Scout(NeighborId),
    Attack { neighbor: NeighborId, mode: AttackMode },
}

/// Validate and apply one command
pub fn execute(
    state: &mut WorldState,
    config: &SimConfig,
    command: Command,
) -> Result<Vec<EngineEvent>> {
    match command {
        Command::Construct(kind) => construct(state, config, kind),
        Command::Recruit(kind) => recruit(state, config, kind),
        Command::Dismiss(kind) => dismiss(state, config, kind),
        Command::ForgeUpgrade(track) => forge_upgrade(state, config, track),

        Command::SetTaxLevel(level) => {
            state.tax_level = level;
            Ok(Vec::new())
        }
        Command::TogglePolicy(policy) => {
            if !state.policies.remove(&policy) {
                state.policies.insert(policy);
            }
            Ok(Vec::new())
        }
        Command::SetStance(stance) => {
            state.army_stance = stance;
            Ok(Vec::new())
        }

        Command::StartResearch(tech) => start_research(state, tech),
        Command::PauseResearch => set_research_paused(state, true),
        Command::ResumeResearch => set_research_paused(state, false),
        Command::AccelerateResearch => accelerate_research(state, config),
        Command::CancelResearch => cancel_research(state),

        Command::Buy { resource, amount } => buy(state, config, resource, amount),
        Command::Sell { resource, amount } => sell(state, config, resource, amount),

        Command::ConfigureRoute { neighbor, slot, resource } => {
            configure_route(state, neighbor, slot, resource)
        }
        Command::ToggleRoute(neighbor) => toggle_route(state, config, neighbor),
        Command::Gift(neighbor) => gift(state, config, neighbor),
        Command::Insult(neighbor) => insult(state, config, neighbor),
        Command::DeclareWar(neighbor) => declare_war(state, neighbor),
        Command::Scout(neighbor) => scout(state, config, neighbor),
        Command::Attack { neighbor, mode } => attack(state, config, neighbor, mode),
    }
}

// === Construction and recruitment ===

fn construct(state: &mut WorldState, config: &SimConfig, kind: BuildingKind) -> Result<Vec<EngineEvent>> {
    let level = state.building_level(kind);
    let cost = buildings::scaled_cost(kind, level, config);
    if !state.ledger.pay(&cost.as_pairs()) {
        return Err(CommandError::InsufficientResources);
    }
    state.buildings.insert(kind, level + 1);
    info!(?kind, level = level + 1, "construction finished");
    Ok(Vec::new())
}

fn recruit(state: &mut WorldState, config: &SimConfig, kind: UnitKind) -> Result<Vec<EngineEvent>> {
    if state.building_level(BuildingKind::Barracks) == 0 {
        return Err(CommandError::MissingPrerequisiteBuilding);
    }
    if kind == UnitKind::Knight && state.building_level(BuildingKind::Stable) == 0 {
        return Err(CommandError::MissingPrerequisiteBuilding);
    }

    let cost = units::discounted_cost(kind, state.building_level(BuildingKind::Blacksmith));
    // Drafting must leave the survivor floor intact
    if state.population < cost.pop + config.min_population {
        return Err(CommandError::InsufficientPopulation);
    }
    if !state.ledger.pay(&cost.as_pairs()) {
        return Err(CommandError::InsufficientResources);
    }

    state.population -= cost.pop;
    *state.troops.entry(kind).or_insert(0) += 1;
    info!(?kind, "recruited");
    Ok(Vec::new())
}

fn dismiss(state: &mut WorldState, config: &SimConfig, kind: UnitKind) -> Result<Vec<EngineEvent>> {
    let count = state.troop_count(kind);
    if count == 0 {
        return Err(CommandError::InsufficientResources);
    }
    state.troops.insert(kind, count - 1);
    // One villager returns to civilian life, housing permitting
    state.population = (state.population + 1.0).min(state.max_population(config));
    Ok(Vec::new())
}

fn forge_upgrade(
    state: &mut WorldState,
    config: &SimConfig,
    track: UpgradeKind,
) -> Result<Vec<EngineEvent>> {
    let level = match track {
        UpgradeKind::Weapons => state.army_upgrades.weapons,
        UpgradeKind::Armor => state.army_upgrades.armor,
    };
    let multiplier = config.upgrade_cost_scaling.powi(level as i32);
    let cost = [
        (ResourceKind::IronIngots, (50.0 * multiplier).floor()),
        (ResourceKind::Gold, (100.0 * multiplier).floor()),
    ];
    if !state.ledger.pay(&cost) {
        return Err(CommandError::InsufficientResources);
    }
    match track {
        UpgradeKind::Weapons => state.army_upgrades.weapons += 1,
        UpgradeKind::Armor => state.army_upgrades.armor += 1,
    }
    Ok(Vec::new())
}

// === Research ===

fn start_research(state: &mut WorldState, tech: TechId) -> Result<Vec<EngineEvent>> {
    if state.active_research.is_some() {
        return Err(CommandError::ResearchSlotOccupied);
    }
    let def = tech.def();
    if state.has_tech(tech)
        || def.required_techs.iter().any(|req| !state.has_tech(*req))
        || def
            .required_buildings
            .iter()
            .any(|(kind, level)| state.building_level(*kind) < *level)
    {
        return Err(CommandError::UnmetTechnologyRequirement);
    }
    if state.research_points < def.cost || state.ledger.gold() < def.gold_cost {
        return Err(CommandError::InsufficientResources);
    }

    state.research_points -= def.cost;
    state.ledger.deduct(ResourceKind::Gold, def.gold_cost);
    state.active_research =
        Some(crate::state::ActiveResearch { tech, progress: 0, paused: false });
    info!(?tech, "research started");
    Ok(Vec::new())
}

fn set_research_paused(state: &mut WorldState, paused: bool) -> Result<Vec<EngineEvent>> {
    match state.active_research.as_mut() {
        Some(active) => {
            active.paused = paused;
            Ok(Vec::new())
        }
        None => Err(CommandError::NoActiveResearch),
    }
}

fn accelerate_research(state: &mut WorldState, config: &SimConfig) -> Result<Vec<EngineEvent>> {
    if state.active_research.is_none() {
        return Err(CommandError::NoActiveResearch);
    }
    if state.ledger.gold() < config.research_rush_cost {
        return Err(CommandError::InsufficientResources);
    }
    state.ledger.deduct(ResourceKind::Gold, config.research_rush_cost);
    let rush = config.research_rush_progress;
    if let Some(active) = state.active_research.as_mut() {
        active.progress = (active.progress + rush).min(active.tech.def().duration);
    }
    Ok(Vec::new())
}

fn cancel_research(state: &mut WorldState) -> Result<Vec<EngineEvent>> {
    // Spent points and gold are forfeit
    match state.active_research.take() {
        Some(_) => Ok(Vec::new()),
        None => Err(CommandError::NoActiveResearch),
    }
}

// === Market ===

fn buy(
    state: &mut WorldState,
    config: &SimConfig,
    resource: ResourceKind,
    amount: f64,
) -> Result<Vec<EngineEvent>> {
    if state.building_level(BuildingKind::Market) == 0 {
        return Err(CommandError::MissingPrerequisiteBuilding);
    }
    // Negated comparison so NaN is rejected too
    if !(amount > 0.0) {
        return Err(CommandError::InvalidAmount);
    }
    let Some(price) = state.market_prices.get(&resource) else {
        return Err(CommandError::UntradeableResource);
    };
    let total = price.current_buy * amount;
    if state.ledger.gold() < total {
        return Err(CommandError::InsufficientResources);
    }
    if state.ledger.get(resource) + amount > state.max_storage(config) {
        return Err(CommandError::StorageFull);
    }

    state.ledger.deduct(ResourceKind::Gold, total);
    state.ledger.add(resource, amount);
    market::nudge_after_buy(state, resource);
    Ok(Vec::new())
}

fn sell(
    state: &mut WorldState,
    config: &SimConfig,
    resource: ResourceKind,
    amount: f64,
) -> Result<Vec<EngineEvent>> {
    if state.building_level(BuildingKind::Market) == 0 {
        return Err(CommandError::MissingPrerequisiteBuilding);
    }
    if !(amount > 0.0) {
        return Err(CommandError::InvalidAmount);
    }
    let Some(price) = state.market_prices.get(&resource) else {
        return Err(CommandError::UntradeableResource);
    };
    if state.ledger.get(resource) < amount {
        return Err(CommandError::InsufficientResources);
    }
    let total = price.current_sell * amount;

    state.ledger.deduct(resource, amount);
    state.ledger.add(ResourceKind::Gold, total);
    market::nudge_after_sell(state, resource, config);
    Ok(Vec::new())
}

// === Diplomacy, trade routes, espionage ===

fn configure_route(
    state: &mut WorldState,
    neighbor: NeighborId,
    slot: RouteSlot,
    resource: Option<ResourceKind>,
) -> Result<Vec<EngineEvent>> {
    let target = state.neighbor_mut(neighbor).ok_or(CommandError::InvalidTarget(neighbor))?;
    if target.is_at_war() {
        return Err(CommandError::RouteBlocked);
    }
    match slot {
        RouteSlot::Import => target.trade_config.import_res = resource,
        RouteSlot::Export => target.trade_config.export_res = resource,
    }
    Ok(Vec::new())
}

fn toggle_route(
    state: &mut WorldState,
    config: &SimConfig,
    neighbor: NeighborId,
) -> Result<Vec<EngineEvent>> {
    let currently_active = {
        let target = state.neighbor(neighbor).ok_or(CommandError::InvalidTarget(neighbor))?;
        if target.is_at_war() {
            return Err(CommandError::RouteBlocked);
        }
        target.trade_route_active
    };

    if currently_active {
        let target = state.neighbor_mut(neighbor).ok_or(CommandError::InvalidTarget(neighbor))?;
        target.trade_route_active = false;
        target.trade_config = Default::default();
        info!(neighbor = neighbor.0, "trade route closed");
        return Ok(vec![EngineEvent::RouteClosed { neighbor }]);
    }

    // Opening a route costs gold; closing is free
    if !state.ledger.pay(&[(ResourceKind::Gold, config.trade_route_cost)]) {
        return Err(CommandError::InsufficientResources);
    }
    if let Some(target) = state.neighbor_mut(neighbor) {
        target.trade_route_active = true;
    }
    info!(neighbor = neighbor.0, "trade route opened");
    Ok(vec![EngineEvent::RouteOpened { neighbor }])
}

fn gift(state: &mut WorldState, config: &SimConfig, neighbor: NeighborId) -> Result<Vec<EngineEvent>> {
    if state.neighbor(neighbor).is_none() {
        return Err(CommandError::InvalidTarget(neighbor));
    }
    if !state.ledger.pay(&[(ResourceKind::Gold, config.gift_cost)]) {
        return Err(CommandError::InsufficientResources);
    }
    let boost = config.gift_relation_boost;
    if let Some(target) = state.neighbor_mut(neighbor) {
        target.shift_relation(boost);
    }
    Ok(Vec::new())
}

fn insult(state: &mut WorldState, config: &SimConfig, neighbor: NeighborId) -> Result<Vec<EngineEvent>> {
    let penalty = config.insult_relation_penalty;
    let target = state.neighbor_mut(neighbor).ok_or(CommandError::InvalidTarget(neighbor))?;
    target.shift_relation(-penalty);
    Ok(Vec::new())
}

fn declare_war(state: &mut WorldState, neighbor: NeighborId) -> Result<Vec<EngineEvent>> {
    let target = state.neighbor_mut(neighbor).ok_or(CommandError::InvalidTarget(neighbor))?;
    if target.is_vassal() {
        return Err(CommandError::InvalidTarget(neighbor));
    }
    target.relation_status = RelationStatus::War;
    target.relation_score = -100.0;
    target.trade_route_active = false;
    target.trade_config = Default::default();
    info!(name = %target.name, "war declared");
    Ok(vec![EngineEvent::WarDeclared { neighbor }])
}

fn scout(state: &mut WorldState, config: &SimConfig, neighbor: NeighborId) -> Result<Vec<EngineEvent>> {
    if state.neighbor(neighbor).is_none() {
        return Err(CommandError::InvalidTarget(neighbor));
    }
    if !state.ledger.pay(&[(ResourceKind::Gold, config.spy_cost)]) {
        return Err(CommandError::InsufficientResources);
    }

    // Spies are paid whether or not they get caught
    let caught = state.rng.gen::<f64>() < config.scout_failure_chance;
    let penalty = config.scout_failure_penalty;
    if let Some(target) = state.neighbor_mut(neighbor) {
        if caught {
            target.shift_relation(-penalty);
            info!(name = %target.name, "spies caught");
        } else {
            target.intel_level = IntelLevel::Full;
            info!(name = %target.name, "spies returned with full intel");
        }
    }
    Ok(vec![EngineEvent::EspionageResolved { neighbor, success: !caught }])
}

fn attack(
    state: &mut WorldState,
    config: &SimConfig,
    neighbor: NeighborId,
    mode: AttackMode,
) -> Result<Vec<EngineEvent>> {
    let own_power = combat::military_power(state, config);
    if own_power <= 0.0 {
        // No army to send
        return Err(CommandError::InsufficientResources);
    }

    let (defender_power, defender_wealth, intel, was_at_war) = {
        let target = state.neighbor_mut(neighbor).ok_or(CommandError::InvalidTarget(neighbor))?;
        if target.is_vassal() {
            return Err(CommandError::InvalidTarget(neighbor));
        }
        let was_at_war = target.is_at_war();
        target.relation_status = RelationStatus::War;
        target.relation_score = -100.0;
        target.trade_route_active = false;
        target.trade_config = Default::default();
        (target.military_power, target.wealth, target.intel_level, was_at_war)
    };

    state.pending_attacks.push(PendingAttack {
        neighbor,
        mode,
        resolve_at: state.tick + config.attack_travel_ticks,
        attacker_power: own_power,
        defender_power,
        defender_wealth,
        intel,
    });
    info!(neighbor = neighbor.0, ?mode, "army marching");

    let mut events = Vec::new();
    if !was_at_war {
        events.push(EngineEvent::WarDeclared { neighbor });
    }
    events.push(EngineEvent::AttackLaunched { neighbor, mode });
    Ok(events)
}
