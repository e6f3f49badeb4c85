//! Combat resolver - army power and deferred raid/conquest resolution
//!
//! Power is a pure function of state. An attack command snapshots both
//! sides' inputs into a `PendingAttack`; the tick pipeline resolves it once
//! the travel delay elapses. If the engine is dropped first, the attack
//! simply never resolves.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::techs::TechId;
use crate::catalog::units;
use crate::core::config::SimConfig;
use crate::core::types::{
    BuildingKind, IntelLevel, NeighborId, PolicyKind, RelationStatus, ResourceKind, Tick, UnitKind,
};
use crate::sim::events::EngineEvent;
use crate::state::WorldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackMode {
    /// Plunder a fraction of the target's wealth
    Raid,
    /// Make the target a vassal
    Conquer,
}

/// A scheduled attack resolution
///
/// Inputs are resolved at command time, not re-read at resolution: the
/// marching army fights with the strength it left with, against the garrison
/// the scouts reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingAttack {
    pub neighbor: NeighborId,
    pub mode: AttackMode,
    pub resolve_at: Tick,
    pub attacker_power: f64,
    pub defender_power: f64,
    pub defender_wealth: f64,
    pub intel: IntelLevel,
}

/// Total military power from troops, upgrades, stance, technology, policy,
/// and walls. Recomputed on every access, never cached.
pub fn military_power(state: &WorldState, config: &SimConfig) -> f64 {
    let raw: f64 = UnitKind::ALL
        .iter()
        .map(|&kind| state.troop_count(kind) as f64 * units::stats(kind).power)
        .sum();

    let tech_attack = if state.has_tech(TechId::IronWeapons) { 0.1 } else { 0.0 };
    let upgrade_multiplier = 1.0
        + state.army_upgrades.weapons as f64 * 0.1
        + state.army_upgrades.armor as f64 * 0.05
        + tech_attack;

    let policy_multiplier = if state.has_policy(PolicyKind::MilitaryTraining) { 1.1 } else { 1.0 };
    let stance_multiplier = state.army_stance.power_multiplier();

    let wall_tech = if state.has_tech(TechId::StoneWalls) { 1.5 } else { 1.0 };
    let wall_bonus =
        state.building_level(BuildingKind::Wall) as f64 * config.wall_defense_bonus * wall_tech;

    raw * upgrade_multiplier * policy_multiplier * stance_multiplier + wall_bonus
}

/// Resolve every pending attack whose travel delay has elapsed
pub fn resolve_due_attacks(state: &mut WorldState, config: &SimConfig) -> Vec<EngineEvent> {
    let now = state.tick;
    let due: Vec<PendingAttack> = {
        let (fire, keep): (Vec<_>, Vec<_>) =
            state.pending_attacks.drain(..).partition(|a| a.resolve_at <= now);
        state.pending_attacks = keep;
        fire
    };

    due.into_iter().map(|attack| resolve(state, config, attack)).collect()
}

fn resolve(state: &mut WorldState, config: &SimConfig, attack: PendingAttack) -> EngineEvent {
    // Full intel narrows the defender's roll band: better reconnaissance,
    // less surprise.
    let variance = if attack.intel == IntelLevel::Full { 0.2 } else { 0.5 };
    let defender_roll = attack.defender_power * (0.9 + state.rng.gen::<f64>() * variance);
    let attacker_roll = attack.attacker_power * (0.8 + state.rng.gen::<f64>() * 0.4);
    let victory = attacker_roll > defender_roll;

    debug!(neighbor = attack.neighbor.0, attacker_roll, defender_roll, "attack resolved");

    let mut gold_plundered = 0.0;
    if victory {
        match attack.mode {
            AttackMode::Conquer => {
                if let Some(neighbor) = state.neighbor_mut(attack.neighbor) {
                    neighbor.relation_status = RelationStatus::Vassal;
                    neighbor.relation_score = 100.0;
                    neighbor.military_power = 0.0;
                    info!(name = %neighbor.name, "neighbor conquered");
                }
            }
            AttackMode::Raid => {
                gold_plundered = (attack.defender_wealth * config.raid_plunder_fraction).floor();
                if let Some(neighbor) = state.neighbor_mut(attack.neighbor) {
                    neighbor.wealth -= gold_plundered;
                    info!(name = %neighbor.name, gold_plundered, "raid succeeded");
                }
                state.ledger.add(ResourceKind::Gold, gold_plundered);
            }
        }
    } else {
        // Forced retreat with heavy casualties; the war goes on
        for kind in UnitKind::ALL {
            let count = state.troop_count(kind);
            let survivors = (count as f64 * (1.0 - config.defeat_loss_fraction)).floor() as u32;
            state.troops.insert(kind, survivors);
        }
        info!(neighbor = attack.neighbor.0, "attack repelled");
    }

    EngineEvent::AttackResolved {
        neighbor: attack.neighbor,
        mode: attack.mode,
        victory,
        gold_plundered,
    }
}
