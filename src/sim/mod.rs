//! The tick pipeline - one fixed-order pass over every subsystem
//!
//! Order matters and is part of the engine's contract:
//!
//! 1. advance the clock
//! 2. resolve due attacks
//! 3. research progress
//! 4. market reprice (throttled)
//! 5. happiness (reads pre-upkeep bread)
//! 6. production, trade flows, and upkeep
//! 7. population (reads post-upkeep bread)
//! 8. diplomacy (throttled)
//!
//! Reordering any pair changes simulated outcomes; the tests pin the
//! observable consequences.

pub mod diplomacy;
pub mod events;
pub mod happiness;
pub mod market;
pub mod population;
pub mod production;
pub mod research;

use ahash::AHashMap;
use tracing::trace;

use crate::combat;
use crate::core::config::SimConfig;
use crate::core::types::ResourceKind;
use crate::state::WorldState;
use events::EngineEvent;

/// What one tick did, for observers; discarding it loses nothing
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    /// Net resource deltas from production, trade, and upkeep
    pub production: AHashMap<ResourceKind, f64>,
    /// Discrete happenings, in pipeline order
    pub events: Vec<EngineEvent>,
}

/// Advance the world by exactly one tick
pub fn tick(state: &mut WorldState, config: &SimConfig) -> TickReport {
    state.tick += 1;
    trace!(tick = state.tick, "tick start");

    let mut events = combat::resolve_due_attacks(state, config);
    events.extend(research::tick_research(state, config));

    if state.tick % config.market_interval == 0 {
        market::reprice(state, config);
    }

    happiness::tick_happiness(state, config);
    let production = production::tick_production(state, config);
    population::tick_population(state, config);

    if state.tick % config.diplomacy_interval == 0 {
        events.extend(diplomacy::tick_diplomacy(state, config));
    }

    TickReport { production, events }
}
