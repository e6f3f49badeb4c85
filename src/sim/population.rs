//! Population - stochastic growth and decline
//!
//! Growth and the two decline causes are independent draws in the same
//! tick; a miserable, starving settlement can lose two villagers at once.
//! Population never drops below the survivor floor.

use rand::Rng;
use tracing::debug;

use crate::catalog::techs::TechId;
use crate::core::config::SimConfig;
use crate::core::types::{BuildingKind, ResourceKind};
use crate::state::WorldState;

/// Per-tick probability of gaining a villager, before the food and
/// housing gates
pub fn growth_chance(state: &WorldState, config: &SimConfig) -> f64 {
    let mut chance = config.base_population_growth
        + state.building_level(BuildingKind::Cathedral) as f64 * 0.02;
    if state.has_tech(TechId::Sanitation) {
        chance += 0.05;
    }
    if state.happiness > 80.0 {
        chance += 0.05;
    } else if state.happiness < 30.0 {
        chance -= 0.15;
    }
    chance
}

pub fn tick_population(state: &mut WorldState, config: &SimConfig) {
    let chance = growth_chance(state, config);
    let bread = state.ledger.get(ResourceKind::Bread);
    let cap = state.max_population(config);

    if state.rng.gen::<f64>() < chance && bread > 10.0 && state.population < cap {
        state.population += 1.0;
        debug!(population = state.population, "villager arrived");
    }

    if state.happiness < 20.0 && state.rng.gen::<f64>() < 0.2 {
        state.population -= 1.0;
        debug!(population = state.population, "villager fled unrest");
    }
    if bread <= 0.0 && state.rng.gen::<f64>() < 0.1 {
        state.population -= 1.0;
        debug!(population = state.population, "villager starved");
    }

    if state.population < config.min_population {
        state.population = config.min_population;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_chance_modifiers() {
        let config = SimConfig::default();
        let mut state = WorldState::new(1);
        state.happiness = 50.0;
        assert!((growth_chance(&state, &config) - 0.1).abs() < 1e-9);

        state.buildings.insert(BuildingKind::Cathedral, 2);
        state.unlocked_techs.insert(TechId::Sanitation);
        state.happiness = 90.0;
        assert!((growth_chance(&state, &config) - 0.24).abs() < 1e-9);

        state.happiness = 10.0;
        assert!((growth_chance(&state, &config) - 0.04).abs() < 1e-9);
    }

    #[test]
    fn test_no_growth_without_food_reserve() {
        let config = SimConfig::default();
        let mut state = WorldState::new(1);
        state.ledger.set(ResourceKind::Bread, 10.0); // reserve gate is strict
        state.happiness = 100.0;
        for _ in 0..200 {
            tick_population(&mut state, &config);
        }
        assert_eq!(state.population, 5.0);
    }

    #[test]
    fn test_no_growth_past_housing_cap() {
        let config = SimConfig::default();
        let mut state = WorldState::new(1);
        state.population = state.max_population(&config);
        state.happiness = 100.0;
        for _ in 0..200 {
            tick_population(&mut state, &config);
        }
        assert_eq!(state.population, state.max_population(&config));
    }

    #[test]
    fn test_population_floor_holds_through_famine() {
        let config = SimConfig::default();
        let mut state = WorldState::new(1);
        state.ledger.set(ResourceKind::Bread, 0.0);
        state.happiness = 0.0;
        for _ in 0..2_000 {
            tick_population(&mut state, &config);
        }
        assert_eq!(state.population, config.min_population);
    }

    #[test]
    fn test_contented_settlement_eventually_grows() {
        let config = SimConfig::default();
        let mut state = WorldState::new(1);
        state.happiness = 100.0;
        // Bread 300 at start, well above the reserve gate
        for _ in 0..200 {
            tick_population(&mut state, &config);
        }
        assert!(state.population > 5.0);
    }
}
