//! Happiness - additive modifiers with a drift toward contentment
//!
//! Runs before upkeep deducts bread, so the starvation check sees the stock
//! the population actually woke up to. Reordering this against production
//! changes simulated outcomes.

use crate::catalog::techs::TechId;
use crate::core::config::SimConfig;
use crate::core::types::{PolicyKind, ResourceKind};
use crate::state::WorldState;

pub fn tick_happiness(state: &mut WorldState, config: &SimConfig) {
    let mut change = state.tax_level.happiness_change();

    if state.has_policy(PolicyKind::Rationing) {
        change -= 3.0;
    }
    if state.has_policy(PolicyKind::ForcedLabor) {
        change -= 5.0;
    }
    if state.has_policy(PolicyKind::Festivals) {
        change += 3.0;
    }
    if state.has_tech(TechId::Sanitation) {
        change += 0.1;
    }
    if state.population > state.max_population(config) {
        change -= config.overcrowding_penalty;
    }
    if state.ledger.get(ResourceKind::Bread) <= 0.0 {
        change -= config.starvation_penalty;
    }

    // No pressure either way: drift toward the 50 midpoint
    if change == 0.0 {
        if state.happiness > 50.0 {
            change = -config.happiness_drift_step;
        } else if state.happiness < 50.0 {
            change = config.happiness_drift_step;
        }
    }

    state.happiness = (state.happiness + change).clamp(0.0, 100.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TaxLevel;

    #[test]
    fn test_happiness_stays_bounded() {
        let config = SimConfig::default();
        let mut state = WorldState::new(1);
        state.tax_level = TaxLevel::None; // +2 per tick
        for _ in 0..100 {
            tick_happiness(&mut state, &config);
        }
        assert_eq!(state.happiness, 100.0);

        state.tax_level = TaxLevel::Extortion; // -5 per tick
        state.ledger.set(ResourceKind::Bread, 0.0); // -10 more
        for _ in 0..100 {
            tick_happiness(&mut state, &config);
        }
        assert_eq!(state.happiness, 0.0);
    }

    #[test]
    fn test_starvation_penalty_applies_at_exactly_zero_bread() {
        let config = SimConfig::default();
        let mut state = WorldState::new(1);
        state.tax_level = TaxLevel::None;
        state.happiness = 50.0;
        state.ledger.set(ResourceKind::Bread, 0.0);
        tick_happiness(&mut state, &config);
        // +2 tax, -10 starvation
        assert_eq!(state.happiness, 42.0);
    }

    #[test]
    fn test_overcrowding_penalty() {
        let config = SimConfig::default();
        let mut state = WorldState::new(1);
        state.tax_level = TaxLevel::None;
        state.happiness = 50.0;
        state.population = state.max_population(&config) + 1.0;
        tick_happiness(&mut state, &config);
        // +2 tax, -5 overcrowding
        assert_eq!(state.happiness, 47.0);
    }

    #[test]
    fn test_drift_toward_midpoint_when_modifiers_cancel() {
        let config = SimConfig::default();
        let mut state = WorldState::new(1);
        // Forced labor (-5) + festivals (+3) + exempt tax (+2) sums to zero,
        // so the drift rule takes over.
        state.tax_level = TaxLevel::None;
        state.policies.insert(PolicyKind::ForcedLabor);
        state.policies.insert(PolicyKind::Festivals);

        state.happiness = 80.0;
        tick_happiness(&mut state, &config);
        assert_eq!(state.happiness, 79.5);

        state.happiness = 20.0;
        tick_happiness(&mut state, &config);
        assert_eq!(state.happiness, 20.5);
    }
}
