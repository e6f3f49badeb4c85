//! Research system - point accrual and active-project progress
//!
//! Points accrue continuously and are only ever spent by starting a project.
//! At most one project is active; completing it moves the id into the
//! grow-only unlocked set and clears the slot.

use tracing::info;

use crate::core::config::SimConfig;
use crate::core::types::BuildingKind;
use crate::sim::events::EngineEvent;
use crate::state::WorldState;

/// Research points generated this tick, before spending
pub fn point_generation(state: &WorldState, config: &SimConfig) -> f64 {
    config.base_research_rate
        + state.building_level(BuildingKind::Cathedral) as f64 * 0.5
        + state.building_level(BuildingKind::TownCenter) as f64 * 0.1
}

pub fn tick_research(state: &mut WorldState, config: &SimConfig) -> Vec<EngineEvent> {
    state.research_points += point_generation(state, config);

    let Some(active) = state.active_research.as_mut() else {
        return Vec::new();
    };
    if active.paused {
        return Vec::new();
    }

    active.progress += 1;
    if active.progress < active.tech.def().duration {
        return Vec::new();
    }

    let tech = active.tech;
    state.active_research = None;
    state.unlocked_techs.insert(tech);
    info!(?tech, "research completed");
    vec![EngineEvent::ResearchCompleted { tech }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::techs::TechId;
    use crate::state::ActiveResearch;

    #[test]
    fn test_point_generation_scales_with_buildings() {
        let config = SimConfig::default();
        let mut state = WorldState::new(1);
        // One town center at start
        assert!((point_generation(&state, &config) - 1.1).abs() < 1e-9);
        state.buildings.insert(BuildingKind::Cathedral, 2);
        assert!((point_generation(&state, &config) - 2.1).abs() < 1e-9);
    }

    #[test]
    fn test_research_completes_at_duration() {
        let config = SimConfig::default();
        let mut state = WorldState::new(1);
        let duration = TechId::CropRotation.def().duration;
        state.active_research = Some(ActiveResearch {
            tech: TechId::CropRotation,
            progress: duration - 1,
            paused: false,
        });

        let events = tick_research(&mut state, &config);
        assert_eq!(events, vec![EngineEvent::ResearchCompleted { tech: TechId::CropRotation }]);
        assert!(state.active_research.is_none());
        assert!(state.has_tech(TechId::CropRotation));

        // No further progress events fire for a finished tech
        assert!(tick_research(&mut state, &config).is_empty());
        assert!(state.has_tech(TechId::CropRotation));
    }

    #[test]
    fn test_paused_research_holds_progress() {
        let config = SimConfig::default();
        let mut state = WorldState::new(1);
        state.active_research = Some(ActiveResearch {
            tech: TechId::CropRotation,
            progress: 5,
            paused: true,
        });

        tick_research(&mut state, &config);
        assert_eq!(state.active_research.as_ref().unwrap().progress, 5);
    }

    #[test]
    fn test_unlocked_set_only_grows() {
        let config = SimConfig::default();
        let mut state = WorldState::new(1);
        state.unlocked_techs.insert(TechId::Sanitation);
        for _ in 0..200 {
            tick_research(&mut state, &config);
        }
        assert!(state.has_tech(TechId::Sanitation));
    }
}
