//! Diplomacy - periodic relation decay, reclassification, and neighbor growth
//!
//! Runs on a throttle, not every tick. War and vassalage are absorbing:
//! the classifier never rewrites them, only commands and conquest do.
//! Vassals are frozen entirely; they neither drift nor rearm.

use tracing::debug;

use crate::core::config::SimConfig;
use crate::core::types::RelationStatus;
use crate::sim::events::EngineEvent;
use crate::state::WorldState;

fn classify(score: f64) -> RelationStatus {
    if score >= 80.0 {
        RelationStatus::Ally
    } else if score >= 30.0 {
        RelationStatus::Friendly
    } else if score <= -50.0 {
        RelationStatus::Hostile
    } else {
        RelationStatus::Neutral
    }
}

pub fn tick_diplomacy(state: &mut WorldState, config: &SimConfig) -> Vec<EngineEvent> {
    let mut events = Vec::new();

    for neighbor in &mut state.neighbors {
        if neighbor.is_vassal() {
            continue;
        }

        // War freezes the score; only surrender or conquest moves it.
        // Everyone else drifts back toward indifference without upkeep.
        if !neighbor.is_at_war() {
            if neighbor.relation_score > 0.0 {
                neighbor.relation_score =
                    (neighbor.relation_score - config.relation_decay_step).max(0.0);
            } else if neighbor.relation_score < 0.0 {
                neighbor.relation_score =
                    (neighbor.relation_score + config.relation_decay_step).min(0.0);
            }

            let status = classify(neighbor.relation_score);
            if status != neighbor.relation_status {
                debug!(name = %neighbor.name, ?status, "relation reclassified");
                neighbor.relation_status = status;
                events.push(EngineEvent::RelationShifted { neighbor: neighbor.id, status });
            }
        }

        // Neighbors rearm over time; war drives full mobilization
        let growth = if neighbor.is_at_war() {
            config.neighbor_power_growth * config.wartime_mobilization_factor
        } else {
            config.neighbor_power_growth
        };
        neighbor.military_power += growth;
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_decay_toward_zero_from_both_sides() {
        let config = SimConfig::default();
        let mut state = WorldState::new(2);
        state.neighbors[0].relation_score = 1.0;
        state.neighbors[1].relation_score = -0.3;

        tick_diplomacy(&mut state, &config);
        assert_eq!(state.neighbors[0].relation_score, 0.5);
        assert_eq!(state.neighbors[1].relation_score, 0.0, "decay must not overshoot");

        tick_diplomacy(&mut state, &config);
        tick_diplomacy(&mut state, &config);
        assert_eq!(state.neighbors[0].relation_score, 0.0);
    }

    #[test]
    fn test_classification_thresholds() {
        let config = SimConfig::default();
        let mut state = WorldState::new(2);
        for (i, score) in [85.0, 40.0, -60.0, 5.0].into_iter().enumerate() {
            state.neighbors[i].relation_score = score;
        }

        tick_diplomacy(&mut state, &config);
        assert_eq!(state.neighbors[0].relation_status, RelationStatus::Ally);
        assert_eq!(state.neighbors[1].relation_status, RelationStatus::Friendly);
        assert_eq!(state.neighbors[2].relation_status, RelationStatus::Hostile);
        assert_eq!(state.neighbors[3].relation_status, RelationStatus::Neutral);
    }

    #[test]
    fn test_war_is_never_reclassified_away() {
        let config = SimConfig::default();
        let mut state = WorldState::new(2);
        state.neighbors[0].relation_status = RelationStatus::War;
        state.neighbors[0].relation_score = 90.0; // would classify as Ally

        let events = tick_diplomacy(&mut state, &config);
        assert_eq!(state.neighbors[0].relation_status, RelationStatus::War);
        assert!(!events
            .iter()
            .any(|e| matches!(e, EngineEvent::RelationShifted { neighbor, .. } if *neighbor == state.neighbors[0].id)));
    }

    #[test]
    fn test_vassals_are_frozen() {
        let config = SimConfig::default();
        let mut state = WorldState::new(2);
        state.neighbors[0].relation_status = RelationStatus::Vassal;
        state.neighbors[0].relation_score = 100.0;
        state.neighbors[0].military_power = 0.0;

        for _ in 0..10 {
            tick_diplomacy(&mut state, &config);
        }
        assert_eq!(state.neighbors[0].relation_score, 100.0);
        assert_eq!(state.neighbors[0].military_power, 0.0);
    }

    #[test]
    fn test_war_mobilizes_faster_than_peace() {
        let config = SimConfig::default();
        let mut state = WorldState::new(2);
        state.neighbors[0].relation_status = RelationStatus::War;
        let war_before = state.neighbors[0].military_power;
        let peace_before = state.neighbors[1].military_power;

        tick_diplomacy(&mut state, &config);
        assert_eq!(state.neighbors[0].military_power, war_before + 5.0);
        assert_eq!(state.neighbors[1].military_power, peace_before + 1.0);
    }

    #[test]
    fn test_status_change_emits_event() {
        let config = SimConfig::default();
        let mut state = WorldState::new(2);
        state.neighbors[0].relation_status = RelationStatus::Neutral;
        state.neighbors[0].relation_score = 95.0;

        let events = tick_diplomacy(&mut state, &config);
        assert!(events.contains(&EngineEvent::RelationShifted {
            neighbor: state.neighbors[0].id,
            status: RelationStatus::Ally,
        }));
    }
}
