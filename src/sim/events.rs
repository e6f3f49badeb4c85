//! Structured event notifications emitted by ticks and commands
//!
//! The engine is agnostic to message text; a logging collaborator renders
//! these however it likes (locale, formatting, retention).

use serde::{Deserialize, Serialize};

use crate::catalog::techs::TechId;
use crate::combat::AttackMode;
use crate::core::types::{NeighborId, RelationStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    /// An active research project reached its duration and unlocked
    ResearchCompleted { tech: TechId },

    /// The periodic classifier moved a neighbor to a new status
    RelationShifted { neighbor: NeighborId, status: RelationStatus },

    /// War was declared, by command or by launching an attack
    WarDeclared { neighbor: NeighborId },

    /// Troops are marching; resolution arrives after the travel delay
    AttackLaunched { neighbor: NeighborId, mode: AttackMode },

    /// A deferred attack resolved
    AttackResolved {
        neighbor: NeighborId,
        mode: AttackMode,
        victory: bool,
        /// Gold transferred by a successful raid, zero otherwise
        gold_plundered: f64,
    },

    /// Spies returned (or were caught)
    EspionageResolved { neighbor: NeighborId, success: bool },

    /// A trade route was opened or closed
    RouteOpened { neighbor: NeighborId },
    RouteClosed { neighbor: NeighborId },
}
