use thiserror::Error;

use crate::core::types::NeighborId;

/// Typed rejection reasons surfaced to the command caller.
///
/// All variants are recoverable: a failed command leaves the world untouched
/// and never aborts the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("insufficient resources")]
    InsufficientResources,

    #[error("insufficient population for recruitment")]
    InsufficientPopulation,

    #[error("missing prerequisite building")]
    MissingPrerequisiteBuilding,

    #[error("technology requirements not met")]
    UnmetTechnologyRequirement,

    #[error("a research project is already active")]
    ResearchSlotOccupied,

    #[error("no research project is active")]
    NoActiveResearch,

    #[error("amount must be positive")]
    InvalidAmount,

    #[error("resource is not quoted on the market")]
    UntradeableResource,

    #[error("storage is full")]
    StorageFull,

    #[error("invalid target: {0:?}")]
    InvalidTarget(NeighborId),

    #[error("trade route is blocked while at war")]
    RouteBlocked,
}

pub type Result<T> = std::result::Result<T, CommandError>;
