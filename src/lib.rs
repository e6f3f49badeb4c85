//! Fiefdom - Tick-Driven Settlement Strategy Engine

pub mod catalog;
pub mod combat;
pub mod command;
pub mod core;
pub mod sim;
pub mod state;

pub use crate::core::config::SimConfig;
pub use crate::core::error::{CommandError, Result};
pub use crate::state::WorldState;
