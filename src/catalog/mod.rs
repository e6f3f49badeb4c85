//! Static definition tables for buildings, units, technologies, and prices
//!
//! Everything here is immutable game data; mutable quantities live in
//! `crate::state`.

pub mod buildings;
pub mod prices;
pub mod techs;
pub mod units;
