//! Fixed base prices used by the market and trade routes

use crate::core::types::ResourceKind;

/// Base market price; gold is the unit of account
pub fn base_price(kind: ResourceKind) -> f64 {
    match kind {
        ResourceKind::RawWood => 2.0,
        ResourceKind::RawStone => 3.0,
        ResourceKind::IronOre => 5.0,
        ResourceKind::Wheat => 2.0,
        ResourceKind::Planks => 5.0,
        ResourceKind::Blocks => 6.0,
        ResourceKind::IronIngots => 15.0,
        ResourceKind::Bread => 4.0,
        ResourceKind::Gold => 1.0,
    }
}
