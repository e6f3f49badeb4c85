//! External actors: neighboring settlements with relations and trade routes

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{Biome, IntelLevel, NeighborId, RelationStatus, ResourceKind};

/// Import/export slots of one trade route
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeConfig {
    /// What we buy from them each tick, if anything
    pub import_res: Option<ResourceKind>,
    /// What we sell to them each tick, if anything
    pub export_res: Option<ResourceKind>,
}

/// One neighboring settlement
///
/// Identity fields (name, biome, export/import lists) never change after
/// generation; the rest evolves through diplomacy, trade, and war.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neighbor {
    pub id: NeighborId,
    pub name: String,
    pub biome: Biome,

    pub military_power: f64,
    pub wealth: f64,
    pub population: u32,

    /// -100 (loathing) to 100 (devotion)
    pub relation_score: f64,
    pub relation_status: RelationStatus,
    /// Days of travel; flavor for trade and war pacing
    pub distance: u32,

    pub trade_route_active: bool,
    pub trade_config: TradeConfig,
    /// What they sell cheap
    pub exports: Vec<ResourceKind>,
    /// What they buy expensive
    pub imports: Vec<ResourceKind>,

    pub intel_level: IntelLevel,
}

impl Neighbor {
    pub fn is_at_war(&self) -> bool {
        self.relation_status == RelationStatus::War
    }

    pub fn is_vassal(&self) -> bool {
        self.relation_status == RelationStatus::Vassal
    }

    /// Clamp-adjust the relation score; classification happens periodically
    pub fn shift_relation(&mut self, delta: f64) {
        self.relation_score = (self.relation_score + delta).clamp(-100.0, 100.0);
    }
}

const NEIGHBOR_NAMES: [&str; 8] = [
    "Iron Barony",
    "Hillfort",
    "Windmere",
    "Blackcastle",
    "The Lowlands",
    "Lost Sanctuary",
    "Storm Peak",
    "Mistvale",
];

/// Generate the fixed roster of eight neighbors from the world rng
///
/// Stats scale with the roster index so early targets are soft and later
/// ones are out of reach until the player's economy matures.
pub fn generate_roster<R: Rng>(rng: &mut R) -> Vec<Neighbor> {
    NEIGHBOR_NAMES
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let exports = vec![random_tradeable(rng)];
            let mut import = random_tradeable(rng);
            while import == exports[0] {
                import = random_tradeable(rng);
            }

            Neighbor {
                id: NeighborId::new(index as u32),
                name: (*name).to_string(),
                biome: Biome::ALL[rng.gen_range(0..Biome::ALL.len())],
                military_power: 50.0 + (index as f64) * 120.0,
                wealth: 500.0 + (index as f64) * 200.0,
                population: 10 + (index as u32) * 5,
                relation_score: rng.gen_range(-20..40) as f64,
                relation_status: RelationStatus::Neutral,
                distance: rng.gen_range(1..=5),
                trade_route_active: false,
                trade_config: TradeConfig::default(),
                exports,
                imports: vec![import],
                intel_level: IntelLevel::None,
            }
        })
        .collect()
}

fn random_tradeable<R: Rng>(rng: &mut R) -> ResourceKind {
    ResourceKind::TRADEABLE[rng.gen_range(0..ResourceKind::TRADEABLE.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_roster_has_eight_distinct_neighbors() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let roster = generate_roster(&mut rng);
        assert_eq!(roster.len(), 8);
        for (i, n) in roster.iter().enumerate() {
            assert_eq!(n.id, NeighborId::new(i as u32));
            assert_eq!(n.relation_status, RelationStatus::Neutral);
            assert_ne!(n.exports[0], n.imports[0], "{} trades a good with itself", n.name);
        }
    }

    #[test]
    fn test_roster_power_scales_with_index() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let roster = generate_roster(&mut rng);
        assert_eq!(roster[0].military_power, 50.0);
        assert_eq!(roster[7].military_power, 50.0 + 7.0 * 120.0);
    }

    #[test]
    fn test_shift_relation_clamps() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut n = generate_roster(&mut rng).remove(0);
        n.shift_relation(500.0);
        assert_eq!(n.relation_score, 100.0);
        n.shift_relation(-500.0);
        assert_eq!(n.relation_score, -100.0);
    }
}
