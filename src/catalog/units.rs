//! Unit definitions: recruitment costs, combat power, upkeep

use crate::core::types::{ResourceKind, UnitKind};

/// Recruitment cost; `pop` villagers are drafted into the army
#[derive(Debug, Clone, Copy)]
pub struct UnitCost {
    pub planks: f64,
    pub ingots: f64,
    pub bread: f64,
    pub gold: f64,
    pub pop: f32,
}

/// Combat and upkeep stats; upkeep rates are per minute
#[derive(Debug, Clone, Copy)]
pub struct UnitStats {
    pub power: f64,
    pub upkeep_gold: f64,
    pub upkeep_bread: f64,
}

pub fn base_cost(kind: UnitKind) -> UnitCost {
    match kind {
        UnitKind::Lancer => UnitCost { planks: 10.0, ingots: 5.0, bread: 20.0, gold: 10.0, pop: 1.0 },
        UnitKind::Archer => UnitCost { planks: 30.0, ingots: 2.0, bread: 30.0, gold: 15.0, pop: 1.0 },
        UnitKind::Knight => UnitCost { planks: 20.0, ingots: 40.0, bread: 100.0, gold: 50.0, pop: 2.0 },
    }
}

pub fn stats(kind: UnitKind) -> UnitStats {
    match kind {
        UnitKind::Lancer => UnitStats { power: 10.0, upkeep_gold: 0.5, upkeep_bread: 1.0 },
        UnitKind::Archer => UnitStats { power: 15.0, upkeep_gold: 1.0, upkeep_bread: 1.0 },
        UnitKind::Knight => UnitStats { power: 45.0, upkeep_gold: 5.0, upkeep_bread: 3.0 },
    }
}

/// Cost after the blacksmith discount (population is never discounted)
pub fn discounted_cost(kind: UnitKind, blacksmith_level: u32) -> UnitCost {
    let discount = (blacksmith_level as f64 * 0.05).min(0.5);
    let base = base_cost(kind);
    UnitCost {
        planks: (base.planks * (1.0 - discount)).floor(),
        ingots: (base.ingots * (1.0 - discount)).floor(),
        bread: (base.bread * (1.0 - discount)).floor(),
        gold: (base.gold * (1.0 - discount)).floor(),
        pop: base.pop,
    }
}

impl UnitCost {
    pub fn as_pairs(&self) -> [(ResourceKind, f64); 4] {
        [
            (ResourceKind::Planks, self.planks),
            (ResourceKind::IronIngots, self.ingots),
            (ResourceKind::Bread, self.bread),
            (ResourceKind::Gold, self.gold),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_knight_drafts_two_villagers() {
        assert_eq!(base_cost(UnitKind::Knight).pop, 2.0);
        assert_eq!(base_cost(UnitKind::Lancer).pop, 1.0);
    }

    #[test]
    fn test_blacksmith_discount_caps_at_half() {
        // 20 levels would be a 100% discount uncapped
        let cost = discounted_cost(UnitKind::Knight, 20);
        assert_eq!(cost.gold, 25.0);
        assert_eq!(cost.ingots, 20.0);
        // Population cost is untouched
        assert_eq!(cost.pop, 2.0);
    }

    #[test]
    fn test_discount_floors_components() {
        // 5% off a lancer: 10 planks -> 9.5 -> floor 9
        let cost = discounted_cost(UnitKind::Lancer, 1);
        assert_eq!(cost.planks, 9.0);
    }
}
