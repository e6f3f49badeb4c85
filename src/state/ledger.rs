//! Resource ledger - settlement-level stocks keyed by resource kind

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::ResourceKind;

/// Stocks for every resource kind
///
/// Quantities are fractional because per-tick rates are fractions of the
/// per-minute tuning values. Invariants (non-negative, storage cap on
/// non-currency kinds) are enforced by the tick pipeline via `clamp_all`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceLedger {
    amounts: AHashMap<ResourceKind, f64>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: ResourceKind) -> f64 {
        self.amounts.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, kind: ResourceKind, amount: f64) {
        self.amounts.insert(kind, amount.max(0.0));
    }

    pub fn add(&mut self, kind: ResourceKind, amount: f64) {
        *self.amounts.entry(kind).or_insert(0.0) += amount;
    }

    /// Deduct without going negative; callers check affordability first
    pub fn deduct(&mut self, kind: ResourceKind, amount: f64) {
        let entry = self.amounts.entry(kind).or_insert(0.0);
        *entry = (*entry - amount).max(0.0);
    }

    pub fn gold(&self) -> f64 {
        self.get(ResourceKind::Gold)
    }

    /// Check that every (kind, amount) pair is in stock
    pub fn can_afford(&self, costs: &[(ResourceKind, f64)]) -> bool {
        costs.iter().all(|(kind, amount)| self.get(*kind) >= *amount)
    }

    /// Deduct a full cost list; returns false untouched if unaffordable
    pub fn pay(&mut self, costs: &[(ResourceKind, f64)]) -> bool {
        if !self.can_afford(costs) {
            return false;
        }
        for (kind, amount) in costs {
            self.deduct(*kind, *amount);
        }
        true
    }

    /// Restore the storage invariant: non-currency kinds clamped to
    /// `[0, cap]`, gold clamped to `[0, inf)`.
    pub fn clamp_all(&mut self, cap: f64) {
        for kind in ResourceKind::ALL {
            let entry = self.amounts.entry(kind).or_insert(0.0);
            if *entry < 0.0 {
                *entry = 0.0;
            }
            if !kind.is_currency() && *entry > cap {
                *entry = cap;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_add_deduct() {
        let mut ledger = ResourceLedger::new();
        ledger.add(ResourceKind::Planks, 30.0);
        assert_eq!(ledger.get(ResourceKind::Planks), 30.0);

        ledger.deduct(ResourceKind::Planks, 10.0);
        assert_eq!(ledger.get(ResourceKind::Planks), 20.0);

        // Deduct never goes negative
        ledger.deduct(ResourceKind::Planks, 100.0);
        assert_eq!(ledger.get(ResourceKind::Planks), 0.0);
    }

    #[test]
    fn test_ledger_pay_is_atomic() {
        let mut ledger = ResourceLedger::new();
        ledger.set(ResourceKind::Planks, 50.0);
        ledger.set(ResourceKind::Gold, 5.0);

        // Gold is short: nothing is deducted
        let costs = [(ResourceKind::Planks, 20.0), (ResourceKind::Gold, 10.0)];
        assert!(!ledger.pay(&costs));
        assert_eq!(ledger.get(ResourceKind::Planks), 50.0);
        assert_eq!(ledger.get(ResourceKind::Gold), 5.0);

        ledger.set(ResourceKind::Gold, 10.0);
        assert!(ledger.pay(&costs));
        assert_eq!(ledger.get(ResourceKind::Planks), 30.0);
        assert_eq!(ledger.get(ResourceKind::Gold), 0.0);
    }

    #[test]
    fn test_clamp_all_spares_gold() {
        let mut ledger = ResourceLedger::new();
        ledger.set(ResourceKind::Bread, 900.0);
        ledger.set(ResourceKind::Gold, 90_000.0);
        ledger.clamp_all(500.0);
        assert_eq!(ledger.get(ResourceKind::Bread), 500.0);
        assert_eq!(ledger.get(ResourceKind::Gold), 90_000.0);
    }
}
