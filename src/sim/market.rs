//! Market pricing - scarcity-driven quotes with a periodic recompute
//!
//! Repricing runs on a throttle, not every tick, and reads stock levels
//! before production mutates them. Manual trades nudge quotes immediately;
//! the next periodic recompute overwrites those nudges unconditionally.

use rand::Rng;
use tracing::debug;

use crate::core::config::SimConfig;
use crate::core::types::ResourceKind;
use crate::state::{PriceTrend, WorldState};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Recompute every quote from current stock scarcity
///
/// Scarcity targets a comfortable stock of ~200: below that prices climb,
/// far above it they sag, clamped to [0.5, 2.5] of base.
pub fn reprice(state: &mut WorldState, _config: &SimConfig) {
    for kind in ResourceKind::TRADEABLE {
        let stock = state.ledger.get(kind);
        let scarcity = (200.0 / (stock + 50.0)).clamp(0.5, 2.5);
        let variance = 0.9 + state.rng.gen::<f64>() * 0.2;

        let Some(price) = state.market_prices.get_mut(&kind) else {
            continue;
        };
        let reference = price.base * scarcity * variance;
        let new_buy = round2(reference * 1.3);
        let new_sell = round2(reference * 0.7);

        price.trend = if new_buy > price.current_buy {
            PriceTrend::Up
        } else if new_buy < price.current_buy {
            PriceTrend::Down
        } else {
            PriceTrend::Stable
        };
        price.current_buy = new_buy;
        price.current_sell = new_sell;

        debug!(?kind, stock, new_buy, new_sell, "repriced");
    }
}

/// Immediate demand pressure after a manual purchase
pub fn nudge_after_buy(state: &mut WorldState, kind: ResourceKind) {
    if let Some(price) = state.market_prices.get_mut(&kind) {
        price.current_buy += 0.05;
        price.current_sell += 0.03;
    }
}

/// Immediate supply pressure after a manual sale
///
/// The sell quote floors at the configured epsilon and the buy quote floors
/// just above it, so the spread never collapses no matter how hard a
/// resource is dumped.
pub fn nudge_after_sell(state: &mut WorldState, kind: ResourceKind, config: &SimConfig) {
    if let Some(price) = state.market_prices.get_mut(&kind) {
        price.current_sell = (price.current_sell - 0.03).max(config.sell_price_floor);
        price.current_buy = (price.current_buy - 0.05).max(price.current_sell + 0.01);
    }
}
