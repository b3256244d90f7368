//! Expiry payoff engine
//!
//! Profit at expiration for each basket leg over a [`PriceSweep`], and the
//! basket's net curve as their elementwise sum.
//!
//! For strike `k`, premium `c` and quantity `q`, a long leg earns
//! - call: `100·q·(x − k) − 100·q·c` when `x ≥ k`, else `−100·q·c`
//! - put:  `100·q·(k − x) − 100·q·c` when `x ≤ k`, else `−100·q·c`
//!
//! A written leg is derived from the long payoff according to the
//! [`WriterConvention`].
//!
//! Everything here is a pure function of its inputs and is recomputed in full
//! whenever the basket or the chain changes.

mod config;
mod curve;
mod sweep;

pub use config::*;
pub use curve::*;
pub use sweep::*;

use crate::core::{Contract, Direction};

/// Shares per option contract. Fixed for listed equity options.
pub const CONTRACT_MULTIPLIER: f64 = 100.0;

/// Profit of holding `leg` long, at underlying price `x`
pub fn long_payoff(leg: &Contract, x: f64) -> f64 {
    let q = f64::from(leg.quantity());
    let premium = CONTRACT_MULTIPLIER * q * leg.cost();

    if leg.side.is_exercised(x, leg.strike) {
        CONTRACT_MULTIPLIER * q * leg.side.phi() * (x - leg.strike) - premium
    } else {
        -premium
    }
}

/// Profit of `leg` in its own direction, at underlying price `x`
pub fn leg_payoff(leg: &Contract, x: f64, convention: WriterConvention) -> f64 {
    let long = long_payoff(leg, x);
    match (leg.direction, convention) {
        (Direction::Buy, _) => long,
        (Direction::Sell, WriterConvention::DoubledPremium) => {
            let q = f64::from(leg.quantity());
            -long - 2.0 * CONTRACT_MULTIPLIER * q * leg.cost()
        }
        (Direction::Sell, WriterConvention::Mirror) => -long,
    }
}

/// One leg's payoff at every sweep price
pub fn leg_curve(leg: &Contract, sweep: &PriceSweep, convention: WriterConvention) -> LegCurve {
    LegCurve {
        symbol: leg.symbol.clone(),
        label: leg.label(),
        values: sweep
            .prices()
            .iter()
            .map(|&x| leg_payoff(leg, x, convention))
            .collect(),
    }
}

/// Net profit of the basket over the sweep.
///
/// Returns `None` for an empty basket or an empty sweep: there is nothing to
/// plot, which is different from a flat zero line. Every leg counts, including
/// repeats of the same symbol.
pub fn compute_net_profit(
    basket: &[Contract],
    sweep: &PriceSweep,
    convention: WriterConvention,
) -> Option<PayoffCurve> {
    if basket.is_empty() || sweep.is_empty() {
        return None;
    }

    let legs: Vec<LegCurve> = basket
        .iter()
        .map(|leg| leg_curve(leg, sweep, convention))
        .collect();

    let mut net = vec![0.0; sweep.len()];
    for leg in &legs {
        for (total, value) in net.iter_mut().zip(&leg.values) {
            *total += value;
        }
    }

    Some(PayoffCurve {
        prices: sweep.prices().to_vec(),
        net,
        legs,
    })
}
