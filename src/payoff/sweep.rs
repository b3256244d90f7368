//! Hypothetical underlying prices at expiry

use serde::{Deserialize, Serialize};

use super::SweepConfig;
use crate::chain::ReconciledChain;
use crate::core::{OpcError, OpcResult};

/// Upper bound on sweep length; keeps a tiny step from exhausting memory
pub const MAX_SWEEP_POINTS: usize = 5_000_000;

/// Evenly spaced prices on `[start, stop)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSweep {
    start: f64,
    step: f64,
    prices: Vec<f64>,
}

impl PriceSweep {
    /// Half-open range, `start + i·step` for every point below `stop`
    pub fn new(start: f64, stop: f64, step: f64) -> OpcResult<Self> {
        if !(step.is_finite() && step > 0.0) {
            return Err(OpcError::invalid_input(format!("step must be positive, got {}", step)));
        }
        if !(start.is_finite() && stop.is_finite()) {
            return Err(OpcError::invalid_input("sweep bounds must be finite"));
        }

        // Shave off float noise so `stop` itself is never produced
        let n = if stop > start {
            let points = ((stop - start) / step - 1e-9).ceil();
            if !points.is_finite() || points > MAX_SWEEP_POINTS as f64 {
                return Err(OpcError::invalid_input(format!(
                    "sweep {}..{} step {} exceeds {} points",
                    start, stop, step, MAX_SWEEP_POINTS
                )));
            }
            points as usize
        } else {
            0
        };
        let prices = (0..n).map(|i| start + i as f64 * step).collect();

        Ok(Self { start, step, prices })
    }

    /// Sweep from `lower_factor × min_strike` to `upper_factor × max_strike`
    pub fn from_strike_range(min_strike: f64, max_strike: f64, config: &SweepConfig) -> OpcResult<Self> {
        config.validate()?;
        Self::new(
            min_strike * config.lower_factor,
            max_strike * config.upper_factor,
            config.step,
        )
    }

    /// Sweep over a reconciled chain's strikes; empty when the chain is empty
    pub fn for_chain(chain: &ReconciledChain, config: &SweepConfig) -> OpcResult<Self> {
        match chain.strike_range() {
            Some((lo, hi)) => Self::from_strike_range(lo, hi, config),
            None => Ok(Self::empty()),
        }
    }

    pub fn empty() -> Self {
        Self {
            start: 0.0,
            step: 0.0,
            prices: Vec::new(),
        }
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn step(&self) -> f64 {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payoff::MIN_SWEEP_STEP;
    use approx::assert_relative_eq;

    #[test]
    fn test_half_open_range() {
        let sweep = PriceSweep::new(47.5, 120.0, 0.01).unwrap();

        assert_eq!(sweep.len(), 7250);
        assert_eq!(sweep.prices()[0], 47.5);
        assert_relative_eq!(*sweep.prices().last().unwrap(), 119.99, epsilon = 1e-9);
    }

    #[test]
    fn test_from_strikes() {
        let sweep = PriceSweep::from_strike_range(95.0, 100.0, &SweepConfig::default()).unwrap();
        assert_eq!(sweep.start(), 47.5);
        assert_eq!(sweep.len(), 7250);

        let coarse = SweepConfig { step: 0.5, ..Default::default() };
        assert_eq!(PriceSweep::from_strike_range(95.0, 100.0, &coarse).unwrap().len(), 145);
    }

    #[test]
    fn test_degenerate_ranges() {
        assert!(PriceSweep::new(10.0, 10.0, 0.01).unwrap().is_empty());
        assert!(PriceSweep::new(10.0, 5.0, 0.01).unwrap().is_empty());
        assert!(PriceSweep::new(0.0, 1.0, 0.0).is_err());
        assert!(PriceSweep::new(f64::NAN, 1.0, 0.1).is_err());
    }

    #[test]
    fn test_tiny_step_is_an_error() {
        let err = PriceSweep::new(47.5, 120.0, 1e-16).unwrap_err();
        assert!(matches!(err, OpcError::InvalidInput(_)));

        // finite bounds, quotient overflows to infinity
        assert!(PriceSweep::new(-1e300, 1e300, 1e-300).is_err());

        let cfg = SweepConfig { step: 1e-16, ..Default::default() };
        assert!(cfg.validate().is_err());
        assert!(PriceSweep::from_strike_range(95.0, 100.0, &cfg).is_err());

        // the smallest configurable step stays under the point cap
        let fine = SweepConfig { step: MIN_SWEEP_STEP, ..Default::default() };
        let sweep = PriceSweep::from_strike_range(95.0, 100.0, &fine).unwrap();
        assert!(sweep.len() <= MAX_SWEEP_POINTS);
    }
}
