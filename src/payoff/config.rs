//! Configuration for the payoff engine

use serde::{Deserialize, Serialize};

use crate::core::{OpcError, OpcResult};

/// Smallest sweep step accepted from configuration
pub const MIN_SWEEP_STEP: f64 = 1e-4;

/// How a written (sold) leg's payoff is derived from the long payoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriterConvention {
    /// `-long(x) - 200·q·c`: the long payoff negated with the premium
    /// subtracted twice more. An expiring-worthless written leg shows `-100·q·c`.
    #[default]
    DoubledPremium,
    /// `-long(x)`: the writer's result mirrors the buyer's, so the writer
    /// keeps `100·q·c` when the option expires worthless.
    Mirror,
}

/// Price range swept for the profit curve, relative to the chain's strikes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Sweep starts at `lower_factor × lowest strike`
    /// Default: 0.5
    pub lower_factor: f64,

    /// Sweep stops (exclusive) at `upper_factor × highest strike`
    /// Default: 1.2
    pub upper_factor: f64,

    /// Distance between sweep prices
    /// Default: 0.01
    pub step: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            lower_factor: 0.5,
            upper_factor: 1.2,
            step: 0.01,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> OpcResult<()> {
        if !(self.step.is_finite() && self.step >= MIN_SWEEP_STEP) {
            return Err(OpcError::invalid_input(format!(
                "sweep step must be at least {}, got {}",
                MIN_SWEEP_STEP, self.step
            )));
        }
        if !(self.lower_factor.is_finite() && self.upper_factor.is_finite()) {
            return Err(OpcError::invalid_input("sweep factors must be finite"));
        }
        if self.lower_factor < 0.0 || self.upper_factor < self.lower_factor {
            return Err(OpcError::invalid_input(format!(
                "sweep factors must satisfy 0 <= lower <= upper, got {} / {}",
                self.lower_factor, self.upper_factor
            )));
        }
        Ok(())
    }
}

/// Payoff engine settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffConfig {
    pub sweep: SweepConfig,
    pub writer_convention: WriterConvention,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = PayoffConfig::default();
        assert_eq!(cfg.sweep.lower_factor, 0.5);
        assert_eq!(cfg.sweep.upper_factor, 1.2);
        assert_eq!(cfg.sweep.step, 0.01);
        assert_eq!(cfg.writer_convention, WriterConvention::DoubledPremium);
        assert!(cfg.sweep.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_sweep() {
        let zero_step = SweepConfig { step: 0.0, ..Default::default() };
        assert!(zero_step.validate().is_err());

        let tiny_step = SweepConfig { step: 1e-9, ..Default::default() };
        assert!(tiny_step.validate().is_err());

        let inverted = SweepConfig { lower_factor: 1.5, upper_factor: 1.2, ..Default::default() };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn test_convention_from_json() {
        let cfg: PayoffConfig = serde_json::from_str(
            r#"{"sweep": {"lower_factor": 0.8, "upper_factor": 1.1, "step": 0.05},
                "writer_convention": "mirror"}"#,
        )
        .unwrap();
        assert_eq!(cfg.writer_convention, WriterConvention::Mirror);
        assert_eq!(cfg.sweep.step, 0.05);
    }
}
