//! Profit curves produced by the payoff engine

use serde::{Deserialize, Serialize};

/// One leg's contribution over the sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegCurve {
    /// Contract symbol of the leg (not unique: repeated legs each get a curve)
    pub symbol: String,
    /// Display label, e.g. "Sell Put 95"
    pub label: String,
    pub values: Vec<f64>,
}

/// Net profit at expiry for each sweep price, plus the per-leg components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffCurve {
    pub prices: Vec<f64>,
    pub net: Vec<f64>,
    pub legs: Vec<LegCurve>,
}

impl PayoffCurve {
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// (price, net profit) pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.prices.iter().copied().zip(self.net.iter().copied())
    }

    /// Net profit at the sweep point nearest to `price`
    pub fn value_at(&self, price: f64) -> Option<f64> {
        let idx = self.prices.partition_point(|&p| p < price);
        let nearest = match (idx.checked_sub(1), self.prices.get(idx)) {
            (Some(below), Some(&above)) => {
                if (price - self.prices[below]).abs() <= (above - price).abs() {
                    below
                } else {
                    idx
                }
            }
            (Some(below), None) => below,
            (None, Some(_)) => idx,
            (None, None) => return None,
        };
        self.net.get(nearest).copied()
    }

    /// (price, profit) of the highest point on the sweep
    pub fn max_profit(&self) -> Option<(f64, f64)> {
        self.points().max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// (price, profit) of the lowest point on the sweep
    pub fn max_loss(&self) -> Option<(f64, f64)> {
        self.points().min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Prices where net profit crosses zero, linearly interpolated between
    /// sweep points
    pub fn breakevens(&self) -> Vec<f64> {
        let mut out = Vec::new();
        let pts: Vec<(f64, f64)> = self.points().collect();

        for pair in pts.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            if y0 == 0.0 {
                out.push(x0);
            } else if y0 * y1 < 0.0 {
                out.push(x0 + (x1 - x0) * (-y0) / (y1 - y0));
            }
        }
        if let Some(&(x, y)) = pts.last() {
            if y == 0.0 {
                out.push(x);
            }
        }
        out
    }
}
