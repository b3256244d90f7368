//! Option chain reconciliation
//!
//! Turns a raw [`QuoteChain`] into a [`ReconciledChain`] whose call and put
//! tables share one ascending strike ladder, and selects the rows worth
//! displaying around the money.

mod reconcile;
mod window;

pub use reconcile::*;
pub use window::*;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{OptionQuote, OptionTable, OptionType, QuoteChain};

/// Calls and puts for one expiry, restricted to dual-listed strikes.
///
/// Row `i` of `calls` and row `i` of `puts` always refer to the same strike.
/// Deserialization goes through [`QuoteChain`] so stored tables are
/// reconciled again on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "QuoteChain")]
pub struct ReconciledChain {
    pub underlying: String,
    pub spot: f64,
    pub expiry: NaiveDate,
    calls: OptionTable,
    puts: OptionTable,
}

impl ReconciledChain {
    pub fn from_quote_chain(chain: QuoteChain) -> Self {
        let (calls, puts) = reconcile(chain.calls, chain.puts);
        Self {
            underlying: chain.underlying,
            spot: chain.spot,
            expiry: chain.expiry,
            calls,
            puts,
        }
    }

    pub fn calls(&self) -> &OptionTable {
        &self.calls
    }

    pub fn puts(&self) -> &OptionTable {
        &self.puts
    }

    pub fn table(&self, side: OptionType) -> &OptionTable {
        match side {
            OptionType::Call => &self.calls,
            OptionType::Put => &self.puts,
        }
    }

    pub fn row(&self, side: OptionType, index: usize) -> Option<&OptionQuote> {
        self.table(side).get(index)
    }

    /// Number of dual-listed strikes
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// No dual-listed strikes: a valid state that renders as an empty chain
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn strikes(&self) -> Vec<f64> {
        self.calls.strikes()
    }

    /// (lowest, highest) strike
    pub fn strike_range(&self) -> Option<(f64, f64)> {
        Some((self.calls.first_strike()?, self.calls.last_strike()?))
    }

    /// Rows to display around the money
    pub fn window(&self, num_strikes: usize) -> std::ops::Range<usize> {
        strike_window(&self.calls, num_strikes)
    }
}

impl From<QuoteChain> for ReconciledChain {
    fn from(chain: QuoteChain) -> Self {
        Self::from_quote_chain(chain)
    }
}
