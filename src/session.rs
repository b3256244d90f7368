//! Explorer session
//!
//! Owns the current reconciled chain and the basket. The presentation layer
//! holds the session and routes every user action through it; the chain
//! display and the profit curve are recomputed from it on request.

use serde::{Deserialize, Serialize};

use crate::chain::ReconciledChain;
use crate::core::{Contract, Direction, OpcError, OpcResult, OptionType, QuoteChain};
use crate::payoff::{compute_net_profit, PayoffConfig, PayoffCurve, PriceSweep};

/// Ordered basket legs. Order is kept for display only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Basket {
    legs: Vec<Contract>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, leg: Contract) -> usize {
        self.legs.push(leg);
        self.legs.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> OpcResult<Contract> {
        if index >= self.legs.len() {
            return Err(OpcError::stale(index, self.legs.len()));
        }
        Ok(self.legs.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Contract> {
        self.legs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> OpcResult<&mut Contract> {
        let len = self.legs.len();
        self.legs.get_mut(index).ok_or_else(|| OpcError::stale(index, len))
    }

    pub fn legs(&self) -> &[Contract] {
        &self.legs
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }
}

/// Single-writer state behind one explorer window
#[derive(Debug, Default)]
pub struct Session {
    config: PayoffConfig,
    chain: Option<ReconciledChain>,
    basket: Basket,
}

impl Session {
    pub fn new(config: PayoffConfig) -> Self {
        Self {
            config,
            chain: None,
            basket: Basket::new(),
        }
    }

    pub fn config(&self) -> &PayoffConfig {
        &self.config
    }

    /// Reconcile and install a freshly fetched chain.
    ///
    /// Legs already in the basket are snapshots and stay as they are; row
    /// indices held by the caller from the previous chain become stale.
    pub fn load_chain(&mut self, raw: QuoteChain) -> &ReconciledChain {
        let quotes = raw.total_quotes();
        let chain = ReconciledChain::from_quote_chain(raw);

        tracing::debug!(
            "Reconciled {} {} chain: {} quotes -> {} dual-listed strikes",
            chain.underlying,
            chain.expiry,
            quotes,
            chain.len()
        );
        if chain.is_empty() {
            tracing::warn!("No dual-listed strikes for {} {}", chain.underlying, chain.expiry);
        }

        self.chain.insert(chain)
    }

    pub fn chain(&self) -> Option<&ReconciledChain> {
        self.chain.as_ref()
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }

    /// Add a leg from row `row_index` of the current chain.
    ///
    /// Fails with `StaleSelection` if the row no longer exists; the caller
    /// should drop the selection.
    pub fn add(&mut self, side: OptionType, direction: Direction, row_index: usize) -> OpcResult<usize> {
        let chain = self.chain.as_ref().ok_or_else(|| OpcError::stale(row_index, 0))?;
        let leg = Contract::from_table(chain.table(side), side, direction, row_index)?;

        tracing::debug!("Basket add: {} @ {:.2}", leg.label(), leg.cost());
        Ok(self.basket.push(leg))
    }

    pub fn remove(&mut self, index: usize) -> OpcResult<Contract> {
        let leg = self.basket.remove(index)?;
        tracing::debug!("Basket remove: {}", leg.label());
        Ok(leg)
    }

    /// Rejected quantities leave the leg unchanged
    pub fn update_quantity(&mut self, index: usize, quantity: i64) -> OpcResult<()> {
        self.basket.get_mut(index)?.update_quantity(quantity)
    }

    pub fn update_cost(&mut self, index: usize, cost: f64) -> OpcResult<()> {
        self.basket.get_mut(index)?.update_cost(cost);
        Ok(())
    }

    /// Price sweep for the current chain; empty without a chain
    pub fn sweep(&self) -> OpcResult<PriceSweep> {
        match &self.chain {
            Some(chain) => PriceSweep::for_chain(chain, &self.config.sweep),
            None => Ok(PriceSweep::empty()),
        }
    }

    /// Net profit curve of the current basket, `None` when there is nothing
    /// to plot
    pub fn net_profit(&self) -> OpcResult<Option<PayoffCurve>> {
        let sweep = self.sweep()?;
        Ok(compute_net_profit(
            self.basket.legs(),
            &sweep,
            self.config.writer_convention,
        ))
    }
}
