//! # Option Profit - basket payoff explorer
//!
//! Explore the profit/loss at expiry of a basket of option contracts on one
//! underlying across a range of hypothetical underlying prices.
//!
//! ## Overview
//!
//! Two pieces do the work:
//! - **Strike reconciliation**: calls and puts arrive as independent tables;
//!   only strikes quoted on both sides survive, aligned row for row
//! - **Payoff engine**: per-leg expiry profit over a price sweep, summed into
//!   the basket's net curve
//!
//! ## Key Components
//!
//! - **Data Fetching**: Yahoo Finance option chains, cached on disk
//! - **Chain**: reconciliation and the display window around the money
//! - **Session**: owns the current chain and basket; all edits go through it
//! - **Payoff**: sweep, per-leg curves, net curve, breakevens
//!
//! ## Usage
//!
//! ```rust,no_run
//! use option_profit::prelude::*;
//!
//! let fetcher = CachedFetcher::new(CacheConfig::default()).unwrap();
//! let expiry = fetcher.expirations("SPY").unwrap()[0];
//! let raw = fetcher.get_chain("SPY", expiry).unwrap();
//!
//! let mut session = Session::new(PayoffConfig::default());
//! session.load_chain(raw);
//! session.add(OptionType::Call, Direction::Buy, 3).unwrap();
//! session.add(OptionType::Call, Direction::Sell, 5).unwrap();
//!
//! if let Some(curve) = session.net_profit().unwrap() {
//!     println!("max profit: {:?}", curve.max_profit());
//! }
//! ```
//!
//! ## What This Does NOT Do
//!
//! - Value early exercise (payoffs are at expiry)
//! - Compute implied volatility or Greeks
//! - Persist baskets or mix underlyings

pub mod chain;
pub mod config;
pub mod core;
pub mod data;
pub mod payoff;
pub mod session;

/// Prelude with commonly used types
pub mod prelude {
    // Core types
    pub use crate::core::{
        Contract, Direction, OpcError, OpcResult, OptionQuote, OptionTable, OptionType,
        QuoteChain,
    };

    // Chain
    pub use crate::chain::{
        dual_listed_strikes, reconcile, strike_window, ReconciledChain, StrikeKey,
        STRIKE_WINDOW_CHOICES,
    };

    // Payoff
    pub use crate::payoff::{
        compute_net_profit, leg_payoff, long_payoff, LegCurve, PayoffConfig, PayoffCurve,
        PriceSweep, SweepConfig, WriterConvention, CONTRACT_MULTIPLIER,
    };

    // Data fetching
    pub use crate::data::{read_chain, write_chain, CacheConfig, CachedFetcher, ChainCache, YahooClient};

    pub use crate::config::{DisplayConfig, OpcConfig};
    pub use crate::session::{Basket, Session};
}

// Re-export main types at crate root
pub use crate::core::{OpcError, OpcResult};
pub use crate::session::Session;
