//! Core data types
//!
//! Defines fundamental types:
//! - OptionType / Direction: call/put, buy/sell
//! - OptionQuote / OptionTable / QuoteChain: raw market data
//! - Contract: one basket leg
//! - OpcError: error type shared by every module

pub mod contract;
pub mod error;
pub mod option;
pub mod quote;

pub use contract::*;
pub use error::*;
pub use option::*;
pub use quote::*;
