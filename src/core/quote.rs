//! Option quote data
//!
//! Raw market quotes as supplied by the market-data collaborator, grouped into
//! per-side tables and per-expiry chains.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One market quote for a single strike on one side of the chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionQuote {
    /// Exchange contract symbol (e.g. "QQQ250620C00500000")
    pub contract_symbol: String,
    /// Expiration date
    pub expiration: NaiveDate,
    /// Strike price
    pub strike: f64,
    /// Bid price
    pub bid: f64,
    /// Ask price
    pub ask: f64,
    /// Last traded price
    pub last_price: f64,
    /// Absolute change since previous close
    pub change: f64,
    /// Percent change since previous close
    pub percent_change: f64,
    /// Whether the contract is currently in the money
    pub in_the_money: bool,
    /// Trading volume
    #[serde(default)]
    pub volume: Option<u64>,
    /// Open interest
    #[serde(default)]
    pub open_interest: Option<u64>,
}

impl OptionQuote {
    /// Quote with only the fields the core needs; the rest zeroed
    pub fn new(
        contract_symbol: impl Into<String>,
        expiration: NaiveDate,
        strike: f64,
        bid: f64,
        ask: f64,
    ) -> Self {
        Self {
            contract_symbol: contract_symbol.into(),
            expiration,
            strike,
            bid,
            ask,
            last_price: 0.0,
            change: 0.0,
            percent_change: 0.0,
            in_the_money: false,
            volume: None,
            open_interest: None,
        }
    }

    pub fn with_in_the_money(mut self, itm: bool) -> Self {
        self.in_the_money = itm;
        self
    }
}

/// Ordered quotes for one side (calls or puts) of one expiration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionTable {
    rows: Vec<OptionQuote>,
}

impl OptionTable {
    pub fn new(rows: Vec<OptionQuote>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OptionQuote> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[OptionQuote] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OptionQuote> {
        self.rows.iter()
    }

    pub fn push(&mut self, quote: OptionQuote) {
        self.rows.push(quote);
    }

    /// Strikes in row order
    pub fn strikes(&self) -> Vec<f64> {
        self.rows.iter().map(|q| q.strike).collect()
    }

    pub fn first_strike(&self) -> Option<f64> {
        self.rows.first().map(|q| q.strike)
    }

    pub fn last_strike(&self) -> Option<f64> {
        self.rows.last().map(|q| q.strike)
    }

    pub fn into_rows(self) -> Vec<OptionQuote> {
        self.rows
    }
}

impl From<Vec<OptionQuote>> for OptionTable {
    fn from(rows: Vec<OptionQuote>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<OptionQuote> for OptionTable {
    fn from_iter<I: IntoIterator<Item = OptionQuote>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a OptionTable {
    type Item = &'a OptionQuote;
    type IntoIter = std::slice::Iter<'a, OptionQuote>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Raw (unreconciled) chain of quotes for a single expiry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteChain {
    /// Underlying symbol
    pub underlying: String,
    /// Underlying spot price at fetch time
    pub spot: f64,
    /// Expiry date
    pub expiry: NaiveDate,
    /// Call quotes
    pub calls: OptionTable,
    /// Put quotes
    pub puts: OptionTable,
    /// Timestamp
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl QuoteChain {
    pub fn new(underlying: impl Into<String>, spot: f64, expiry: NaiveDate) -> Self {
        Self {
            underlying: underlying.into(),
            spot,
            expiry,
            calls: OptionTable::default(),
            puts: OptionTable::default(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_tables(mut self, calls: OptionTable, puts: OptionTable) -> Self {
        self.calls = calls;
        self.puts = puts;
        self
    }

    /// Add a call quote
    pub fn add_call(&mut self, quote: OptionQuote) {
        self.calls.push(quote);
    }

    /// Add a put quote
    pub fn add_put(&mut self, quote: OptionQuote) {
        self.puts.push(quote);
    }

    /// Total number of quotes
    pub fn total_quotes(&self) -> usize {
        self.calls.len() + self.puts.len()
    }
}
