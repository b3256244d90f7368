//! Yahoo Finance data fetcher
//!
//! Supplies raw call/put tables per expiration from Yahoo Finance's
//! unofficial options API. Tables come back exactly as quoted: strikes are
//! not reconciled here.
//!
//! Note: Yahoo Finance data is delayed ~15 minutes and intended for personal
//! use.

use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::core::{OpcError, OpcResult, OptionQuote, OptionTable, QuoteChain};

/// Yahoo Finance API client
pub struct YahooClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooClient {
    pub fn new() -> OpcResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| OpcError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: "https://query1.finance.yahoo.com/v7/finance".to_string(),
        })
    }

    fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str, what: &str) -> OpcResult<T> {
        tracing::debug!("GET {}", url);
        self.client
            .get(url)
            .send()
            .map_err(|e| OpcError::Network(e.to_string()))?
            .error_for_status()
            .map_err(|e| OpcError::Network(e.to_string()))?
            .json()
            .map_err(|e| OpcError::data(format!("Failed to parse {}: {}", what, e)))
    }

    /// Get available option expiration dates
    pub fn get_expirations(&self, symbol: &str) -> OpcResult<Vec<NaiveDate>> {
        let url = format!("{}/options/{}", self.base_url, symbol);
        let response: YahooOptionsResponse = self.get_json(&url, "options")?;

        let chain = response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| OpcError::data(format!("No options data returned for {}", symbol)))?;

        let expiries: Vec<NaiveDate> = chain
            .expiration_dates
            .iter()
            .filter_map(|&ts| DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()))
            .collect();

        tracing::info!("{}: {} expirations available", symbol, expiries.len());
        Ok(expiries)
    }

    /// Get the raw call and put tables for one expiration
    pub fn get_option_chain(&self, symbol: &str, expiry: NaiveDate) -> OpcResult<QuoteChain> {
        let expiry_ts = expiry.and_time(NaiveTime::MIN).and_utc().timestamp();
        let url = format!("{}/options/{}?date={}", self.base_url, symbol, expiry_ts);
        let response: YahooOptionsResponse = self.get_json(&url, "options")?;

        let chain_data = response
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| OpcError::data(format!("No options data returned for {}", symbol)))?;

        let spot = chain_data.quote.regular_market_price;
        let (calls, puts) = match chain_data.options.into_iter().next() {
            Some(options) => (
                convert_table(&options.calls, symbol, expiry),
                convert_table(&options.puts, symbol, expiry),
            ),
            None => {
                tracing::warn!("{} {}: empty option chain", symbol, expiry);
                (OptionTable::default(), OptionTable::default())
            }
        };

        tracing::info!(
            "{} {}: {} calls, {} puts (spot {:.2})",
            symbol,
            expiry,
            calls.len(),
            puts.len(),
            spot
        );
        Ok(QuoteChain::new(symbol, spot, expiry).with_tables(calls, puts))
    }
}

fn convert_table(rows: &[YahooOptionData], underlying: &str, expiry: NaiveDate) -> OptionTable {
    rows.iter()
        .filter_map(|row| convert_option_quote(row, underlying, expiry))
        .collect()
}

/// Convert Yahoo option data to our quote format.
///
/// Rows without a strike are dropped. Missing bid/ask/change fields become
/// 0.0, the way Yahoo's own tables show an unquoted side.
fn convert_option_quote(
    data: &YahooOptionData,
    underlying: &str,
    expiry: NaiveDate,
) -> Option<OptionQuote> {
    let strike = data.strike?;

    let expiration = data
        .expiration
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.date_naive())
        .unwrap_or(expiry);

    let contract_symbol = data
        .contract_symbol
        .clone()
        .unwrap_or_else(|| format!("{}-{}-{}", underlying, expiry, strike));

    Some(OptionQuote {
        contract_symbol,
        expiration,
        strike,
        bid: data.bid.unwrap_or(0.0),
        ask: data.ask.unwrap_or(0.0),
        last_price: data.last_price.unwrap_or(0.0),
        change: data.change.unwrap_or(0.0),
        percent_change: data.percent_change.unwrap_or(0.0),
        in_the_money: data.in_the_money.unwrap_or(false),
        volume: data.volume.and_then(|v| u64::try_from(v).ok()),
        open_interest: data.open_interest.and_then(|oi| u64::try_from(oi).ok()),
    })
}

// Yahoo Finance API response structures

#[derive(Debug, Deserialize)]
struct YahooQuoteData {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: f64,
}

#[derive(Debug, Deserialize)]
struct YahooOptionsResponse {
    #[serde(rename = "optionChain")]
    option_chain: YahooOptionChain,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChain {
    result: Vec<YahooOptionChainData>,
}

#[derive(Debug, Deserialize)]
struct YahooOptionChainData {
    #[serde(rename = "expirationDates")]
    expiration_dates: Vec<i64>,
    quote: YahooQuoteData,
    options: Vec<YahooOptions>,
}

#[derive(Debug, Deserialize)]
struct YahooOptions {
    calls: Vec<YahooOptionData>,
    puts: Vec<YahooOptionData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooOptionData {
    contract_symbol: Option<String>,
    strike: Option<f64>,
    bid: Option<f64>,
    ask: Option<f64>,
    last_price: Option<f64>,
    change: Option<f64>,
    percent_change: Option<f64>,
    in_the_money: Option<bool>,
    volume: Option<i64>,
    open_interest: Option<i64>,
    expiration: Option<i64>,
}
