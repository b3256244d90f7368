//! Basket legs
//!
//! A [`Contract`] is a snapshot of one chain row taken when the user selects a
//! bid or ask. Later changes to the chain never reach back into it.

use serde::{Deserialize, Serialize};

use super::error::{OpcError, OpcResult};
use super::option::{Direction, OptionType};
use super::quote::OptionTable;

/// One leg of a basket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    /// Call or put
    pub side: OptionType,
    /// Bought or written
    pub direction: Direction,
    /// Strike price
    pub strike: f64,
    /// Contract symbol of the row the leg was created from
    pub symbol: String,
    /// Premium per share (editable fill price)
    cost: f64,
    /// Number of contracts, always >= 1
    quantity: u32,
}

impl Contract {
    /// Build a leg directly, quantity 1
    pub fn new(
        side: OptionType,
        direction: Direction,
        strike: f64,
        symbol: impl Into<String>,
        cost: f64,
    ) -> Self {
        Self {
            side,
            direction,
            strike,
            symbol: symbol.into(),
            cost,
            quantity: 1,
        }
    }

    /// Build a leg from row `row_index` of a reconciled table.
    ///
    /// The premium is the price the action would fill at: the bid when
    /// writing, the ask when buying.
    pub fn from_table(
        table: &OptionTable,
        side: OptionType,
        direction: Direction,
        row_index: usize,
    ) -> OpcResult<Self> {
        let row = table
            .get(row_index)
            .ok_or_else(|| OpcError::stale(row_index, table.len()))?;

        let cost = match direction {
            Direction::Sell => row.bid,
            Direction::Buy => row.ask,
        };

        Ok(Self::new(side, direction, row.strike, row.contract_symbol.clone(), cost))
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Set the number of contracts. Rejects anything below 1 and keeps the
    /// previous quantity.
    pub fn update_quantity(&mut self, quantity: i64) -> OpcResult<()> {
        match u32::try_from(quantity) {
            Ok(q) if q > 0 => {
                self.quantity = q;
                Ok(())
            }
            _ => Err(OpcError::InvalidQuantity(quantity)),
        }
    }

    /// Correct the fill price. Negative premiums are credits and are accepted.
    pub fn update_cost(&mut self, cost: f64) {
        self.cost = cost;
    }

    /// Display label, e.g. "Buy Call 100"
    pub fn label(&self) -> String {
        format!("{} {} {}", self.direction, self.side, self.strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionQuote;
    use chrono::NaiveDate;

    fn table() -> OptionTable {
        let exp = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        vec![
            OptionQuote::new("C95", exp, 95.0, 7.80, 8.10),
            OptionQuote::new("C100", exp, 100.0, 4.30, 4.50),
        ]
        .into()
    }

    #[test]
    fn test_premium_seeded_from_bid_or_ask() {
        let buy = Contract::from_table(&table(), OptionType::Call, Direction::Buy, 1).unwrap();
        assert_eq!(buy.strike, 100.0);
        assert_eq!(buy.cost(), 4.50);
        assert_eq!(buy.quantity(), 1);
        assert_eq!(buy.symbol, "C100");

        let sell = Contract::from_table(&table(), OptionType::Call, Direction::Sell, 1).unwrap();
        assert_eq!(sell.cost(), 4.30);
    }

    #[test]
    fn test_stale_row_index() {
        let err = Contract::from_table(&table(), OptionType::Put, Direction::Buy, 2).unwrap_err();
        assert!(err.is_stale_selection());

        let empty = OptionTable::default();
        assert!(Contract::from_table(&empty, OptionType::Put, Direction::Buy, 0).is_err());
    }

    #[test]
    fn test_snapshot_is_independent_of_table() {
        let mut t = table();
        let leg = Contract::from_table(&t, OptionType::Call, Direction::Buy, 0).unwrap();
        t = OptionTable::default();

        assert!(t.is_empty());
        assert_eq!(leg.strike, 95.0);
        assert_eq!(leg.cost(), 8.10);
    }

    #[test]
    fn test_update_quantity() {
        let mut leg = Contract::new(OptionType::Call, Direction::Buy, 100.0, "C100", 4.5);

        assert!(matches!(leg.update_quantity(0), Err(OpcError::InvalidQuantity(0))));
        assert!(matches!(leg.update_quantity(-1), Err(OpcError::InvalidQuantity(-1))));
        assert!(leg.update_quantity(i64::from(u32::MAX) + 1).is_err());
        assert_eq!(leg.quantity(), 1);

        leg.update_quantity(3).unwrap();
        assert_eq!(leg.quantity(), 3);
    }

    #[test]
    fn test_update_cost_accepts_credit() {
        let mut leg = Contract::new(OptionType::Put, Direction::Sell, 95.0, "P95", 1.0);
        leg.update_cost(-0.25);
        assert_eq!(leg.cost(), -0.25);
        assert_eq!(leg.label(), "Sell Put 95");
    }
}
