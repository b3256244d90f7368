//! Strike reconciliation
//!
//! Calls and puts for one expiry are fetched as independent tables and an
//! illiquid strike is often quoted on one side only. Reconciliation keeps the
//! dual-listed strikes and aligns both tables row for row.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::core::{OptionQuote, OptionTable};

/// Strikes are matched on a fixed-point grid of this many units per dollar.
pub const STRIKE_SCALE: f64 = 10_000.0;

/// Fixed-point strike used for exact matching across tables.
///
/// Two floating-point strikes that round to the same 1e-4 tick are the same
/// strike, whatever source they were parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StrikeKey(i64);

impl StrikeKey {
    /// `None` for NaN/infinite strikes or strikes outside the grid
    pub fn from_strike(strike: f64) -> Option<Self> {
        if !strike.is_finite() {
            return None;
        }
        let ticks = (strike * STRIKE_SCALE).round();
        if ticks.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self(ticks as i64))
    }

    /// Canonical price for this key (the double nearest to the decimal strike)
    pub fn strike(&self) -> f64 {
        self.0 as f64 / STRIKE_SCALE
    }
}

/// Key every row by strike, keeping the first row for a repeated strike.
fn index_by_strike(table: OptionTable) -> BTreeMap<StrikeKey, OptionQuote> {
    let mut keyed = BTreeMap::new();
    for row in table.into_rows() {
        if let Some(key) = StrikeKey::from_strike(row.strike) {
            keyed.entry(key).or_insert(row);
        }
    }
    keyed
}

fn keep_dual_listed(
    keyed: BTreeMap<StrikeKey, OptionQuote>,
    dual: &BTreeSet<StrikeKey>,
) -> OptionTable {
    keyed
        .into_iter()
        .filter(|(key, _)| dual.contains(key))
        .map(|(key, mut row)| {
            row.strike = key.strike();
            row
        })
        .collect()
}

/// Strikes present in both tables, ascending
pub fn dual_listed_strikes(calls: &OptionTable, puts: &OptionTable) -> Vec<f64> {
    let call_keys: BTreeSet<StrikeKey> = calls
        .iter()
        .filter_map(|q| StrikeKey::from_strike(q.strike))
        .collect();
    let put_keys: BTreeSet<StrikeKey> = puts
        .iter()
        .filter_map(|q| StrikeKey::from_strike(q.strike))
        .collect();

    call_keys.intersection(&put_keys).map(|k| k.strike()).collect()
}

/// Restrict both tables to dual-listed strikes, ascending, row-aligned.
///
/// After this, `calls[i].strike == puts[i].strike` for every `i`. If no strike
/// is dual-listed both tables come back empty.
pub fn reconcile(calls: OptionTable, puts: OptionTable) -> (OptionTable, OptionTable) {
    let calls = index_by_strike(calls);
    let puts = index_by_strike(puts);

    let all: BTreeSet<StrikeKey> = calls.keys().chain(puts.keys()).copied().collect();
    let dual: BTreeSet<StrikeKey> = all
        .into_iter()
        .filter(|k| calls.contains_key(k) && puts.contains_key(k))
        .collect();

    (keep_dual_listed(calls, &dual), keep_dual_listed(puts, &dual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn table(strikes: &[f64]) -> OptionTable {
        let exp = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        strikes
            .iter()
            .map(|&k| OptionQuote::new(format!("K{}", k), exp, k, 1.0, 1.2))
            .collect()
    }

    #[test]
    fn test_drops_one_sided_strikes() {
        let (calls, puts) = reconcile(table(&[95.0, 100.0, 105.0]), table(&[90.0, 95.0, 100.0]));

        assert_eq!(calls.strikes(), vec![95.0, 100.0]);
        assert_eq!(puts.strikes(), vec![95.0, 100.0]);
    }

    #[test]
    fn test_aligns_unsorted_tables() {
        let (calls, puts) = reconcile(
            table(&[110.0, 100.0, 105.0, 95.0]),
            table(&[95.0, 105.0, 100.0, 110.0, 120.0]),
        );

        assert_eq!(calls.strikes(), vec![95.0, 100.0, 105.0, 110.0]);
        for (c, p) in calls.iter().zip(puts.iter()) {
            assert_eq!(c.strike, p.strike);
        }
    }

    #[test]
    fn test_empty_and_disjoint() {
        let (calls, puts) = reconcile(OptionTable::default(), table(&[95.0, 100.0]));
        assert!(calls.is_empty() && puts.is_empty());

        let (calls, puts) = reconcile(table(&[95.0]), table(&[100.0]));
        assert!(calls.is_empty() && puts.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let (c1, p1) = reconcile(table(&[97.5, 100.0, 102.5]), table(&[100.0, 102.5, 105.0]));
        let (c2, p2) = reconcile(c1.clone(), p1.clone());

        assert_eq!(c1, c2);
        assert_eq!(p1, p2);
    }

    #[test]
    fn test_float_noise_still_matches() {
        // 0.1 + 0.2 != 0.3 in binary floating point
        let (calls, puts) = reconcile(table(&[0.1 + 0.2, 1.0]), table(&[0.3, 1.0]));

        assert_eq!(calls.len(), 2);
        assert_eq!(calls.strikes(), puts.strikes());
        assert_eq!(calls.first_strike(), Some(0.3));
    }

    #[test]
    fn test_non_finite_strikes_never_match() {
        let (calls, puts) = reconcile(table(&[f64::NAN, 100.0]), table(&[f64::NAN, 100.0]));
        assert_eq!(calls.strikes(), vec![100.0]);
        assert_eq!(puts.strikes(), vec![100.0]);
    }

    #[test]
    fn test_repeated_strike_keeps_first_row() {
        let exp = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let calls: OptionTable = vec![
            OptionQuote::new("first", exp, 100.0, 1.0, 1.1),
            OptionQuote::new("second", exp, 100.0, 2.0, 2.1),
        ]
        .into();

        let (calls, puts) = reconcile(calls, table(&[100.0]));
        assert_eq!(calls.len(), 1);
        assert_eq!(puts.len(), 1);
        assert_eq!(calls.get(0).unwrap().contract_symbol, "first");
    }

    #[test]
    fn test_dual_listed_strikes() {
        let strikes = dual_listed_strikes(&table(&[105.0, 95.0, 100.0]), &table(&[100.0, 95.0]));
        assert_eq!(strikes, vec![95.0, 100.0]);
    }
}
