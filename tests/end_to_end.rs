//! Full pipeline: raw chain -> reconciliation -> basket -> profit curve

use approx::assert_relative_eq;
use chrono::NaiveDate;
use option_profit::prelude::*;

fn expiry() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()
}

fn quote(symbol: &str, strike: f64, bid: f64, ask: f64, itm: bool) -> OptionQuote {
    OptionQuote::new(symbol, expiry(), strike, bid, ask).with_in_the_money(itm)
}

/// Calls at 95/100/105, puts missing 105
fn raw_chain() -> QuoteChain {
    let calls: OptionTable = vec![
        quote("XYZ250620C00095000", 95.0, 7.80, 8.10, true),
        quote("XYZ250620C00100000", 100.0, 4.30, 4.50, true),
        quote("XYZ250620C00105000", 105.0, 1.70, 1.90, false),
    ]
    .into();
    let puts: OptionTable = vec![
        quote("XYZ250620P00095000", 95.0, 0.90, 1.00, false),
        quote("XYZ250620P00100000", 100.0, 2.10, 2.30, false),
    ]
    .into();

    QuoteChain::new("XYZ", 101.0, expiry()).with_tables(calls, puts)
}

#[test]
fn reconcile_then_buy_call() {
    let mut session = Session::new(PayoffConfig::default());
    let chain = session.load_chain(raw_chain());

    assert_eq!(chain.calls().strikes(), vec![95.0, 100.0]);
    assert_eq!(chain.puts().strikes(), vec![95.0, 100.0]);

    let index = session.add(OptionType::Call, Direction::Buy, 1).unwrap();
    let leg = session.basket().get(index).unwrap();
    assert_eq!(leg.side, OptionType::Call);
    assert_eq!(leg.direction, Direction::Buy);
    assert_eq!(leg.strike, 100.0);
    assert_eq!(leg.cost(), 4.50);
    assert_eq!(leg.quantity(), 1);

    let sweep = session.sweep().unwrap();
    assert_eq!(sweep.start(), 47.5);
    assert_relative_eq!(*sweep.prices().last().unwrap(), 119.99, epsilon = 1e-9);

    let curve = session.net_profit().unwrap().unwrap();
    assert_relative_eq!(curve.value_at(110.0).unwrap(), 550.0, epsilon = 1e-6);
    assert_relative_eq!(curve.value_at(60.0).unwrap(), -450.0, epsilon = 1e-9);

    // breakeven at strike + premium
    let breakevens = curve.breakevens();
    assert_eq!(breakevens.len(), 1);
    assert_relative_eq!(breakevens[0], 104.5, epsilon = 1e-6);
}

#[test]
fn long_call_offsets_from_strike() {
    let mut session = Session::default();
    session.load_chain(raw_chain());
    session.add(OptionType::Call, Direction::Buy, 0).unwrap();

    let leg = &session.basket().legs()[0];
    let k = leg.strike;
    let c = leg.cost();
    assert_relative_eq!(long_payoff(leg, k + 10.0), 100.0 * 10.0 - 100.0 * c, epsilon = 1e-9);
    assert_relative_eq!(long_payoff(leg, k - 10.0), -100.0 * c, epsilon = 1e-9);
}

#[test]
fn mixed_basket_sums_leg_curves() {
    let mut session = Session::default();
    session.load_chain(raw_chain());
    session.add(OptionType::Call, Direction::Buy, 0).unwrap();
    session.add(OptionType::Call, Direction::Sell, 1).unwrap();
    session.add(OptionType::Put, Direction::Buy, 1).unwrap();
    session.add(OptionType::Put, Direction::Sell, 0).unwrap();

    let curve = session.net_profit().unwrap().unwrap();
    assert_eq!(curve.legs.len(), 4);
    for i in (0..curve.len()).step_by(97) {
        let sum: f64 = curve.legs.iter().map(|l| l.values[i]).sum();
        assert_relative_eq!(curve.net[i], sum, epsilon = 1e-9);
    }
}

#[test]
fn quantity_update_scales_leg() {
    let mut session = Session::default();
    session.load_chain(raw_chain());
    session.add(OptionType::Put, Direction::Buy, 1).unwrap();
    let before = session.net_profit().unwrap().unwrap();

    assert!(matches!(session.update_quantity(0, -1), Err(OpcError::InvalidQuantity(-1))));
    assert!(matches!(session.update_quantity(0, 0), Err(OpcError::InvalidQuantity(0))));
    session.update_quantity(0, 3).unwrap();

    let after = session.net_profit().unwrap().unwrap();
    for (b, a) in before.net.iter().zip(&after.net) {
        assert_relative_eq!(3.0 * b, *a, epsilon = 1e-9);
    }
}

#[test]
fn cost_update_moves_floor() {
    let mut session = Session::default();
    session.load_chain(raw_chain());
    session.add(OptionType::Call, Direction::Buy, 1).unwrap();
    session.update_quantity(0, 2).unwrap();

    let before = session.net_profit().unwrap().unwrap();
    assert_relative_eq!(before.value_at(60.0).unwrap(), -900.0, epsilon = 1e-9);

    session.update_cost(0, 5.00).unwrap();
    assert_eq!(session.basket().legs()[0].cost(), 5.00);

    // floor shifts by 100 * q * (5.00 - 4.50)
    let after = session.net_profit().unwrap().unwrap();
    assert_relative_eq!(after.value_at(60.0).unwrap(), -1000.0, epsilon = 1e-9);
    let (_, floor_before) = before.max_loss().unwrap();
    let (_, floor_after) = after.max_loss().unwrap();
    assert_relative_eq!(floor_after, floor_before - 100.0, epsilon = 1e-9);

    assert!(session.update_cost(5, 1.0).is_err());
}

#[test]
fn removing_last_leg_clears_curve() {
    let mut session = Session::default();
    session.load_chain(raw_chain());
    session.add(OptionType::Call, Direction::Sell, 0).unwrap();
    assert!(session.net_profit().unwrap().is_some());

    session.remove(0).unwrap();
    assert!(session.net_profit().unwrap().is_none());
}

#[test]
fn reconciliation_is_idempotent() {
    let raw = raw_chain();
    let (c1, p1) = reconcile(raw.calls.clone(), raw.puts.clone());
    let (c2, p2) = reconcile(c1.clone(), p1.clone());

    assert_eq!(c1, c2);
    assert_eq!(p1, p2);
}
