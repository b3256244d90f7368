//! Option Profit CLI
//!
//! Terminal front end: loads a chain, shows the strikes around the money,
//! builds a basket from `--leg` selections and prints the expiry profit
//! profile.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use option_profit::prelude::*;

/// One basket selection: `side:direction:row[:quantity[:cost]]`
#[derive(Debug, Clone)]
struct LegArg {
    side: OptionType,
    direction: Direction,
    row: usize,
    quantity: Option<i64>,
    cost: Option<f64>,
}

fn parse_leg(s: &str) -> Result<LegArg, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if !(3..=5).contains(&parts.len()) {
        return Err(format!("expected side:direction:row[:qty[:cost]], got '{}'", s));
    }

    let quantity = match parts.get(3) {
        Some(q) => Some(q.parse::<i64>().map_err(|e| format!("bad quantity '{}': {}", q, e))?),
        None => None,
    };
    let cost = match parts.get(4) {
        Some(c) => Some(c.parse::<f64>().map_err(|e| format!("bad cost '{}': {}", c, e))?),
        None => None,
    };

    Ok(LegArg {
        side: parts[0].parse()?,
        direction: parts[1].parse()?,
        row: parts[2].parse().map_err(|e| format!("bad row '{}': {}", parts[2], e))?,
        quantity,
        cost,
    })
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Option basket profit calculator")]
struct Args {
    /// Underlying symbol to fetch from Yahoo Finance
    #[arg(short, long)]
    symbol: Option<String>,

    /// Expiration date (YYYY-MM-DD); defaults to the nearest one
    #[arg(short, long)]
    expiry: Option<NaiveDate>,

    /// Load the chain from a JSON snapshot instead of fetching
    #[arg(long)]
    chain_file: Option<PathBuf>,

    /// Write the fetched raw chain to a JSON snapshot
    #[arg(long)]
    save_chain: Option<PathBuf>,

    /// Basket leg, e.g. call:buy:3 or put:sell:7:2:1.15 (repeatable)
    #[arg(short, long = "leg", value_parser = parse_leg)]
    legs: Vec<LegArg>,

    /// Strikes shown on each side of the money
    #[arg(long)]
    strikes: Option<usize>,

    /// Rows of the profit table
    #[arg(long, default_value_t = 15)]
    rows: usize,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_raw_chain(args: &Args, config: &OpcConfig) -> OpcResult<QuoteChain> {
    if let Some(path) = &args.chain_file {
        return read_chain(path);
    }

    let symbol = args
        .symbol
        .as_deref()
        .ok_or_else(|| OpcError::invalid_input("either --symbol or --chain-file is required"))?
        .to_uppercase();

    let fetcher = CachedFetcher::new(config.cache.clone())?;
    let expiry = match args.expiry {
        Some(expiry) => expiry,
        None => fetcher
            .expirations(&symbol)?
            .into_iter()
            .next()
            .ok_or_else(|| OpcError::data(format!("{} has no listed options", symbol)))?,
    };

    fetcher.get_chain(&symbol, expiry)
}

fn print_chain(chain: &ReconciledChain, num_strikes: usize) {
    println!(
        "{} {} (spot {:.2}): {} dual-listed strikes",
        chain.underlying,
        chain.expiry,
        chain.spot,
        chain.len()
    );
    if chain.is_empty() {
        println!("  (no strikes quoted on both sides)");
        return;
    }

    println!(
        "{:>4} | {:>7} {:>7} {:>7} | {:>8} | {:>7} {:>7} {:>7}",
        "row", "chg", "bid", "ask", "strike", "bid", "ask", "chg"
    );
    for i in chain.window(num_strikes) {
        let (Some(c), Some(p)) = (chain.calls().get(i), chain.puts().get(i)) else {
            continue;
        };
        let itm = |flag: bool| if flag { '*' } else { ' ' };
        println!(
            "{:>4} |{}{:>7.2} {:>7.2} {:>7.2} | {:>8.2} | {:>7.2} {:>7.2} {:>7.2}{}",
            i,
            itm(c.in_the_money),
            c.change,
            c.bid,
            c.ask,
            c.strike,
            p.bid,
            p.ask,
            p.change,
            itm(p.in_the_money),
        );
    }
    println!("  (* = in the money)\n");
}

fn apply_legs(session: &mut Session, legs: &[LegArg]) {
    for leg in legs {
        let index = match session.add(leg.side, leg.direction, leg.row) {
            Ok(index) => index,
            Err(e) if e.is_stale_selection() => {
                tracing::warn!("Ignoring {} {} row {}: {}", leg.direction, leg.side, leg.row, e);
                continue;
            }
            Err(e) => {
                tracing::warn!("Could not add leg: {}", e);
                continue;
            }
        };

        if let Some(q) = leg.quantity {
            if let Err(e) = session.update_quantity(index, q) {
                tracing::warn!("Keeping quantity 1: {}", e);
            }
        }
        if let Some(c) = leg.cost {
            if let Err(e) = session.update_cost(index, c) {
                tracing::warn!("Keeping quoted cost: {}", e);
            }
        }
    }
}

fn print_curve(session: &Session, rows: usize) -> OpcResult<()> {
    println!("Basket:");
    for (i, leg) in session.basket().legs().iter().enumerate() {
        println!(
            "  [{}] {:<4} {:<4} {:>8.2}  qty {:>3}  cost {:>7.2}  {}",
            i,
            leg.side,
            leg.direction,
            leg.strike,
            leg.quantity(),
            leg.cost(),
            leg.symbol
        );
    }

    let Some(curve) = session.net_profit()? else {
        println!("  (empty basket, nothing to plot)");
        return Ok(());
    };

    if let Some((x, y)) = curve.max_profit() {
        println!("\nMax profit: {:>10.2} at {:.2}", y, x);
    }
    if let Some((x, y)) = curve.max_loss() {
        println!("Max loss:   {:>10.2} at {:.2}", y, x);
    }
    let breakevens: Vec<String> = curve.breakevens().iter().map(|b| format!("{:.2}", b)).collect();
    println!("Breakevens: {}", if breakevens.is_empty() { "none".to_string() } else { breakevens.join(", ") });

    println!("\n{:>10} | {:>12}", "price", "profit");
    let stride = (curve.len() / rows.max(1)).max(1);
    for (x, y) in curve.points().step_by(stride) {
        println!("{:>10.2} | {:>12.2}", x, y);
    }
    Ok(())
}

fn run(args: Args) -> OpcResult<()> {
    let mut config = match &args.config {
        Some(path) => OpcConfig::from_json_file(path)?,
        None => OpcConfig::default(),
    };
    if let Some(n) = args.strikes {
        config.display.num_strikes = n;
    }
    config.validate()?;

    let raw = load_raw_chain(&args, &config)?;
    if let Some(path) = &args.save_chain {
        write_chain(path, &raw)?;
        tracing::info!("Saved raw chain to {:?}", path);
    }

    let mut session = Session::new(config.payoff.clone());
    let chain = session.load_chain(raw);
    print_chain(chain, config.display.num_strikes);

    apply_legs(&mut session, &args.legs);
    print_curve(&session, args.rows)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
