#![allow(dead_code)]

use smartcap::domain::error::SmartcapError;
use smartcap::domain::inputs::PortfolioInputs;
use smartcap::domain::market::{MarketSnapshot, RrgQuadrant, Stochastic};
use smartcap::domain::timeframe::TimeFrame;
use smartcap::domain::watchlist::Watchlist;
use smartcap::ports::market_data_port::MarketDataPort;
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory market data port. Records every requested symbol list.
pub struct MockMarketDataPort {
    pub snapshots: HashMap<String, MarketSnapshot>,
    pub errors: HashMap<String, String>,
    pub requests: RefCell<Vec<Vec<String>>>,
}

impl MockMarketDataPort {
    pub fn new() -> Self {
        Self {
            snapshots: HashMap::new(),
            errors: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn with_snapshot(mut self, snapshot: MarketSnapshot) -> Self {
        self.snapshots.insert(snapshot.symbol.clone(), snapshot);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockMarketDataPort {
    fn fetch_snapshots(&self, symbols: &[String]) -> Result<Vec<MarketSnapshot>, SmartcapError> {
        self.requests.borrow_mut().push(symbols.to_vec());
        symbols
            .iter()
            .map(|symbol| {
                if let Some(reason) = self.errors.get(symbol) {
                    return Err(SmartcapError::MarketData {
                        reason: reason.clone(),
                    });
                }
                self.snapshots
                    .get(symbol)
                    .cloned()
                    .ok_or_else(|| SmartcapError::NoData {
                        symbol: symbol.clone(),
                    })
            })
            .collect()
    }
}

/// Neutral snapshot: no MA or RSI points, flat stochastic and CCI.
pub fn make_snapshot(symbol: &str, price: f64, rrg: RrgQuadrant) -> MarketSnapshot {
    MarketSnapshot {
        symbol: symbol.to_string(),
        company_name: format!("{symbol} Corp"),
        price,
        change: 0.0,
        change_percent: 0.0,
        volume: 1_000.0,
        ma20: price,
        ma50: price,
        rsi: 50.0,
        rrg,
        stoch: Stochastic { k: 50.0, d: 50.0 },
        cci: 0.0,
        target_price_high: price * 1.1,
        target_price_low: price * 0.9,
        buy_volume: 600.0,
        sell_volume: 400.0,
        roi: 10.0,
        roe: 15.0,
        pe: 12.0,
        audit_status: "Big4 - Clean".to_string(),
        ceiling_price: price * 1.07,
        floor_price: price * 0.93,
        ref_price: price,
        bid1: price,
        ask1: price,
    }
}

/// Snapshot scoring the maximum 5.0: price > MA20 > MA50, RSI > 60, LEADING.
pub fn strong_snapshot(symbol: &str, price: f64) -> MarketSnapshot {
    MarketSnapshot {
        ma20: price * 0.95,
        ma50: price * 0.9,
        rsi: 65.0,
        ..make_snapshot(symbol, price, RrgQuadrant::Leading)
    }
}

/// Snapshot scoring 0.0: price < MA20 < MA50, RSI < 40, LAGGING.
pub fn weak_snapshot(symbol: &str, price: f64) -> MarketSnapshot {
    MarketSnapshot {
        ma20: price * 1.05,
        ma50: price * 1.1,
        rsi: 30.0,
        ..make_snapshot(symbol, price, RrgQuadrant::Lagging)
    }
}

pub fn make_inputs(capital: f64, symbols: &str, timeframe: Option<TimeFrame>) -> PortfolioInputs {
    PortfolioInputs {
        total_capital: capital,
        target_profit: 0.0,
        target_profit_percent: 0.0,
        symbols: Watchlist::parse(symbols).unwrap(),
        timeframe,
    }
}
