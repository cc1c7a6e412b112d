//! Simulated market data provider.
//!
//! Serves a fixed table of HOSE listings. While the session is open the
//! matched price wanders around the reference (2% chance each of sitting on
//! the ceiling or floor); when closed the price is a per-symbol constant
//! closing factor of the reference. Indicators are drawn fresh every fetch.

use crate::domain::error::SmartcapError;
use crate::domain::market::{MarketSnapshot, RrgQuadrant, Stochastic};
use crate::domain::price_band::{PriceBand, round_to_tick};
use crate::domain::session::{is_trading_window, market_now};
use crate::ports::market_data_port::MarketDataPort;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    /// Follow the exchange clock.
    Auto,
    Open,
    Closed,
}

impl FromStr for ClockMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ClockMode::Auto),
            "open" => Ok(ClockMode::Open),
            "closed" => Ok(ClockMode::Closed),
            other => Err(format!("unknown clock mode '{other}' (expected auto, open or closed)")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Listing {
    pub symbol: &'static str,
    pub name: &'static str,
    pub ref_price: f64,
    pub rrg: RrgQuadrant,
    pub roi: f64,
    pub roe: f64,
    pub pe: f64,
    pub audit: &'static str,
}

const fn listing(
    symbol: &'static str,
    name: &'static str,
    ref_price: f64,
    rrg: RrgQuadrant,
    roi: f64,
    roe: f64,
    pe: f64,
    audit: &'static str,
) -> Listing {
    Listing {
        symbol,
        name,
        ref_price,
        rrg,
        roi,
        roe,
        pe,
        audit,
    }
}

use RrgQuadrant::{Improving, Lagging, Leading, Weakening};

pub const LISTINGS: [Listing; 24] = [
    listing("FPT", "FPT Corporation", 104_100.0, Leading, 22.5, 28.1, 18.2, "Big4 - Clean"),
    listing("HPG", "Hoa Phat Group", 27_000.0, Improving, 12.8, 15.4, 11.5, "Big4 - Clean"),
    listing("GAS", "PetroVietnam Gas", 114_100.0, Weakening, 18.2, 21.0, 14.8, "A&C - Clean"),
    listing("BID", "BIDV", 51_500.0, Leading, 1.2, 18.5, 12.1, "KPMG - Clean"),
    listing("PLX", "Petrolimex", 56_800.0, Lagging, 8.5, 11.2, 15.6, "Big4 - Clean"),
    listing("VND", "VNDIRECT Securities", 18_750.0, Improving, 10.1, 14.2, 9.8, "Deloitte - Clean"),
    listing("VIC", "Vingroup", 41_500.0, Lagging, 4.2, 6.8, 28.4, "Big4 - Clean"),
    listing("VNM", "Vinamilk", 67_500.0, Improving, 24.1, 32.5, 16.2, "Big4 - Clean"),
    listing("SSI", "SSI Securities", 33_200.0, Leading, 11.4, 15.8, 12.5, "Big4 - Clean"),
    listing("TCB", "Techcombank", 23_800.0, Leading, 2.8, 21.4, 7.2, "Big4 - Clean"),
    listing("VCB", "Vietcombank", 92_500.0, Leading, 3.1, 24.8, 14.5, "Big4 - Clean"),
    listing("DGC", "Duc Giang Chemicals", 121_000.0, Leading, 35.4, 42.1, 8.4, "Clean"),
    listing("MWG", "Mobile World", 62_500.0, Weakening, 9.8, 14.1, 22.4, "PwC - Clean"),
    listing("FRT", "FPT Digital Retail", 155_000.0, Leading, 14.2, 18.5, 45.2, "Big4 - Clean"),
    listing("CTG", "VietinBank", 34_500.0, Leading, 1.1, 17.2, 8.9, "Big4 - Clean"),
    listing("DBC", "Dabaco Group", 31_200.0, Improving, 12.1, 16.4, 10.5, "Clean"),
    listing("VHM", "Vinhomes", 42_000.0, Lagging, 15.8, 22.4, 5.2, "Big4 - Clean"),
    listing("MSN", "Masan Group", 78_000.0, Improving, 6.4, 9.1, 35.2, "Big4 - Clean"),
    listing("GVR", "Vietnam Rubber Group", 32_500.0, Leading, 8.2, 11.5, 18.4, "Clean"),
    listing("REE", "REE Corporation", 64_000.0, Improving, 14.5, 19.2, 10.1, "Clean"),
    listing("CTR", "Viettel Construction", 118_000.0, Leading, 16.8, 22.5, 19.4, "Big4 - Clean"),
    listing("VTP", "Viettel Post", 89_000.0, Leading, 15.1, 20.4, 22.1, "Big4 - Clean"),
    listing("HAH", "Hai An Transport", 45_000.0, Improving, 18.4, 24.1, 7.5, "Clean"),
    listing("SCS", "Saigon Cargo Service", 82_000.0, Leading, 45.2, 52.4, 11.2, "Clean"),
];

/// Quote used for symbols outside the table.
pub const UNLISTED: Listing = listing(
    "",
    "Unlisted company",
    50_000.0,
    Lagging,
    10.0,
    12.0,
    15.0,
    "N/A",
);

pub fn find_listing(symbol: &str) -> Option<&'static Listing> {
    LISTINGS.iter().find(|l| l.symbol == symbol)
}

/// Closing price factor in [0.98, 1.01], fixed per symbol.
pub fn closing_factor(symbol: &str) -> f64 {
    let hash: u32 = symbol.bytes().take(3).map(u32::from).sum();
    0.98 + (hash % 4) as f64 / 100.0
}

pub struct MockMarketAdapter {
    clock: ClockMode,
    rng: RefCell<StdRng>,
}

impl MockMarketAdapter {
    pub fn new(clock: ClockMode) -> Self {
        Self {
            clock,
            rng: RefCell::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(clock: ClockMode, seed: u64) -> Self {
        Self {
            clock,
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn market_open(&self) -> bool {
        match self.clock {
            ClockMode::Auto => is_trading_window(market_now()),
            ClockMode::Open => true,
            ClockMode::Closed => false,
        }
    }

    fn quote(&self, symbol: &str, open: bool) -> MarketSnapshot {
        let symbol = symbol.trim().to_uppercase();
        let listing = find_listing(&symbol).unwrap_or(&UNLISTED);
        let band = PriceBand::from_reference(listing.ref_price);
        let mut rng = self.rng.borrow_mut();

        let raw_price = if open {
            let roll: f64 = rng.r#gen();
            if roll > 0.98 {
                band.ceiling
            } else if roll < 0.02 {
                band.floor
            } else {
                band.reference * (0.97 + rng.r#gen::<f64>() * 0.06)
            }
        } else {
            band.reference * closing_factor(&symbol)
        };
        let price = round_to_tick(raw_price);

        let (bid_factor, ask_factor) = if open {
            (
                0.998 + rng.r#gen::<f64>() * 0.001,
                1.001 + rng.r#gen::<f64>() * 0.001,
            )
        } else {
            (0.999, 1.001)
        };

        let (buy_volume, sell_volume) = if open {
            (
                rng.r#gen::<f64>() * 1_000_000.0,
                rng.r#gen::<f64>() * 1_000_000.0,
            )
        } else {
            (500_000.0, 400_000.0)
        };

        let change = price - band.reference;

        MarketSnapshot {
            symbol,
            company_name: listing.name.to_string(),
            price,
            change,
            change_percent: change / band.reference * 100.0,
            volume: buy_volume + sell_volume,
            ma20: price * (0.95 + rng.r#gen::<f64>() * 0.1),
            ma50: price * (0.9 + rng.r#gen::<f64>() * 0.1),
            rsi: 30.0 + rng.r#gen::<f64>() * 50.0,
            rrg: listing.rrg,
            stoch: Stochastic {
                k: rng.r#gen::<f64>() * 100.0,
                d: rng.r#gen::<f64>() * 100.0,
            },
            cci: (rng.r#gen::<f64>() - 0.5) * 300.0,
            target_price_high: price * (1.1 + rng.r#gen::<f64>() * 0.05),
            target_price_low: price * (0.9 - rng.r#gen::<f64>() * 0.05),
            buy_volume,
            sell_volume,
            roi: listing.roi,
            roe: listing.roe,
            pe: listing.pe,
            audit_status: listing.audit.to_string(),
            ceiling_price: band.ceiling,
            floor_price: band.floor,
            ref_price: band.reference,
            bid1: round_to_tick(price * bid_factor),
            ask1: round_to_tick(price * ask_factor),
        }
    }
}

impl MarketDataPort for MockMarketAdapter {
    fn fetch_snapshots(&self, symbols: &[String]) -> Result<Vec<MarketSnapshot>, SmartcapError> {
        let open = self.market_open();
        tracing::debug!(symbols = symbols.len(), open, "simulating quotes");
        Ok(symbols.iter().map(|s| self.quote(s, open)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetch(adapter: &MockMarketAdapter, symbols: &[&str]) -> Vec<MarketSnapshot> {
        let symbols: Vec<String> = symbols.iter().map(|s| s.to_string()).collect();
        adapter.fetch_snapshots(&symbols).unwrap()
    }

    #[test]
    fn closed_session_price_is_stable() {
        let adapter = MockMarketAdapter::with_seed(ClockMode::Closed, 1);
        let a = fetch(&adapter, &["FPT"]);
        let b = fetch(&adapter, &["FPT"]);
        assert_eq!(a[0].price, b[0].price);
        // F(70) + P(80) + T(84) = 234, 234 % 4 = 2 -> 1.00
        assert_eq!(a[0].price, 104_100.0);
        assert_eq!(a[0].buy_volume, 500_000.0);
        assert_eq!(a[0].sell_volume, 400_000.0);
        assert_eq!(a[0].volume, 900_000.0);
    }

    #[test]
    fn closing_factor_range() {
        for l in LISTINGS {
            let f = closing_factor(l.symbol);
            assert!((0.979..=1.011).contains(&f), "{} -> {}", l.symbol, f);
        }
    }

    #[test]
    fn open_session_stays_within_band() {
        let adapter = MockMarketAdapter::with_seed(ClockMode::Open, 42);
        for _ in 0..200 {
            for s in fetch(&adapter, &["FPT", "HPG", "VIC"]) {
                assert!(s.floor_price <= s.ref_price && s.ref_price <= s.ceiling_price);
                assert!(s.price >= s.floor_price && s.price <= s.ceiling_price);
                assert!(s.buy_volume >= 0.0 && s.sell_volume >= 0.0);
                assert_eq!(s.price % 10.0, 0.0);
                assert!((30.0..80.0).contains(&s.rsi));
                assert!((-150.0..150.0).contains(&s.cci));
            }
        }
    }

    #[test]
    fn unlisted_symbol_gets_fallback_quote() {
        let adapter = MockMarketAdapter::with_seed(ClockMode::Closed, 3);
        let s = &fetch(&adapter, &["zzz"])[0];
        assert_eq!(s.symbol, "ZZZ");
        assert_eq!(s.company_name, "Unlisted company");
        assert_eq!(s.rrg, RrgQuadrant::Lagging);
        assert_eq!(s.ref_price, 50_000.0);
        assert_eq!(s.audit_status, "N/A");
    }

    #[test]
    fn same_seed_same_quotes() {
        let a = MockMarketAdapter::with_seed(ClockMode::Open, 9);
        let b = MockMarketAdapter::with_seed(ClockMode::Open, 9);
        assert_eq!(fetch(&a, &["SSI", "TCB"]), fetch(&b, &["SSI", "TCB"]));
    }

    #[test]
    fn preserves_request_order() {
        let adapter = MockMarketAdapter::with_seed(ClockMode::Closed, 5);
        let symbols: Vec<_> = fetch(&adapter, &["VNM", "BID", "GAS"])
            .into_iter()
            .map(|s| s.symbol)
            .collect();
        assert_eq!(symbols, ["VNM", "BID", "GAS"]);
    }

    #[test]
    fn clock_mode_parse() {
        assert_eq!("Closed".parse::<ClockMode>().unwrap(), ClockMode::Closed);
        assert!("later".parse::<ClockMode>().is_err());
    }

    #[test]
    fn every_listing_is_quoted() {
        let adapter = MockMarketAdapter::new(ClockMode::Closed);
        let symbols: Vec<&str> = LISTINGS.iter().map(|l| l.symbol).collect();
        let snaps = fetch(&adapter, &symbols);
        assert_eq!(snaps.len(), LISTINGS.len());
        for (snap, listing) in snaps.iter().zip(LISTINGS.iter()) {
            assert_eq!(snap.symbol, listing.symbol);
            assert_eq!(snap.company_name, listing.name);
        }
    }
}
