//! CSV snapshot file adapter.
//!
//! One row per symbol. Columns `change`, `change_percent`, `volume`,
//! `ceiling_price`, `floor_price`, `bid1` and `ask1` may be left empty:
//! change figures are derived from the reference price, volume from buy +
//! sell volume, bounds from the +/-7% band and quotes from the last price.

use crate::domain::error::SmartcapError;
use crate::domain::market::{MarketSnapshot, RrgQuadrant, Stochastic};
use crate::domain::price_band::PriceBand;
use crate::ports::market_data_port::MarketDataPort;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct SnapshotRow {
    symbol: String,
    company_name: String,
    price: f64,
    change: Option<f64>,
    change_percent: Option<f64>,
    volume: Option<f64>,
    ma20: f64,
    ma50: f64,
    rsi: f64,
    rrg: String,
    stoch_k: f64,
    stoch_d: f64,
    cci: f64,
    target_price_high: f64,
    target_price_low: f64,
    buy_volume: f64,
    sell_volume: f64,
    roi: f64,
    roe: f64,
    pe: f64,
    audit_status: String,
    ref_price: f64,
    ceiling_price: Option<f64>,
    floor_price: Option<f64>,
    bid1: Option<f64>,
    ask1: Option<f64>,
}

impl SnapshotRow {
    fn into_snapshot(self) -> Result<MarketSnapshot, SmartcapError> {
        let rrg: RrgQuadrant = self.rrg.parse().map_err(|reason| SmartcapError::MarketData {
            reason: format!("{}: {}", self.symbol, reason),
        })?;
        let band = PriceBand::from_reference(self.ref_price);
        let change = self.change.unwrap_or(self.price - self.ref_price);
        let change_percent = self.change_percent.unwrap_or(if self.ref_price != 0.0 {
            change / self.ref_price * 100.0
        } else {
            0.0
        });

        Ok(MarketSnapshot {
            symbol: self.symbol.trim().to_uppercase(),
            company_name: self.company_name,
            price: self.price,
            change,
            change_percent,
            volume: self.volume.unwrap_or(self.buy_volume + self.sell_volume),
            ma20: self.ma20,
            ma50: self.ma50,
            rsi: self.rsi,
            rrg,
            stoch: Stochastic {
                k: self.stoch_k,
                d: self.stoch_d,
            },
            cci: self.cci,
            target_price_high: self.target_price_high,
            target_price_low: self.target_price_low,
            buy_volume: self.buy_volume,
            sell_volume: self.sell_volume,
            roi: self.roi,
            roe: self.roe,
            pe: self.pe,
            audit_status: self.audit_status,
            ceiling_price: self.ceiling_price.unwrap_or(band.ceiling),
            floor_price: self.floor_price.unwrap_or(band.floor),
            ref_price: self.ref_price,
            bid1: self.bid1.unwrap_or(self.price),
            ask1: self.ask1.unwrap_or(self.price),
        })
    }
}

pub struct CsvAdapter {
    path: PathBuf,
}

impl CsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load(&self) -> Result<Vec<MarketSnapshot>, SmartcapError> {
        let content = fs::read_to_string(&self.path).map_err(|e| SmartcapError::MarketData {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let mut snapshots = Vec::new();
        for result in rdr.deserialize::<SnapshotRow>() {
            let row = result.map_err(|e| SmartcapError::MarketData {
                reason: format!("CSV parse error: {}", e),
            })?;
            snapshots.push(row.into_snapshot()?);
        }
        tracing::debug!(path = %self.path.display(), rows = snapshots.len(), "loaded snapshots");
        Ok(snapshots)
    }
}

impl MarketDataPort for CsvAdapter {
    fn fetch_snapshots(&self, symbols: &[String]) -> Result<Vec<MarketSnapshot>, SmartcapError> {
        let mut by_symbol: HashMap<String, MarketSnapshot> = self
            .load()?
            .into_iter()
            .map(|s| (s.symbol.clone(), s))
            .collect();

        symbols
            .iter()
            .map(|symbol| {
                by_symbol
                    .remove(symbol)
                    .ok_or_else(|| SmartcapError::NoData {
                        symbol: symbol.clone(),
                    })
            })
            .collect()
    }
}
