//! Market data port: the provider of per-symbol snapshots.

use crate::domain::error::SmartcapError;
use crate::domain::market::MarketSnapshot;

pub trait MarketDataPort {
    /// One snapshot per requested symbol, in request order.
    fn fetch_snapshots(&self, symbols: &[String]) -> Result<Vec<MarketSnapshot>, SmartcapError>;
}
