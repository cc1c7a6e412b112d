//! Portfolio inputs for one allocation run.

use crate::domain::timeframe::TimeFrame;
use crate::domain::watchlist::Watchlist;

pub const DEFAULT_TARGET_PROFIT: f64 = 150_000_000.0;
pub const DEFAULT_TARGET_PROFIT_PERCENT: f64 = 15.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioInputs {
    pub total_capital: f64,
    /// Informational only; the engine never reads it.
    pub target_profit: f64,
    /// Informational only; the engine never reads it.
    pub target_profit_percent: f64,
    pub symbols: Watchlist,
    /// `None` falls back to the default volatility multiplier.
    pub timeframe: Option<TimeFrame>,
}

impl Default for PortfolioInputs {
    fn default() -> Self {
        PortfolioInputs {
            total_capital: 1_000_000_000.0,
            target_profit: DEFAULT_TARGET_PROFIT,
            target_profit_percent: DEFAULT_TARGET_PROFIT_PERCENT,
            symbols: Watchlist::default_symbols(),
            timeframe: Some(TimeFrame::D1),
        }
    }
}
