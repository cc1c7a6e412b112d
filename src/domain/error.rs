//! Domain error types.
//!
//! The scoring and allocation code is infallible; these errors come from
//! configuration, watch-list editing, the market data providers and report
//! writers around it.

use crate::domain::watchlist::WatchlistError;

/// Top-level error type for smartcap.
#[derive(Debug, thiserror::Error)]
pub enum SmartcapError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Watchlist(#[from] WatchlistError),

    #[error("market data error: {reason}")]
    MarketData { reason: String },

    #[error("no market data for {symbol}")]
    NoData { symbol: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SmartcapError> for std::process::ExitCode {
    fn from(err: &SmartcapError) -> Self {
        let code: u8 = match err {
            SmartcapError::Io(_) => 1,
            SmartcapError::ConfigParse { .. }
            | SmartcapError::ConfigMissing { .. }
            | SmartcapError::ConfigInvalid { .. } => 2,
            SmartcapError::Watchlist(_) => 4,
            SmartcapError::MarketData { .. } | SmartcapError::NoData { .. } => 5,
            SmartcapError::Report { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
