//! Configuration validation.
//!
//! Checks the `[portfolio]` and `[market]` sections before a run.

use crate::domain::error::SmartcapError;
use crate::domain::timeframe::TimeFrame;
use crate::domain::watchlist::Watchlist;
use crate::ports::config_port::ConfigPort;

pub const PORTFOLIO_SECTION: &str = "portfolio";
pub const MARKET_SECTION: &str = "market";

/// `timeframe = none` leaves the holding horizon unspecified.
pub const NO_TIMEFRAME: &str = "none";

pub fn validate_portfolio_config(config: &dyn ConfigPort) -> Result<(), SmartcapError> {
    total_capital(config)?;
    target_value(config, "target_profit", 0.0)?;
    target_value(config, "target_profit_percent", 0.0)?;
    validate_symbols(config)?;
    parse_timeframe(config)?;
    Ok(())
}

pub fn validate_market_config(config: &dyn ConfigPort) -> Result<(), SmartcapError> {
    let source = config
        .get_nonempty(MARKET_SECTION, "source")
        .unwrap_or_else(|| "mock".to_string());
    match source.to_lowercase().as_str() {
        "mock" => {}
        "csv" => {
            if config.get_nonempty(MARKET_SECTION, "csv_path").is_none() {
                return Err(SmartcapError::ConfigMissing {
                    section: MARKET_SECTION.to_string(),
                    key: "csv_path".to_string(),
                });
            }
        }
        other => {
            return Err(SmartcapError::ConfigInvalid {
                section: MARKET_SECTION.to_string(),
                key: "source".to_string(),
                reason: format!("unknown source '{other}', expected mock or csv"),
            });
        }
    }

    if let Some(clock) = config.get_nonempty(MARKET_SECTION, "clock") {
        if !matches!(clock.to_lowercase().as_str(), "auto" | "open" | "closed") {
            return Err(SmartcapError::ConfigInvalid {
                section: MARKET_SECTION.to_string(),
                key: "clock".to_string(),
                reason: format!("unknown clock '{clock}', expected auto, open or closed"),
            });
        }
    }
    Ok(())
}

/// Timeframe from `[portfolio] timeframe`: `1D` when unset, `None` for
/// `none`.
pub fn parse_timeframe(config: &dyn ConfigPort) -> Result<Option<TimeFrame>, SmartcapError> {
    match config.get_nonempty(PORTFOLIO_SECTION, "timeframe") {
        None => Ok(Some(TimeFrame::D1)),
        Some(s) if s.eq_ignore_ascii_case(NO_TIMEFRAME) => Ok(None),
        Some(s) => s
            .parse::<TimeFrame>()
            .map(Some)
            .map_err(|reason| SmartcapError::ConfigInvalid {
                section: PORTFOLIO_SECTION.to_string(),
                key: "timeframe".to_string(),
                reason,
            }),
    }
}

/// Numeric value of a `[portfolio]` key; `None` when unset.
pub fn portfolio_number(
    config: &dyn ConfigPort,
    key: &str,
) -> Result<Option<f64>, SmartcapError> {
    let Some(raw) = config.get_nonempty(PORTFOLIO_SECTION, key) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(SmartcapError::ConfigInvalid {
            section: PORTFOLIO_SECTION.to_string(),
            key: key.to_string(),
            reason: format!("'{raw}' is not a number"),
        }),
    }
}

/// Required and strictly positive.
pub fn total_capital(config: &dyn ConfigPort) -> Result<f64, SmartcapError> {
    let value = portfolio_number(config, "total_capital")?.ok_or_else(|| {
        SmartcapError::ConfigMissing {
            section: PORTFOLIO_SECTION.to_string(),
            key: "total_capital".to_string(),
        }
    })?;
    if value <= 0.0 {
        return Err(SmartcapError::ConfigInvalid {
            section: PORTFOLIO_SECTION.to_string(),
            key: "total_capital".to_string(),
            reason: "total_capital must be a positive number".to_string(),
        });
    }
    Ok(value)
}

/// Informational profit target; `default` when unset, never negative.
pub fn target_value(
    config: &dyn ConfigPort,
    key: &str,
    default: f64,
) -> Result<f64, SmartcapError> {
    let value = portfolio_number(config, key)?.unwrap_or(default);
    if value < 0.0 {
        return Err(SmartcapError::ConfigInvalid {
            section: PORTFOLIO_SECTION.to_string(),
            key: key.to_string(),
            reason: format!("{key} must be non-negative"),
        });
    }
    Ok(value)
}

/// Required watch-list.
pub fn watchlist(config: &dyn ConfigPort) -> Result<Watchlist, SmartcapError> {
    match config.get_nonempty(PORTFOLIO_SECTION, "symbols") {
        Some(s) => Ok(Watchlist::parse(&s)?),
        None => Err(SmartcapError::ConfigMissing {
            section: PORTFOLIO_SECTION.to_string(),
            key: "symbols".to_string(),
        }),
    }
}

fn validate_symbols(config: &dyn ConfigPort) -> Result<(), SmartcapError> {
    watchlist(config).map(|_| ())
}
