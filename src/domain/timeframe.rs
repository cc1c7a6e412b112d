//! Holding timeframes and their expected volatility.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Multiplier used when the timeframe is unknown or missing.
pub const DEFAULT_VOLATILITY_MULTIPLIER: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFrame {
    #[serde(rename = "1H")]
    H1,
    #[serde(rename = "4H")]
    H4,
    #[serde(rename = "1D")]
    D1,
    #[serde(rename = "1W")]
    W1,
    #[serde(rename = "1M")]
    M1,
}

impl TimeFrame {
    pub const ALL: [TimeFrame; 5] = [
        TimeFrame::H1,
        TimeFrame::H4,
        TimeFrame::D1,
        TimeFrame::W1,
        TimeFrame::M1,
    ];

    /// Expected +/- price swing over the holding period.
    pub fn volatility_multiplier(self) -> f64 {
        match self {
            TimeFrame::H1 => 0.01,
            TimeFrame::H4 => 0.02,
            TimeFrame::D1 => 0.05,
            TimeFrame::W1 => 0.12,
            TimeFrame::M1 => 0.25,
        }
    }

    pub fn is_intraday(self) -> bool {
        matches!(self, TimeFrame::H1 | TimeFrame::H4)
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeFrame::H1 => "1 Hour",
            TimeFrame::H4 => "4 Hours",
            TimeFrame::D1 => "1 Day",
            TimeFrame::W1 => "1 Week",
            TimeFrame::M1 => "1 Month",
        }
    }
}

/// Resolve the multiplier for an optional timeframe.
pub fn volatility_multiplier(timeframe: Option<TimeFrame>) -> f64 {
    timeframe
        .map(TimeFrame::volatility_multiplier)
        .unwrap_or(DEFAULT_VOLATILITY_MULTIPLIER)
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeFrame::H1 => "1H",
            TimeFrame::H4 => "4H",
            TimeFrame::D1 => "1D",
            TimeFrame::W1 => "1W",
            TimeFrame::M1 => "1M",
        };
        f.write_str(s)
    }
}

impl FromStr for TimeFrame {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1H" => Ok(TimeFrame::H1),
            "4H" => Ok(TimeFrame::H4),
            "1D" => Ok(TimeFrame::D1),
            "1W" => Ok(TimeFrame::W1),
            "1M" => Ok(TimeFrame::M1),
            other => Err(format!("unknown timeframe '{other}' (expected 1H, 4H, 1D, 1W or 1M)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multipliers_per_timeframe() {
        assert_eq!(TimeFrame::H1.volatility_multiplier(), 0.01);
        assert_eq!(TimeFrame::H4.volatility_multiplier(), 0.02);
        assert_eq!(TimeFrame::D1.volatility_multiplier(), 0.05);
        assert_eq!(TimeFrame::W1.volatility_multiplier(), 0.12);
        assert_eq!(TimeFrame::M1.volatility_multiplier(), 0.25);
    }

    #[test]
    fn missing_timeframe_uses_default() {
        assert_eq!(volatility_multiplier(None), DEFAULT_VOLATILITY_MULTIPLIER);
        assert_eq!(volatility_multiplier(Some(TimeFrame::W1)), 0.12);
    }

    #[test]
    fn parse_accepts_lowercase() {
        assert_eq!("1w".parse::<TimeFrame>().unwrap(), TimeFrame::W1);
        assert_eq!("4H".parse::<TimeFrame>().unwrap(), TimeFrame::H4);
        assert!("2D".parse::<TimeFrame>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for tf in TimeFrame::ALL {
            assert_eq!(tf.to_string().parse::<TimeFrame>().unwrap(), tf);
        }
    }

    #[test]
    fn intraday_split() {
        assert!(TimeFrame::H1.is_intraday());
        assert!(TimeFrame::H4.is_intraday());
        assert!(!TimeFrame::D1.is_intraday());
    }
}
