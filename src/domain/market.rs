//! Per-symbol market snapshot as supplied by a market data provider.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relative-rotation (RRG) momentum quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RrgQuadrant {
    /// Strong and improving.
    Leading,
    /// Weak but gaining.
    Improving,
    /// Strong but losing momentum.
    Weakening,
    /// Weak and declining.
    Lagging,
}

impl RrgQuadrant {
    pub const ALL: [RrgQuadrant; 4] = [
        RrgQuadrant::Leading,
        RrgQuadrant::Improving,
        RrgQuadrant::Weakening,
        RrgQuadrant::Lagging,
    ];

    /// Leading or improving.
    pub fn is_strong(self) -> bool {
        matches!(self, RrgQuadrant::Leading | RrgQuadrant::Improving)
    }

    pub fn label(self) -> &'static str {
        match self {
            RrgQuadrant::Leading => "Leading",
            RrgQuadrant::Improving => "Improving",
            RrgQuadrant::Weakening => "Weakening",
            RrgQuadrant::Lagging => "Lagging",
        }
    }
}

impl fmt::Display for RrgQuadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RrgQuadrant::Leading => "LEADING",
            RrgQuadrant::Improving => "IMPROVING",
            RrgQuadrant::Weakening => "WEAKENING",
            RrgQuadrant::Lagging => "LAGGING",
        };
        f.write_str(s)
    }
}

impl FromStr for RrgQuadrant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LEADING" => Ok(RrgQuadrant::Leading),
            "IMPROVING" => Ok(RrgQuadrant::Improving),
            "WEAKENING" => Ok(RrgQuadrant::Weakening),
            "LAGGING" => Ok(RrgQuadrant::Lagging),
            other => Err(format!("unknown RRG quadrant '{other}'")),
        }
    }
}

/// Stochastic oscillator pair, both in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Stochastic {
    pub k: f64,
    pub d: f64,
}

/// One symbol's indicators, fundamentals and session price bounds.
///
/// Providers guarantee `floor_price <= ref_price <= ceiling_price` and
/// non-negative volumes; nothing downstream re-checks either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub symbol: String,
    pub company_name: String,
    /// Last matched price, or the session close when the market is shut.
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: f64,
    pub ma20: f64,
    pub ma50: f64,
    pub rsi: f64,
    pub rrg: RrgQuadrant,
    pub stoch: Stochastic,
    pub cci: f64,
    pub target_price_high: f64,
    pub target_price_low: f64,
    pub buy_volume: f64,
    pub sell_volume: f64,
    pub roi: f64,
    pub roe: f64,
    pub pe: f64,
    pub audit_status: String,
    pub ceiling_price: f64,
    pub floor_price: f64,
    pub ref_price: f64,
    pub bid1: f64,
    pub ask1: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrant_round_trips_through_display() {
        for q in RrgQuadrant::ALL {
            assert_eq!(q.to_string().parse::<RrgQuadrant>().unwrap(), q);
        }
    }

    #[test]
    fn quadrant_parse_is_case_insensitive() {
        assert_eq!(" leading ".parse::<RrgQuadrant>().unwrap(), RrgQuadrant::Leading);
        assert!("sideways".parse::<RrgQuadrant>().is_err());
    }

    #[test]
    fn strong_quadrants() {
        assert!(RrgQuadrant::Leading.is_strong());
        assert!(RrgQuadrant::Improving.is_strong());
        assert!(!RrgQuadrant::Weakening.is_strong());
        assert!(!RrgQuadrant::Lagging.is_strong());
    }

    #[test]
    fn quadrant_serializes_uppercase() {
        let json = serde_json::to_string(&RrgQuadrant::Weakening).unwrap();
        assert_eq!(json, "\"WEAKENING\"");
    }
}
