//! Descriptive status strings derived from oscillators and the holding
//! timeframe. Each status is an enum whose `Display` is the text handed to
//! the display layer.

use crate::domain::market::{RrgQuadrant, Stochastic};
use crate::domain::timeframe::TimeFrame;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StochStatus {
    ExtremeOverbought,
    Overbought,
    ExtremeOversold,
    ApproachingOversold,
    /// Carries %K rounded to the nearest integer.
    Sideways(i64),
}

impl StochStatus {
    pub fn from_stochastic(stoch: Stochastic) -> Self {
        let k = stoch.k;
        if k >= 90.0 {
            StochStatus::ExtremeOverbought
        } else if k > 80.0 {
            StochStatus::Overbought
        } else if k <= 10.0 {
            StochStatus::ExtremeOversold
        } else if k < 20.0 {
            StochStatus::ApproachingOversold
        } else {
            StochStatus::Sideways(k.round() as i64)
        }
    }
}

impl fmt::Display for StochStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StochStatus::ExtremeOverbought => f.write_str("Overbought (extreme, peak risk)"),
            StochStatus::Overbought => f.write_str("Overbought (peak zone)"),
            StochStatus::ExtremeOversold => f.write_str("Oversold (extreme, bottom zone)"),
            StochStatus::ApproachingOversold => f.write_str("Oversold (approaching bottom)"),
            StochStatus::Sideways(k) => write!(f, "Stable ({k} - sideways)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CciStatus {
    ExtremeEuphoria,
    Euphoria,
    ExtremePanic,
    Panic,
    Normal,
}

impl CciStatus {
    pub fn from_cci(cci: f64) -> Self {
        if cci > 200.0 {
            CciStatus::ExtremeEuphoria
        } else if cci > 100.0 {
            CciStatus::Euphoria
        } else if cci < -200.0 {
            CciStatus::ExtremePanic
        } else if cci < -100.0 {
            CciStatus::Panic
        } else {
            CciStatus::Normal
        }
    }
}

impl fmt::Display for CciStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CciStatus::ExtremeEuphoria => "Euphoric (extreme)",
            CciStatus::Euphoria => "Euphoric (strong trend)",
            CciStatus::ExtremePanic => "Panic (extreme)",
            CciStatus::Panic => "Panic (accumulation zone)",
            CciStatus::Normal => "Normal (accumulating)",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeframeAdvice {
    SwingTrade,
    Wait,
    Hold,
    TakeProfit,
    LongTermInvest,
    ReducePosition,
    /// No timeframe selected.
    AwaitConfirmation,
}

impl TimeframeAdvice {
    pub fn for_position(timeframe: Option<TimeFrame>, quadrant: RrgQuadrant) -> Self {
        let strong = quadrant.is_strong();
        match timeframe {
            Some(tf) if tf.is_intraday() => {
                if strong {
                    TimeframeAdvice::SwingTrade
                } else {
                    TimeframeAdvice::Wait
                }
            }
            Some(TimeFrame::D1) => {
                if strong {
                    TimeframeAdvice::Hold
                } else {
                    TimeframeAdvice::TakeProfit
                }
            }
            Some(_) => {
                if quadrant == RrgQuadrant::Lagging {
                    TimeframeAdvice::ReducePosition
                } else {
                    TimeframeAdvice::LongTermInvest
                }
            }
            None => TimeframeAdvice::AwaitConfirmation,
        }
    }
}

impl fmt::Display for TimeframeAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeframeAdvice::SwingTrade => "Swing trade (open long position)",
            TimeframeAdvice::Wait => "Watch (wait for signal)",
            TimeframeAdvice::Hold => "Hold (uptrend)",
            TimeframeAdvice::TakeProfit => "Take profit (protect capital)",
            TimeframeAdvice::LongTermInvest => "Long-term invest",
            TimeframeAdvice::ReducePosition => "Restructure (reduce position)",
            TimeframeAdvice::AwaitConfirmation => "Await confirmation",
        };
        f.write_str(s)
    }
}

macro_rules! serialize_as_display {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }
        )*
    };
}

serialize_as_display!(StochStatus, CciStatus, TimeframeAdvice);

/// Resistance/support band from the high and low price targets.
pub fn target_band(high: f64, low: f64) -> String {
    format!(
        "Resistance (sell): {} | Support (buy): {}",
        high.round() as i64,
        low.round() as i64
    )
}
