//! Trend scorer: additive point system over one snapshot's indicators.
//!
//! - +1 when price is above MA20, +1 when MA20 is above MA50
//! - +0.5 when RSI > 60, -0.5 when RSI < 40
//! - RRG quadrant: LEADING +2.5, IMPROVING +1.5, WEAKENING +0.5, LAGGING -1
//!
//! The result is clamped to [0, 5].

use crate::domain::market::{MarketSnapshot, RrgQuadrant};

pub const MAX_TREND_SCORE: f64 = 5.0;
/// Midpoint of the score range, treated as break-even.
pub const NEUTRAL_TREND_SCORE: f64 = 2.5;

const RSI_STRONG: f64 = 60.0;
const RSI_WEAK: f64 = 40.0;

pub fn quadrant_points(quadrant: RrgQuadrant) -> f64 {
    match quadrant {
        RrgQuadrant::Leading => 2.5,
        RrgQuadrant::Improving => 1.5,
        RrgQuadrant::Weakening => 0.5,
        RrgQuadrant::Lagging => -1.0,
    }
}

pub fn trend_score(snapshot: &MarketSnapshot) -> f64 {
    let mut score = 0.0;
    if snapshot.price > snapshot.ma20 {
        score += 1.0;
    }
    if snapshot.ma20 > snapshot.ma50 {
        score += 1.0;
    }
    // Independent checks; only exclusive while RSI_WEAK <= RSI_STRONG.
    if snapshot.rsi > RSI_STRONG {
        score += 0.5;
    }
    if snapshot.rsi < RSI_WEAK {
        score -= 0.5;
    }
    score += quadrant_points(snapshot.rrg);

    score.clamp(0.0, MAX_TREND_SCORE)
}
