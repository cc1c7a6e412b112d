//! Sentiment score with an injected random jitter.
//!
//! score = 50 + trend * 10 - jitter, jitter in [0, 20); LEADING adds 10,
//! LAGGING subtracts 15; the result is clamped to [5, 95].

use crate::domain::market::RrgQuadrant;
use rand::Rng;
use serde::Serialize;
use std::fmt;

pub const JITTER_SPAN: f64 = 20.0;
pub const MIN_SENTIMENT: f64 = 5.0;
pub const MAX_SENTIMENT: f64 = 95.0;

/// Source of the sentiment jitter draw.
pub trait JitterSource {
    /// A value in `[0, JITTER_SPAN)`.
    fn draw(&mut self) -> f64;
}

/// Uniform jitter from any `rand` generator.
pub struct RngJitter<R>(pub R);

impl<R: Rng> JitterSource for RngJitter<R> {
    fn draw(&mut self) -> f64 {
        self.0.r#gen::<f64>() * JITTER_SPAN
    }
}

/// The same draw every time.
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn draw(&mut self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentimentLabel {
    #[serde(rename = "Very Positive")]
    VeryPositive,
    Positive,
    Neutral,
    Negative,
    #[serde(rename = "Very Negative")]
    VeryNegative,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score > 75.0 {
            SentimentLabel::VeryPositive
        } else if score > 60.0 {
            SentimentLabel::Positive
        } else if score < 25.0 {
            SentimentLabel::VeryNegative
        } else if score < 40.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentLabel::VeryPositive => "Very Positive",
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::VeryNegative => "Very Negative",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sentiment {
    pub score: f64,
    pub label: SentimentLabel,
    /// Estimated price impact in percent.
    pub impact_percent: f64,
}

pub fn sentiment_score(trend_score: f64, quadrant: RrgQuadrant, jitter: f64) -> f64 {
    let mut score = 50.0 + trend_score * 10.0 - jitter;
    match quadrant {
        RrgQuadrant::Leading => score += 10.0,
        RrgQuadrant::Lagging => score -= 15.0,
        RrgQuadrant::Improving | RrgQuadrant::Weakening => {}
    }
    score.clamp(MIN_SENTIMENT, MAX_SENTIMENT)
}

impl Sentiment {
    pub fn evaluate(trend_score: f64, quadrant: RrgQuadrant, jitter: &mut dyn JitterSource) -> Self {
        let score = sentiment_score(trend_score, quadrant, jitter.draw());
        Sentiment {
            score,
            label: SentimentLabel::from_score(score),
            impact_percent: (score - 50.0) / 10.0,
        }
    }
}
