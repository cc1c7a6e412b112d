//! Allocation engine: turns per-symbol snapshots into capital weights,
//! money amounts, share counts and the derived display fields.
//!
//! Per run:
//! 1. Resolve the volatility multiplier from the timeframe.
//! 2. Score each snapshot; estimated return = (score - 2.5) / 2.5 * multiplier;
//!    pick the confidence band; resolve the sector.
//! 3. total = sum of scores.
//! 4. ideal = score / total (uniform 1/n when total is 0),
//!    weight = ideal * confidence, amount = capital * weight,
//!    shares = floor(amount / price).
//! 5. Flows, sentiment and status strings.
//!
//! Weights are damped independently by their confidence factor, so they sum
//! to at most 1. The remainder is left unallocated as a cash reserve.

use crate::domain::flow::{BuyStrength, FlowFigures};
use crate::domain::inputs::PortfolioInputs;
use crate::domain::market::{MarketSnapshot, RrgQuadrant};
use crate::domain::sector::SectorTable;
use crate::domain::sentiment::{JitterSource, RngJitter, Sentiment, SentimentLabel};
use crate::domain::signals::{CciStatus, StochStatus, TimeframeAdvice, target_band};
use crate::domain::timeframe::volatility_multiplier;
use crate::domain::trend::{NEUTRAL_TREND_SCORE, trend_score};
use serde::Serialize;

/// Weight damping by trend-score band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    /// score < 1.5
    Low,
    /// 1.5 <= score <= 4
    Medium,
    /// score > 4
    High,
}

impl ConfidenceBand {
    pub fn from_score(score: f64) -> Self {
        if score < 1.5 {
            ConfidenceBand::Low
        } else if score > 4.0 {
            ConfidenceBand::High
        } else {
            ConfidenceBand::Medium
        }
    }

    pub fn factor(self) -> f64 {
        match self {
            ConfidenceBand::Low => 0.3,
            ConfidenceBand::Medium => 0.7,
            ConfidenceBand::High => 1.0,
        }
    }
}

/// Step-2 intermediate for one symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredSymbol<'a> {
    pub snapshot: &'a MarketSnapshot,
    pub score: f64,
    pub estimated_return_rate: f64,
    pub confidence: ConfidenceBand,
    pub sector_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationResult {
    pub symbol: String,
    pub company_name: String,
    pub sector_name: String,
    /// Share of capital before confidence damping.
    pub ideal_weight: f64,
    pub confidence_factor: f64,
    /// Share of capital actually deployed.
    pub weight: f64,
    pub amount: f64,
    pub shares: i64,
    pub expected_return_rate: f64,
    pub expected_profit: f64,
    pub trend_score: f64,
    pub rrg: RrgQuadrant,
    pub advice_detail: String,
    pub timeframe_advice: TimeframeAdvice,
    pub stoch_status: StochStatus,
    pub cci_status: CciStatus,
    pub buy_strength_percent: BuyStrength,
    pub total_volume: f64,
    pub buy_flow_value: f64,
    pub sell_flow_value: f64,
    pub net_flow_value: f64,
    pub sentiment_score: f64,
    pub sentiment_label: SentimentLabel,
    pub impact_price_percent: f64,
    pub roi: f64,
    pub roe: f64,
    pub pe: f64,
    pub audit_status: String,
    pub price: f64,
    pub ceiling_price: f64,
    pub floor_price: f64,
    pub ref_price: f64,
    pub bid1: f64,
    pub ask1: f64,
    pub target_price_high: f64,
    pub target_price_low: f64,
}

/// Ideal weights for a batch of scores; uniform when every score is zero.
pub fn ideal_weights(scores: &[f64]) -> Vec<f64> {
    let total: f64 = scores.iter().sum();
    if total > 0.0 {
        scores.iter().map(|s| s / total).collect()
    } else {
        let uniform = 1.0 / scores.len() as f64;
        vec![uniform; scores.len()]
    }
}

#[derive(Debug, Clone)]
pub struct AllocationEngine {
    sectors: SectorTable,
}

impl AllocationEngine {
    pub fn new(sectors: SectorTable) -> Self {
        AllocationEngine { sectors }
    }

    pub fn score<'a>(&self, snapshot: &'a MarketSnapshot, multiplier: f64) -> ScoredSymbol<'a> {
        let score = trend_score(snapshot);
        let return_factor = (score - NEUTRAL_TREND_SCORE) / NEUTRAL_TREND_SCORE;
        ScoredSymbol {
            snapshot,
            score,
            estimated_return_rate: return_factor * multiplier,
            confidence: ConfidenceBand::from_score(score),
            sector_name: self.sectors.sector_name(&snapshot.symbol).to_string(),
        }
    }

    /// Allocate with a fresh thread-local entropy source for the jitter.
    pub fn optimize(
        &self,
        inputs: &PortfolioInputs,
        snapshots: &[MarketSnapshot],
    ) -> Vec<AllocationResult> {
        self.optimize_with(inputs, snapshots, &mut RngJitter(rand::thread_rng()))
    }

    /// One result per snapshot, in input order.
    pub fn optimize_with(
        &self,
        inputs: &PortfolioInputs,
        snapshots: &[MarketSnapshot],
        jitter: &mut dyn JitterSource,
    ) -> Vec<AllocationResult> {
        let multiplier = volatility_multiplier(inputs.timeframe);

        let scored: Vec<ScoredSymbol<'_>> = snapshots
            .iter()
            .map(|s| self.score(s, multiplier))
            .collect();

        let scores: Vec<f64> = scored.iter().map(|s| s.score).collect();
        let ideal = ideal_weights(&scores);

        tracing::debug!(
            symbols = scored.len(),
            total_score = scores.iter().sum::<f64>(),
            multiplier,
            "scored batch"
        );

        scored
            .iter()
            .zip(ideal)
            .map(|(s, ideal_weight)| self.build_result(inputs, s, ideal_weight, jitter))
            .collect()
    }

    fn build_result(
        &self,
        inputs: &PortfolioInputs,
        scored: &ScoredSymbol<'_>,
        ideal_weight: f64,
        jitter: &mut dyn JitterSource,
    ) -> AllocationResult {
        let d = scored.snapshot;
        let confidence_factor = scored.confidence.factor();
        let weight = ideal_weight * confidence_factor;
        let amount = inputs.total_capital * weight;
        let shares = (amount / d.price).floor() as i64;

        let flow = FlowFigures::compute(d.buy_volume, d.sell_volume, d.price);
        let sentiment = Sentiment::evaluate(scored.score, d.rrg, jitter);

        tracing::debug!(
            symbol = %d.symbol,
            score = scored.score,
            weight,
            shares,
            sentiment = sentiment.score,
            "allocated"
        );

        AllocationResult {
            symbol: d.symbol.clone(),
            company_name: d.company_name.clone(),
            sector_name: scored.sector_name.clone(),
            ideal_weight,
            confidence_factor,
            weight,
            amount,
            shares,
            expected_return_rate: scored.estimated_return_rate,
            expected_profit: amount * scored.estimated_return_rate,
            trend_score: scored.score,
            rrg: d.rrg,
            advice_detail: target_band(d.target_price_high, d.target_price_low),
            timeframe_advice: TimeframeAdvice::for_position(inputs.timeframe, d.rrg),
            stoch_status: StochStatus::from_stochastic(d.stoch),
            cci_status: CciStatus::from_cci(d.cci),
            buy_strength_percent: flow.buy_strength,
            total_volume: d.volume,
            buy_flow_value: flow.buy_flow,
            sell_flow_value: flow.sell_flow,
            net_flow_value: flow.net_flow,
            sentiment_score: sentiment.score,
            sentiment_label: sentiment.label,
            impact_price_percent: sentiment.impact_percent,
            roi: d.roi,
            roe: d.roe,
            pe: d.pe,
            audit_status: d.audit_status.clone(),
            price: d.price,
            ceiling_price: d.ceiling_price,
            floor_price: d.floor_price,
            ref_price: d.ref_price,
            bid1: d.bid1,
            ask1: d.ask1,
            target_price_high: d.target_price_high,
            target_price_low: d.target_price_low,
        }
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        AllocationEngine::new(SectorTable::builtin())
    }
}
