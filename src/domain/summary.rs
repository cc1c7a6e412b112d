//! Portfolio-level totals over one batch of allocation results.

use crate::domain::allocation::AllocationResult;
use crate::domain::inputs::PortfolioInputs;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_capital: f64,
    pub total_allocated: f64,
    /// Capital left undeployed by confidence damping.
    pub reserve: f64,
    pub total_expected_profit: f64,
    pub expected_return_percent: f64,
    pub target_profit: f64,
    /// Expected profit as a percentage of the target; `None` without a target.
    pub target_progress_percent: Option<f64>,
    pub total_shares: i64,
}

impl PortfolioSummary {
    pub fn compute(inputs: &PortfolioInputs, results: &[AllocationResult]) -> Self {
        let total_allocated: f64 = results.iter().map(|r| r.amount).sum();
        let total_expected_profit: f64 = results.iter().map(|r| r.expected_profit).sum();

        let expected_return_percent = if inputs.total_capital != 0.0 {
            total_expected_profit / inputs.total_capital * 100.0
        } else {
            0.0
        };

        let target_progress_percent = if inputs.target_profit > 0.0 {
            Some(total_expected_profit / inputs.target_profit * 100.0)
        } else {
            None
        };

        PortfolioSummary {
            total_capital: inputs.total_capital,
            total_allocated,
            reserve: inputs.total_capital - total_allocated,
            total_expected_profit,
            expected_return_percent,
            target_profit: inputs.target_profit,
            target_progress_percent,
            total_shares: results.iter().map(|r| r.shares).sum(),
        }
    }

    pub fn reserve_percent(&self) -> f64 {
        if self.total_capital != 0.0 {
            self.reserve / self.total_capital * 100.0
        } else {
            0.0
        }
    }
}
