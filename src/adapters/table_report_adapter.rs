//! Plain-text table report for terminals.

use crate::domain::allocation::AllocationResult;
use crate::domain::error::SmartcapError;
use crate::domain::price_band::PriceBand;
use crate::domain::summary::PortfolioSummary;
use crate::ports::report_port::{AllocationReport, ReportPort};
use std::io::Write;

pub struct TableReportAdapter;

/// One row of the allocation table.
pub fn format_row(r: &AllocationResult) -> String {
    let band = PriceBand {
        reference: r.ref_price,
        ceiling: r.ceiling_price,
        floor: r.floor_price,
    };
    let movement = band.classify(r.price);
    format!(
        "{:<5} {:<22} {:>10.0} {:<2} {:>9} {:>4.1} {:>7.2}% {:>16.0} {:>9} {:>+15.0} {:>7} {:>5.1} {:<13} {}",
        r.symbol,
        truncate(&r.sector_name, 22),
        r.price,
        movement.marker(),
        r.rrg.to_string(),
        r.trend_score,
        r.weight * 100.0,
        r.amount,
        r.shares,
        r.expected_profit,
        r.buy_strength_percent.to_string(),
        r.sentiment_score,
        r.sentiment_label.to_string(),
        r.timeframe_advice,
    )
}

pub fn format_summary(s: &PortfolioSummary) -> Vec<String> {
    let mut lines = vec![
        format!("Total Capital:    {:.0}", s.total_capital),
        format!("Allocated:        {:.0}", s.total_allocated),
        format!("Reserve:          {:.0} ({:.1}%)", s.reserve, s.reserve_percent()),
        format!("Expected Profit:  {:+.0}", s.total_expected_profit),
        format!("Expected Return:  {:+.2}%", s.expected_return_percent),
    ];
    if let Some(progress) = s.target_progress_percent {
        lines.push(format!(
            "Target Profit:    {:.0} ({:.1}% covered)",
            s.target_profit, progress
        ));
    }
    lines
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        s.chars().take(width - 1).chain(std::iter::once('~')).collect()
    }
}

impl ReportPort for TableReportAdapter {
    fn write(&self, report: &AllocationReport<'_>, out: &mut dyn Write) -> Result<(), SmartcapError> {
        let timeframe = report
            .inputs
            .timeframe
            .map(|tf| tf.label())
            .unwrap_or("Unspecified");
        writeln!(out, "=== Allocation ({timeframe}) ===")?;
        writeln!(
            out,
            "{:<5} {:<22} {:>10} {:<2} {:>9} {:>4} {:>8} {:>16} {:>9} {:>15} {:>7} {:>5} {:<13} {}",
            "SYM", "SECTOR", "PRICE", "", "RRG", "SCORE", "WEIGHT", "AMOUNT", "SHARES",
            "EXP. PROFIT", "BUY%", "SENT", "SENTIMENT", "ADVICE"
        )?;
        for r in report.results {
            writeln!(out, "{}", format_row(r))?;
        }

        writeln!(out)?;
        writeln!(out, "=== Signals ===")?;
        for r in report.results {
            writeln!(
                out,
                "  {}: stoch {} | cci {} | {}",
                r.symbol, r.stoch_status, r.cci_status, r.advice_detail
            )?;
        }

        writeln!(out)?;
        writeln!(out, "=== Summary ===")?;
        for line in format_summary(report.summary) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}
