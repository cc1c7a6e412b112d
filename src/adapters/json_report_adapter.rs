//! JSON report: timeframe, per-symbol results and portfolio summary.

use crate::domain::allocation::AllocationResult;
use crate::domain::error::SmartcapError;
use crate::domain::summary::PortfolioSummary;
use crate::domain::timeframe::TimeFrame;
use crate::ports::report_port::{AllocationReport, ReportPort};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct JsonReport<'a> {
    timeframe: Option<TimeFrame>,
    results: &'a [AllocationResult],
    summary: &'a PortfolioSummary,
}

pub struct JsonReportAdapter {
    pub pretty: bool,
}

impl Default for JsonReportAdapter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, report: &AllocationReport<'_>, out: &mut dyn Write) -> Result<(), SmartcapError> {
        let body = JsonReport {
            timeframe: report.inputs.timeframe,
            results: report.results,
            summary: report.summary,
        };
        let written = if self.pretty {
            serde_json::to_writer_pretty(&mut *out, &body)
        } else {
            serde_json::to_writer(&mut *out, &body)
        };
        written.map_err(|e| SmartcapError::Report {
            reason: format!("JSON write error: {e}"),
        })?;
        writeln!(out)?;
        Ok(())
    }
}
