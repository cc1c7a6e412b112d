//! CSV export of allocation results, one row per symbol.
//!
//! Status fields are written as their display text. An undefined buy
//! strength is an empty cell.

use crate::domain::error::SmartcapError;
use crate::ports::report_port::{AllocationReport, ReportPort};
use std::io::Write;

pub struct CsvReportAdapter;

impl ReportPort for CsvReportAdapter {
    fn write(&self, report: &AllocationReport<'_>, out: &mut dyn Write) -> Result<(), SmartcapError> {
        let mut wtr = csv::Writer::from_writer(out);
        for result in report.results {
            wtr.serialize(result).map_err(|e| SmartcapError::Report {
                reason: format!("CSV write error for {}: {}", result.symbol, e),
            })?;
        }
        wtr.flush()?;
        Ok(())
    }
}
