//! Report port: the consumer of allocation results.

use crate::domain::allocation::AllocationResult;
use crate::domain::error::SmartcapError;
use crate::domain::inputs::PortfolioInputs;
use crate::domain::summary::PortfolioSummary;
use std::io::Write;

/// Everything a report needs from one allocation run.
pub struct AllocationReport<'a> {
    pub inputs: &'a PortfolioInputs,
    pub results: &'a [AllocationResult],
    pub summary: &'a PortfolioSummary,
}

pub trait ReportPort {
    fn write(&self, report: &AllocationReport<'_>, out: &mut dyn Write) -> Result<(), SmartcapError>;
}
