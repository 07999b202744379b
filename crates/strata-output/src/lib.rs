//! Output formatters for strata check reports.
//!
//! Provides two output modes:
//! - **Human** (default): one diagnostic line per violation, `No warnings.`
//!   when the run is clean
//! - **JSON** (`--json`): machine-readable structured output

pub mod human;
pub mod json;

use strata_check::ScanReport;

pub trait ReportFormatter {
    fn format_report(&self, report: &ScanReport) -> String;
}
