//! JSON report rendering.

use strata_check::ScanReport;

use crate::ReportFormatter;

pub struct JsonFormatter;

impl ReportFormatter for JsonFormatter {
    fn format_report(&self, report: &ScanReport) -> String {
        // ScanReport serialization cannot fail: no maps with non-string
        // keys, no non-finite floats.
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }
}
