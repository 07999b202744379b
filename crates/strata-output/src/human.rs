//! Human-readable report rendering.

use strata_check::ScanReport;
use strata_core::types::Violation;

use crate::ReportFormatter;

pub struct HumanFormatter;

impl ReportFormatter for HumanFormatter {
    fn format_report(&self, report: &ScanReport) -> String {
        if report.is_clean() {
            return "No warnings.\n".to_string();
        }

        let mut out = String::new();
        // Per-file scan failures first: distinct diagnostics, never dressed
        // up as API violations.
        for f in &report.failures {
            out.push_str(&format!("{}: Error: {}\n", f.file, f.message));
        }
        for v in &report.violations {
            out.push_str(&format_violation(v));
        }
        out
    }
}

fn format_violation(v: &Violation) -> String {
    format!(
        "{}:{}: Error: {} requires API level {} (current min is {}): {}\n",
        v.reference.file,
        v.reference.line,
        v.reference.kind.label(),
        v.required,
        v.declared_min,
        v.reference.display_signature(),
    )
}
