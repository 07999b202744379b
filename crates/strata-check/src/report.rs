//! Result assembly: dedup, deterministic ordering, and the report type.

use std::collections::HashSet;

use serde::Serialize;

use strata_core::types::{ScanFailure, Violation};

/// Everything one run produced. Violations are sorted by file, then line
/// ascending, then scan-discovery order for same-line entries.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub declared_min: u32,
    pub violations: Vec<Violation>,
    pub failures: Vec<ScanFailure>,
}

impl ScanReport {
    /// Assemble a report from violations in scan-discovery order.
    ///
    /// Exact repeats of (file, line, kind, signature, required) collapse to
    /// the first discovery; class-level and member-level hits at one call
    /// site differ in signature and are therefore never merged, nor are
    /// distinct signatures reached through different resolution paths.
    pub fn new(
        declared_min: u32,
        violations: Vec<Violation>,
        failures: Vec<ScanFailure>,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut kept: Vec<Violation> = violations
            .into_iter()
            .filter(|v| {
                seen.insert((
                    v.reference.file.clone(),
                    v.reference.line,
                    v.reference.kind,
                    v.reference.owner.clone(),
                    v.reference.member.clone(),
                    v.required,
                ))
            })
            .collect();

        // Stable sort keeps discovery order for same-line entries.
        kept.sort_by(|a, b| {
            a.reference
                .file
                .cmp(&b.reference.file)
                .then(a.reference.line.cmp(&b.reference.line))
        });

        Self {
            declared_min,
            violations: kept,
            failures,
        }
    }

    /// No violations and no per-file failures.
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty() && self.failures.is_empty()
    }
}
