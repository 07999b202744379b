//! The check engine: scans every unit and document, resolves references,
//! applies suppressions, and assembles the report.

use rayon::prelude::*;

use strata_core::catalog::ApiCatalog;
use strata_core::types::{ScanFailure, Violation, CHECK_ID};
use strata_scan::ui;
use strata_scan::unit::{read_unit, scan_unit};

use crate::report::ScanReport;
use crate::resolve::VersionResolver;
use crate::suppress;

/// One compiled artifact with its originating source path.
#[derive(Debug, Clone)]
pub struct UnitInput {
    pub data: Vec<u8>,
    /// Path of the artifact itself; cited by parse-failure diagnostics.
    pub artifact_path: String,
    /// Originating source path, cited by violations. `None` falls back to
    /// the source-file name embedded in the unit.
    pub source_path: Option<String>,
}

/// One UI document with its path.
#[derive(Debug, Clone)]
pub struct ResourceInput {
    pub data: String,
    pub path: String,
}

/// Check every unit and document against `declared_min`.
///
/// Pure: all inputs are supplied by the caller, the catalog is read-only
/// and shared across the rayon worker pool without synchronization, and
/// per-task output is merged by the order-preserving parallel collect. A
/// malformed unit is a terminal per-file failure; everything else scans
/// unaffected.
pub fn check(
    units: &[UnitInput],
    resources: &[ResourceInput],
    declared_min: u32,
    catalog: &ApiCatalog,
) -> ScanReport {
    let unit_outcomes: Vec<Outcome> = units
        .par_iter()
        .map(|input| check_one_unit(input, declared_min, catalog))
        .collect();

    let resource_outcomes: Vec<Outcome> = resources
        .par_iter()
        .map(|input| check_one_document(input, declared_min, catalog))
        .collect();

    let mut violations = Vec::new();
    let mut failures = Vec::new();
    for outcome in unit_outcomes.into_iter().chain(resource_outcomes) {
        match outcome {
            Outcome::Violations(mut v) => violations.append(&mut v),
            Outcome::Failed(f) => failures.push(f),
        }
    }

    ScanReport::new(declared_min, violations, failures)
}

enum Outcome {
    Violations(Vec<Violation>),
    Failed(ScanFailure),
}

fn check_one_unit(input: &UnitInput, declared_min: u32, catalog: &ApiCatalog) -> Outcome {
    let unit = match read_unit(&input.data) {
        Ok(u) => u,
        Err(e) => {
            return Outcome::Failed(ScanFailure {
                file: input.artifact_path.clone(),
                message: e.to_string(),
            })
        }
    };

    let file = match &input.source_path {
        Some(path) => path.clone(),
        None => unit.source_file.clone(),
    };

    let scan = scan_unit(&unit, &file);
    let resolver = VersionResolver::new(catalog);

    let violations = scan
        .references
        .into_iter()
        .filter_map(|reference| {
            let required = resolver.required_version(&reference)?;
            if required <= declared_min {
                return None;
            }
            if suppress::is_suppressed(&scan.suppressions, &reference, CHECK_ID) {
                return None;
            }
            Some(Violation {
                reference,
                required,
                declared_min,
            })
        })
        .collect();

    Outcome::Violations(violations)
}

fn check_one_document(input: &ResourceInput, declared_min: u32, catalog: &ApiCatalog) -> Outcome {
    let references = match ui::scan_document(&input.data, &input.path) {
        Ok(r) => r,
        Err(e) => {
            return Outcome::Failed(ScanFailure {
                file: input.path.clone(),
                message: e.to_string(),
            })
        }
    };

    let resolver = VersionResolver::new(catalog);
    let violations = references
        .into_iter()
        .filter_map(|reference| {
            let required = resolver.required_version(&reference)?;
            (required > declared_min).then_some(Violation {
                reference,
                required,
                declared_min,
            })
        })
        .collect();

    Outcome::Violations(violations)
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
