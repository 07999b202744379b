//! `strata check` — scan a project and render the report.

use std::path::{Path, PathBuf};

use strata_check::{ResourceInput, ScanReport, UnitInput};
use strata_core::catalog::ApiCatalog;
use strata_core::config::StrataConfig;
use strata_core::types::ScanFailure;
use strata_output::ReportFormatter;
use strata_scan::walker::InputWalker;
use strata_scan::UnitError;

/// Exit codes: 0 clean, 1 violations or per-file failures, 2 fatal.
pub(crate) fn run(
    formatter: &dyn ReportFormatter,
    path: Option<PathBuf>,
    min: Option<u32>,
    catalog_path: Option<PathBuf>,
) -> i32 {
    let root = path.unwrap_or_else(|| PathBuf::from("."));
    let config = StrataConfig::load(&root);
    let declared_min = min.unwrap_or(config.min_version);
    let catalog_path = catalog_path.unwrap_or_else(|| root.join(&config.catalog));

    // A missing or malformed catalog aborts the run before any scanning.
    let catalog = match ApiCatalog::load(&catalog_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("strata: fatal: {e}");
            return 2;
        }
    };

    let report = scan_project(&root, declared_min, &config, &catalog);
    print!("{}", formatter.format_report(&report));

    if report.is_clean() {
        0
    } else {
        1
    }
}

/// Collect and read project inputs, then run the check. Unreadable files
/// join the report as per-file failures alongside malformed units, so both
/// output modes carry them.
fn scan_project(
    root: &Path,
    declared_min: u32,
    config: &StrataConfig,
    catalog: &ApiCatalog,
) -> ScanReport {
    let inputs = InputWalker::new(root, &config.unit_dirs, &config.resource_dirs).walk();

    let mut units = Vec::new();
    let mut resources = Vec::new();
    let mut read_failures = Vec::new();
    for unit_path in &inputs.units {
        let file = relative_display(unit_path, root);
        match std::fs::read(unit_path) {
            Ok(data) => units.push(UnitInput {
                data,
                artifact_path: file,
                source_path: None,
            }),
            Err(e) => read_failures.push(ScanFailure {
                file,
                message: UnitError::Io(e).to_string(),
            }),
        }
    }
    for resource_path in &inputs.resources {
        let file = relative_display(resource_path, root);
        match std::fs::read_to_string(resource_path) {
            Ok(data) => resources.push(ResourceInput { data, path: file }),
            Err(e) => read_failures.push(ScanFailure {
                file,
                message: UnitError::Io(e).to_string(),
            }),
        }
    }

    let mut report = strata_check::check(&units, &resources, declared_min, catalog);
    report.failures.extend(read_failures);
    report
}

fn relative_display(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
