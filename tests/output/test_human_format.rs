use crate::fixtures;
use strata_check::{check, UnitInput};
use strata_output::human::HumanFormatter;
use strata_output::ReportFormatter;

#[test]
fn test_signature_styles_in_diagnostics() {
    let report = check(
        &[fixtures::api_call_test_unit()],
        &[],
        13,
        &fixtures::catalog(),
    );
    let out = HumanFormatter.format_report(&report);
    assert_eq!(
        out,
        "\
ApiCallTest.java:38: Error: Class requires API level 14 (current min is 13): android.app.ApplicationErrorReport.BatteryInfo
ApiCallTest.java:38: Error: Field requires API level 14 (current min is 13): android.app.ApplicationErrorReport#batteryInfo
ApiCallTest.java:46: Error: Class requires API level 14 (current min is 13): android.widget.GridLayout
ApiCallTest.java:50: Error: Class requires API level 14 (current min is 13): android.app.ApplicationErrorReport
"
    );
}

#[test]
fn test_failures_precede_violations() {
    let broken = UnitInput {
        data: b"PK\x03\x04".to_vec(),
        artifact_path: "bin/classes/foo/bar/Broken.scu".to_string(),
        source_path: Some("Broken.java".to_string()),
    };
    let report = check(
        &[broken],
        &[fixtures::layout_resource()],
        13,
        &fixtures::catalog(),
    );
    let out = HumanFormatter.format_report(&report);
    assert_eq!(
        out,
        "\
bin/classes/foo/bar/Broken.scu: Error: not a compiled unit (bad magic)
res/layout/layout.xml:20: Error: View requires API level 14 (current min is 13): <GridLayout>
"
    );
}

#[test]
fn test_clean_run_prints_no_warnings() {
    let report = check(
        &[],
        &[fixtures::layout_resource()],
        14,
        &fixtures::catalog(),
    );
    assert_eq!(HumanFormatter.format_report(&report), "No warnings.\n");
}
