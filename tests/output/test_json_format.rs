use crate::fixtures;
use strata_check::{check, UnitInput};
use strata_output::json::JsonFormatter;
use strata_output::ReportFormatter;

#[test]
fn test_report_shape() {
    let report = check(
        &[fixtures::api_call_test_unit()],
        &[fixtures::layout_resource()],
        13,
        &fixtures::catalog(),
    );
    let out = JsonFormatter.format_report(&report);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(parsed["declared_min"], 13);
    assert!(parsed["failures"].as_array().unwrap().is_empty());

    let violations = parsed["violations"].as_array().unwrap();
    assert_eq!(violations.len(), 5);

    // Unit violations sort ahead of the layout's by file.
    let first = &violations[0];
    assert_eq!(first["reference"]["kind"], "class");
    assert_eq!(first["reference"]["file"], "ApiCallTest.java");
    assert_eq!(first["reference"]["line"], 38);
    assert_eq!(first["required"], 14);
    assert_eq!(first["declared_min"], 13);

    let last = &violations[4];
    assert_eq!(last["reference"]["kind"], "ui_tag");
    assert_eq!(last["reference"]["owner"], "GridLayout");
    assert_eq!(last["reference"]["file"], "res/layout/layout.xml");
    assert_eq!(last["reference"]["line"], 20);
}

#[test]
fn test_failures_are_structured() {
    let broken = UnitInput {
        data: vec![0xde, 0xad],
        artifact_path: "bin/Broken.scu".to_string(),
        source_path: None,
    };
    let report = check(&[broken], &[], 1, &fixtures::catalog());
    let out = JsonFormatter.format_report(&report);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();

    let failures = parsed["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["file"], "bin/Broken.scu");
    assert!(!failures[0]["message"].as_str().unwrap().is_empty());
    assert!(parsed["violations"].as_array().unwrap().is_empty());
}
