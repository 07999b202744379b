use crate::fixtures;
use strata_check::{check, UnitInput};
use strata_core::types::Suppression;
use strata_scan::unit::{MemberBuilder, Op, UnitBuilder};

fn get_action_bar() -> Op {
    Op::Invoke {
        owner: "android/app/Activity".to_string(),
        name: "getActionBar".to_string(),
        descriptor: "()Landroid/app/ActionBar;".to_string(),
    }
}

fn grid_layout() -> Op {
    Op::New {
        class: "android/widget/GridLayout".to_string(),
    }
}

fn input(data: Vec<u8>) -> UnitInput {
    UnitInput {
        data,
        artifact_path: "bin/foo/bar/SuppressTest.scu".to_string(),
        source_path: Some("SuppressTest.java".to_string()),
    }
}

#[test]
fn test_annotated_method_suppresses_everything_inside_it() {
    let data = UnitBuilder::new("foo/bar/SuppressTest")
        .source_file("SuppressTest.java")
        .member(
            MemberBuilder::method("method1", "()V", 10)
                .suppress(Suppression::All)
                .op(12, get_action_bar())
                .op(14, grid_layout()),
        )
        .member(MemberBuilder::method("method2", "()V", 20).op(22, get_action_bar()))
        .encode();

    let report = check(&[input(data)], &[], 1, &fixtures::catalog());
    // method1 is silent; method2 still reports.
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].reference.line, 22);
}

#[test]
fn test_named_check_id_suppresses_only_matches() {
    let data = UnitBuilder::new("foo/bar/SuppressTest")
        .source_file("SuppressTest.java")
        .member(
            MemberBuilder::method("method3", "()V", 74)
                .suppress(Suppression::Checks(vec!["unrelated".to_string()]))
                .op(76, get_action_bar()),
        )
        .encode();

    // An annotation naming only an unrelated issue id does not suppress.
    let report = check(&[input(data)], &[], 1, &fixtures::catalog());
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].reference.line, 76);
}

#[test]
fn test_member_annotation_unions_with_class_annotation() {
    // A method annotation naming an unrelated id narrows nothing: the
    // class-level suppress-all still covers the call inside it.
    let data = UnitBuilder::new("foo/bar/SuppressTest")
        .source_file("SuppressTest.java")
        .suppress(Suppression::All)
        .member(
            MemberBuilder::method("method4", "()V", 30)
                .suppress(Suppression::Checks(vec!["unrelated".to_string()]))
                .op(32, get_action_bar()),
        )
        .encode();

    let report = check(&[input(data)], &[], 1, &fixtures::catalog());
    assert!(report.is_clean());
}

#[test]
fn test_class_annotation_covers_declaration_references() {
    let data = UnitBuilder::new("foo/bar/SuppressTest")
        .source_file("SuppressTest.java")
        .decl_line(5)
        .extends("android/widget/GridLayout")
        .suppress(Suppression::Checks(vec!["min-api".to_string()]))
        .encode();

    let report = check(&[input(data)], &[], 1, &fixtures::catalog());
    assert!(report.is_clean());
}

#[test]
fn test_field_annotation_scopes_to_that_field_only() {
    // Initializer references carry the field as their enclosing member, so
    // an annotation on the field silences them and nothing else.
    let data = UnitBuilder::new("foo/bar/SuppressTest")
        .source_file("SuppressTest.java")
        .member(
            MemberBuilder::field("report", "Landroid/app/ApplicationErrorReport;", 16)
                .suppress(Suppression::All)
                .op(
                    16,
                    Op::New {
                        class: "android/app/ApplicationErrorReport".to_string(),
                    },
                ),
        )
        .member(MemberBuilder::method("other", "()V", 20).op(21, grid_layout()))
        .encode();

    let report = check(&[input(data)], &[], 1, &fixtures::catalog());
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].reference.line, 21);
}

#[test]
fn test_only_persisted_scopes_exist() {
    // The unit format carries class-level and member-level suppression
    // blocks and nothing narrower: a source-level annotation inside a
    // method body has no representation here, so its references always
    // surface. This is the compiled-output granularity constraint.
    let data = UnitBuilder::new("foo/bar/SuppressTest4")
        .source_file("SuppressTest4.java")
        .member(MemberBuilder::method("method", "()V", 14).op(16, grid_layout()))
        .encode();

    let report = check(&[input(data)], &[], 1, &fixtures::catalog());
    assert_eq!(report.violations.len(), 1);
}

#[test]
fn test_suppression_does_not_leak_across_units() {
    let suppressed = UnitBuilder::new("foo/bar/A")
        .source_file("A.java")
        .suppress(Suppression::All)
        .member(MemberBuilder::method("m", "()V", 5).op(6, grid_layout()))
        .encode();
    let plain = UnitBuilder::new("foo/bar/B")
        .source_file("B.java")
        .member(MemberBuilder::method("m", "()V", 5).op(6, grid_layout()))
        .encode();

    let report = check(
        &[
            input(suppressed),
            UnitInput {
                data: plain,
                artifact_path: "bin/foo/bar/B.scu".to_string(),
                source_path: Some("B.java".to_string()),
            },
        ],
        &[],
        1,
        &fixtures::catalog(),
    );
    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].reference.file, "B.java");
}
