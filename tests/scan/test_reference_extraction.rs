use strata_core::types::ApiKind;
use strata_scan::unit::{scan_unit, MemberBuilder, Op, UnitBuilder};

#[test]
fn test_field_initializer_attributed_to_field() {
    let unit = UnitBuilder::new("foo/bar/Holder")
        .source_file("Holder.java")
        .member(
            MemberBuilder::field("map", "Landroid/util/ArrayMap;", 9).op(
                9,
                Op::New {
                    class: "android/util/ArrayMap".to_string(),
                },
            ),
        )
        .build();

    let scan = scan_unit(&unit, "src/foo/bar/Holder.java");
    assert_eq!(scan.references.len(), 1);
    let r = &scan.references[0];
    assert_eq!(r.kind, ApiKind::Class);
    assert_eq!(r.owner, "android/util/ArrayMap");
    assert_eq!(r.line, 9);
    // Fields are keyed by bare name; methods carry their descriptor.
    assert_eq!(r.enclosing.as_ref().unwrap().member.as_deref(), Some("map"));
}

#[test]
fn test_method_and_field_keys_stay_distinct() {
    let unit = UnitBuilder::new("foo/bar/Holder")
        .source_file("Holder.java")
        .member(MemberBuilder::field("size", "I", 4).op(
            4,
            Op::GetStatic {
                owner: "android/os/Build$VERSION".to_string(),
                name: "SDK_INT".to_string(),
            },
        ))
        .member(MemberBuilder::method("size", "()I", 8).op(
            9,
            Op::GetField {
                owner: "foo/bar/Holder".to_string(),
                name: "size".to_string(),
            },
        ))
        .build();

    let scan = scan_unit(&unit, "Holder.java");
    let keys: Vec<_> = scan
        .references
        .iter()
        .map(|r| r.enclosing.as_ref().unwrap().member.clone().unwrap())
        .collect();
    assert_eq!(keys, ["size", "size()I"]);
}

#[test]
fn test_all_reference_kinds_surface_from_one_unit() {
    let unit = UnitBuilder::new("foo/bar/Mixed")
        .source_file("Mixed.java")
        .decl_line(3)
        .extends("android/app/Activity")
        .member(
            MemberBuilder::method("go", "()V", 6)
                .op(
                    7,
                    Op::Invoke {
                        owner: "android/app/Activity".to_string(),
                        name: "getActionBar".to_string(),
                        descriptor: "()Landroid/app/ActionBar;".to_string(),
                    },
                )
                .op(
                    8,
                    Op::GetStatic {
                        owner: "android/graphics/PorterDuff$Mode".to_string(),
                        name: "OVERLAY".to_string(),
                    },
                )
                .op(
                    9,
                    Op::New {
                        class: "android/widget/GridLayout".to_string(),
                    },
                ),
        )
        .build();

    let scan = scan_unit(&unit, "Mixed.java");
    let kinds: Vec<_> = scan.references.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        [
            ApiKind::Class,
            ApiKind::Method,
            ApiKind::Field,
            ApiKind::Class,
        ]
    );
    // The supertype reference lands on the declaration line.
    assert_eq!(scan.references[0].line, 3);
}
