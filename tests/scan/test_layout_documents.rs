use strata_core::types::ApiKind;
use strata_scan::ui::scan_document;
use strata_scan::UnitError;

const LAYOUT: &str = r##"<?xml version="1.0" encoding="utf-8"?>
<LinearLayout xmlns:android="http://schemas.android.com/apk/res/android"
    android:orientation="vertical">

    <Button
        android:text="Button" />

    <View
        android:background="#ff0000" />

    <GridLayout>
        <Space />
    </GridLayout>
</LinearLayout>
"##;

#[test]
fn test_tags_reported_at_their_lines() {
    let refs = scan_document(LAYOUT, "res/layout/main.xml").unwrap();
    let tags: Vec<(&str, u32)> = refs.iter().map(|r| (r.owner.as_str(), r.line)).collect();
    assert_eq!(
        tags,
        [
            ("LinearLayout", 2),
            ("Button", 5),
            ("GridLayout", 11),
            ("Space", 12),
        ]
    );
    for r in &refs {
        assert_eq!(r.kind, ApiKind::UiTag);
        assert_eq!(r.file, "res/layout/main.xml");
        assert!(r.member.is_none());
        assert!(r.enclosing.is_none());
    }
}

#[test]
fn test_universal_tags_never_surface() {
    let content = "<merge>\n  <View />\n  <ViewStub />\n  <SurfaceView />\n  \
                   <TextureView />\n  <include layout=\"@layout/other\" />\n  \
                   <requestFocus />\n</merge>\n";
    let refs = scan_document(content, "res/layout/x.xml").unwrap();
    assert!(refs.is_empty());
}

#[test]
fn test_unclosed_tag_is_malformed() {
    let err = scan_document("<LinearLayout><Button></LinearLayout>", "x.xml").unwrap_err();
    assert!(matches!(err, UnitError::MalformedDocument(_)));
}

#[test]
fn test_empty_document_yields_nothing() {
    let refs = scan_document("", "x.xml").unwrap();
    assert!(refs.is_empty());
}
