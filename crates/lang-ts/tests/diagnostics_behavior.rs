mod common;

use common::{js, ts};
use scriptscope_api::DiagnosticCategory;
use scriptscope_ts::syntactic_diagnostics;

#[test]
fn given_valid_source_when_collect_diagnostics_then_none() {
    let tree = ts("class A { m(): number { return 1; } }\n");
    assert!(!tree.has_errors());
    assert!(syntactic_diagnostics(&tree).is_empty());
}

#[test]
fn given_broken_source_when_collect_diagnostics_then_errors_reported() {
    let tree = js("function broken( {\n  return 1;\n");
    assert!(tree.has_errors());
    let diagnostics = syntactic_diagnostics(&tree);
    assert!(!diagnostics.is_empty());
    assert!(
        diagnostics
            .iter()
            .all(|d| d.category == DiagnosticCategory::Error)
    );
}

#[test]
fn given_broken_source_when_build_outline_then_still_produces_entries() {
    let tree = js("function ok() {}\nfunction broken( {\n");
    let outline = scriptscope_ts::build_outline(&tree);
    assert_eq!(outline.first().map(|e| e.name.as_str()), Some("ok"));
}

#[test]
fn given_error_deep_inside_nesting_when_collect_diagnostics_then_reported() {
    let depth = 20_000;
    let source = format!("var a = {}1 ){};\n", "[".repeat(depth), "]".repeat(depth));
    let tree = js(&source);
    assert!(tree.has_errors());
    assert!(!syntactic_diagnostics(&tree).is_empty());
}
