mod common;

use common::{names, ts};
use scriptscope_ts::{
    ConstLiteralResolver, NoopLiteralResolver, StaticLiteralResolver, resolve_references,
};

#[test]
fn given_member_string_and_oracle_access_when_resolve_then_all_names_recorded() {
    let tree = ts(r#"const x = { value: "c" };
Things.a;
Things["b"];
Things[x.value];
"#);
    let oracle = StaticLiteralResolver::new().with("x.value", "c");
    let refs = resolve_references(&tree, ["Things"], &oracle);
    assert_eq!(names(refs.get("Things")), vec!["a", "b", "c"]);
}

#[test]
fn given_principal_index_when_resolve_then_records_system() {
    let tree = ts("const principal = \"Bob\";\nUsers[principal].name;\n");
    let refs = resolve_references(&tree, ["Users"], &NoopLiteralResolver);
    assert_eq!(names(refs.get("Users")), vec!["System"]);
}

#[test]
fn given_principal_index_on_other_root_when_resolve_then_nothing_recorded() {
    let tree = ts("Things[principal];\n");
    let refs = resolve_references(&tree, ["Things"], &NoopLiteralResolver);
    assert!(names(refs.get("Things")).is_empty());
}

#[test]
fn given_root_never_accessed_when_resolve_then_key_present_with_empty_set() {
    let tree = ts("Other.x;\n");
    let refs = resolve_references(&tree, ["Things"], &NoopLiteralResolver);
    assert_eq!(refs.len(), 1);
    assert!(refs.get("Things").is_some_and(|s| s.is_empty()));
    assert!(refs.get("Other").is_none());
}

#[test]
fn given_no_roots_when_resolve_then_empty_map() {
    let tree = ts("Things.a;\n");
    let refs = resolve_references(&tree, Vec::<String>::new(), &NoopLiteralResolver);
    assert!(refs.is_empty());
}

#[test]
fn given_repeated_access_when_resolve_then_names_are_distinct() {
    let tree = ts("Things.a;\nThings.a;\nThings['a'];\n");
    let refs = resolve_references(&tree, ["Things"], &NoopLiteralResolver);
    assert_eq!(names(refs.get("Things")), vec!["a"]);
}

#[test]
fn given_nested_access_when_resolve_then_inner_roots_found() {
    let tree = ts("Things[Other.key].name;\nfoo(Things.arg, () => Other.inner);\n");
    let refs = resolve_references(&tree, ["Things", "Other"], &NoopLiteralResolver);
    assert_eq!(names(refs.get("Things")), vec!["arg"]);
    assert_eq!(names(refs.get("Other")), vec!["inner", "key"]);
}

#[test]
fn given_optional_chain_when_resolve_then_member_recorded() {
    let tree = ts("Things?.maybe;\n");
    let refs = resolve_references(&tree, ["Things"], &NoopLiteralResolver);
    assert_eq!(names(refs.get("Things")), vec!["maybe"]);
}

#[test]
fn given_base_that_only_ends_with_root_when_resolve_then_not_matched() {
    let tree = ts("this.Things.x;\nwindow.Things['y'];\n");
    let refs = resolve_references(&tree, ["Things"], &NoopLiteralResolver);
    assert!(names(refs.get("Things")).is_empty());
}

#[test]
fn given_dynamic_indices_when_resolve_then_skipped() {
    let tree = ts("Things[0];\nThings[key];\nThings[`t`];\nThings[a + b];\n");
    let refs = resolve_references(&tree, ["Things"], &NoopLiteralResolver);
    assert!(names(refs.get("Things")).is_empty());
}

#[test]
fn given_unresolvable_oracle_access_when_resolve_then_skipped() {
    let tree = ts("Things[x.value];\n");
    let refs = resolve_references(&tree, ["Things"], &NoopLiteralResolver);
    assert!(names(refs.get("Things")).is_empty());
}

#[test]
fn given_const_declarations_when_resolve_with_const_oracle_then_values_used() {
    let tree = ts(r#"const x = { value: "c" };
enum Field { Name = "name", Age = "age" }
enum Level { Low, High }
const Keys = { nested: { id: "identifier" } } as const;
Things[x.value];
Things[Field.Name];
Things[Level.High];
Things[Keys.nested.id];
"#);
    let oracle = ConstLiteralResolver::from_trees([&tree]);
    let refs = resolve_references(&tree, ["Things"], &oracle);
    assert_eq!(
        names(refs.get("Things")),
        vec!["1", "c", "identifier", "name"]
    );
}

#[test]
fn given_declarations_in_another_tree_when_resolve_then_oracle_sees_them() {
    let lib = ts("enum Mode { Read = 1, Write = 2 }\n");
    let tree = ts("Things[Mode.Write];\n");
    let oracle = ConstLiteralResolver::from_trees([&lib, &tree]);
    let refs = resolve_references(&tree, ["Things"], &oracle);
    assert_eq!(names(refs.get("Things")), vec!["2"]);
}
