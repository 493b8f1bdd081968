mod common;

use common::{js, shape, ts};
use scriptscope_api::OutlineKind::{self, *};
use scriptscope_ts::build_outline;

fn s(name: &str, kind: OutlineKind, indent: usize) -> (String, OutlineKind, usize) {
    (name.to_string(), kind, indent)
}

#[test]
fn given_no_named_constructs_when_build_outline_then_empty() {
    let tree = js("const x = 1;\nlet y = { a: 1, b: [1, 2] };\nconsole.log(x + y.a);\n");
    assert!(build_outline(&tree).is_empty());
}

#[test]
fn given_class_with_constructor_and_methods_when_build_outline_then_members_indented() {
    let tree = ts(r#"class Greeter {
  constructor(name: string) {}
  greet() {}
  farewell() {}
}
"#);
    let outline = build_outline(&tree);
    assert_eq!(
        shape(&outline),
        vec![
            s("Greeter", Class, 0),
            s("constructor ()", Constructor, 1),
            s("greet", Method, 1),
            s("farewell", Method, 1),
        ]
    );
    let lines: Vec<usize> = outline.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![0, 1, 2, 3]);
}

#[test]
fn given_entries_when_build_outline_then_ordinals_follow_document_order() {
    let tree = js(r#"function a() {
  function b() {}
}
class C { m() {} }
const d = () => {};
"#);
    let outline = build_outline(&tree);
    let ordinals: Vec<u32> = outline.iter().map(|e| e.ordinal).collect();
    assert_eq!(ordinals, vec![1, 2, 3, 4, 5]);
    assert_eq!(
        shape(&outline),
        vec![
            s("a", Function, 0),
            s("b", Function, 1),
            s("C", Class, 0),
            s("m", Method, 1),
            s("d", Function, 0),
        ]
    );
}

#[test]
fn given_plain_data_literal_when_build_outline_then_only_method_bearing_sibling_listed() {
    let tree = js(r#"var config = {
  data: { nested: { deep: 1 } },
  helpers: {
    format: function (v) { return v; }
  }
};
"#);
    let outline = build_outline(&tree);
    assert_eq!(
        shape(&outline),
        vec![s("helpers", ObjectLiteral, 0), s("format", Method, 1)]
    );
    assert_eq!(outline[0].line, 2);
    assert_eq!(outline[1].line, 3);
}

#[test]
fn given_literal_nested_in_data_literal_when_build_outline_then_methods_still_found() {
    let tree = js(r#"function setup() {
  var plain = { items: [ { render() {} } ] };
}
"#);
    assert_eq!(
        shape(&build_outline(&tree)),
        vec![
            s("setup", Function, 0),
            s("{}", ObjectLiteral, 1),
            s("render", Method, 2),
        ]
    );
}

#[test]
fn given_getter_only_literal_when_build_outline_then_literal_listed() {
    let tree = js(r#"const point = {
  x: 1,
  get norm() { return 1; },
};
"#);
    assert_eq!(
        shape(&build_outline(&tree)),
        vec![s("point", ObjectLiteral, 0), s("norm", Get, 1)]
    );
}

#[test]
fn given_class_accessors_when_build_outline_then_get_and_set_kinds() {
    let tree = ts("class A {\n  set value(v) {}\n  get value() { return 1; }\n  get() {}\n}\n");
    assert_eq!(
        shape(&build_outline(&tree)),
        vec![
            s("A", Class, 0),
            s("value", Set, 1),
            s("value", Get, 1),
            s("get", Method, 1),
        ]
    );
}

#[test]
fn given_callback_arguments_when_build_outline_then_named_after_callee() {
    let tree = js(r#"describe("suite", function () {
  it("works", () => {});
});
"#);
    assert_eq!(
        shape(&build_outline(&tree)),
        vec![s("describe()", Function, 0), s("it()", Function, 1)]
    );
}

#[test]
fn given_assignments_when_build_outline_then_named_after_target() {
    let tree = js(r#"module.exports.handler = function () {};
handler = function () {};
app
  .routes
  .index = function () {};
"#);
    assert_eq!(
        shape(&build_outline(&tree)),
        vec![
            s("module.exports.handler", Function, 0),
            s("handler", Function, 0),
            s(".index", Function, 0),
        ]
    );
}

#[test]
fn given_property_values_when_build_outline_then_function_is_method_and_arrow_is_function() {
    let tree = js(r#"const api = { fetch: () => {} };
const svc = { run: function runner() {} };
"#);
    assert_eq!(
        shape(&build_outline(&tree)),
        vec![
            s("fetch", Function, 0),
            s("svc", ObjectLiteral, 0),
            s("runner", Method, 1),
        ]
    );
}

#[test]
fn given_unnamed_constructs_when_build_outline_then_placeholders() {
    let tree = js("export default () => {};\nconst Foo = class {};\n(function () {})();\n");
    assert_eq!(
        shape(&build_outline(&tree)),
        vec![
            s("() => {}", Function, 0),
            s("{}", Class, 0),
            s("{}", Function, 0),
        ]
    );
}

#[test]
fn given_typescript_signatures_when_build_outline_then_listed_as_methods() {
    let tree = ts(r#"interface Shape {
  area(): number;
}
abstract class Base {
  abstract run(): void;
}
"#);
    assert_eq!(
        shape(&build_outline(&tree)),
        vec![s("area", Method, 0), s("Base", Class, 0), s("run", Method, 1)]
    );
}

#[test]
fn given_object_constructor_method_when_build_outline_then_plain_method() {
    let tree = js("const o = { constructor() {} };\n");
    assert_eq!(
        shape(&build_outline(&tree)),
        vec![s("o", ObjectLiteral, 0), s("constructor", Method, 1)]
    );
}

#[test]
fn given_same_tree_when_build_outline_twice_then_identical() {
    let tree = ts("class A { m() { return { f() {} }; } }\n");
    assert_eq!(build_outline(&tree), build_outline(&tree));
}

#[test]
fn given_deeply_nested_arrays_when_build_outline_then_walk_completes() {
    let depth = 50_000;
    let source = format!(
        "var a = {}function inner() {{}}{};\n",
        "[".repeat(depth),
        "]".repeat(depth)
    );
    let tree = js(&source);
    assert_eq!(shape(&build_outline(&tree)), vec![s("inner", Function, 0)]);
}

#[test]
fn given_nested_functions_when_build_outline_then_depth_restored_after_each() {
    let tree = js("function a() { function b() { function c() {} } }\nfunction d() {}\n");
    assert_eq!(
        shape(&build_outline(&tree)),
        vec![
            s("a", Function, 0),
            s("b", Function, 1),
            s("c", Function, 2),
            s("d", Function, 0),
        ]
    );
}
