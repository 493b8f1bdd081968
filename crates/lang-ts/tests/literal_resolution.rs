mod common;

use common::{js, ts};
use scriptscope_ts::{ConstLiteralResolver, LiteralValue};

#[test]
fn given_enum_members_when_indexed_then_auto_increment_follows_initializers() {
    let tree = ts("enum Level { Low, Mid = 5, High }\nenum Mixed { A = \"a\", B }\n");
    let oracle = ConstLiteralResolver::from_trees([&tree]);
    assert_eq!(oracle.get("Level.Low"), Some(&LiteralValue::Number(0.0)));
    assert_eq!(oracle.get("Level.Mid"), Some(&LiteralValue::Number(5.0)));
    assert_eq!(oracle.get("Level.High"), Some(&LiteralValue::Number(6.0)));
    assert_eq!(oracle.get("Mixed.A"), Some(&LiteralValue::from("a")));
    assert_eq!(oracle.get("Mixed.B"), None);
}

#[test]
fn given_let_binding_when_indexed_then_ignored() {
    let tree = js("let mutable = \"x\";\nconst fixed = 'y';\n");
    let oracle = ConstLiteralResolver::from_trees([&tree]);
    assert_eq!(oracle.get("mutable"), None);
    assert_eq!(oracle.get("fixed"), Some(&LiteralValue::from("y")));
    assert_eq!(oracle.len(), 1);
}

#[test]
fn given_shadowing_declaration_when_indexed_then_later_one_wins() {
    let first = ts("const key = \"first\";\n");
    let second = ts("const key = \"second\";\n");
    let oracle = ConstLiteralResolver::from_trees([&first, &second]);
    assert_eq!(oracle.get("key"), Some(&LiteralValue::from("second")));
}

#[test]
fn given_non_literal_initializers_when_indexed_then_skipped() {
    let tree = ts("const a = compute();\nconst b = { f() {}, n: 0x10 };\n");
    let oracle = ConstLiteralResolver::from_trees([&tree]);
    assert_eq!(oracle.get("a"), None);
    assert_eq!(oracle.get("b.n"), Some(&LiteralValue::Number(16.0)));
    assert_eq!(oracle.len(), 1);
}
