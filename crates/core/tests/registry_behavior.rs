use scriptscope_api::{
    CompilerOptions, ExtraLib, ScriptHost, ScriptKind, ScriptTarget, ScriptVersion, SourceOrigin,
};
use scriptscope_core::registry::{DEFAULT_LIB_ES6_NAME, DEFAULT_LIB_NAME};
use scriptscope_core::{ScriptRegistry, ScriptscopeError};
use std::collections::BTreeMap;

fn lib(content: &str) -> ExtraLib {
    ExtraLib {
        content: content.to_string(),
        version: ScriptVersion(1),
    }
}

#[test]
fn test_list_files_order() {
    let mut registry = ScriptRegistry::default();
    registry.sync_buffer("z.ts", ScriptVersion(1), "").unwrap();
    registry.sync_buffer("a.ts", ScriptVersion(1), "").unwrap();

    let mut libs = BTreeMap::new();
    libs.insert("ts:b.d.ts".to_string(), lib("declare const b: number;"));
    libs.insert("ts:a.d.ts".to_string(), lib("declare const a: number;"));
    registry.replace_auxiliary(libs).unwrap();

    assert_eq!(
        registry.list_files(),
        vec!["z.ts", "a.ts", "ts:a.d.ts", "ts:b.d.ts", DEFAULT_LIB_ES6_NAME]
    );
}

#[test]
fn test_stale_version_is_rejected() {
    let mut registry = ScriptRegistry::default();
    registry.sync_buffer("a.ts", ScriptVersion(2), "one").unwrap();

    let err = registry
        .sync_buffer("a.ts", ScriptVersion(2), "two")
        .unwrap_err();
    assert!(matches!(err, ScriptscopeError::StaleVersion { .. }));
    assert_eq!(registry.get_text("a.ts"), Some("one"));

    registry.sync_buffer("a.ts", ScriptVersion(3), "three").unwrap();
    assert_eq!(registry.get_version("a.ts"), Some(ScriptVersion(3)));
    assert_eq!(registry.get_text("a.ts"), Some("three"));
}

#[test]
fn test_reopened_buffer_starts_over() {
    let mut registry = ScriptRegistry::default();
    registry.sync_buffer("a.ts", ScriptVersion(5), "x").unwrap();
    assert!(registry.close_buffer("a.ts"));
    assert!(!registry.close_buffer("a.ts"));
    assert_eq!(registry.get_version("a.ts"), None);

    registry.sync_buffer("a.ts", ScriptVersion(1), "y").unwrap();
    assert_eq!(registry.get_version("a.ts"), Some(ScriptVersion(1)));
}

#[test]
fn test_auxiliary_collision_leaves_registry_unchanged() {
    let mut registry = ScriptRegistry::default();
    registry.sync_buffer("a.ts", ScriptVersion(1), "").unwrap();

    let mut first = BTreeMap::new();
    first.insert("ts:keep.d.ts".to_string(), lib("declare const keep: 1;"));
    registry.replace_auxiliary(first).unwrap();

    let mut clashing = BTreeMap::new();
    clashing.insert("ts:new.d.ts".to_string(), lib(""));
    clashing.insert("a.ts".to_string(), lib(""));
    let err = registry.replace_auxiliary(clashing).unwrap_err();
    assert!(matches!(err, ScriptscopeError::DuplicateSource(name) if name == "a.ts"));

    assert_eq!(registry.get_text("ts:keep.d.ts"), Some("declare const keep: 1;"));
    assert_eq!(registry.get_version("ts:new.d.ts"), None);

    let err = registry
        .sync_buffer("ts:keep.d.ts", ScriptVersion(1), "")
        .unwrap_err();
    assert!(matches!(err, ScriptscopeError::DuplicateSource(_)));
}

#[test]
fn test_auxiliary_replace_is_full_swap() {
    let mut registry = ScriptRegistry::default();
    let mut first = BTreeMap::new();
    first.insert("ts:old.d.ts".to_string(), lib(""));
    registry.replace_auxiliary(first).unwrap();

    let mut second = BTreeMap::new();
    second.insert("ts:new.d.ts".to_string(), lib(""));
    registry.replace_auxiliary(second).unwrap();

    assert_eq!(registry.get_version("ts:old.d.ts"), None);
    assert_eq!(registry.origin_of("ts:new.d.ts"), Some(SourceOrigin::AuxiliaryDeclaration));
}

#[test]
fn test_builtin_follows_target() {
    let mut registry = ScriptRegistry::new(CompilerOptions {
        target: ScriptTarget::ES5,
        ..CompilerOptions::default()
    });
    assert_eq!(registry.list_files(), vec![DEFAULT_LIB_NAME]);
    assert_eq!(registry.get_version(DEFAULT_LIB_NAME), Some(ScriptVersion(1)));
    assert_eq!(registry.get_version(DEFAULT_LIB_ES6_NAME), None);
    assert!(registry.get_text(DEFAULT_LIB_ES6_NAME).is_some());
    assert_eq!(registry.origin_of(DEFAULT_LIB_NAME), Some(SourceOrigin::BuiltinDefault));

    registry.set_compiler_options(CompilerOptions::default());
    assert_eq!(registry.list_files(), vec![DEFAULT_LIB_ES6_NAME]);
}

#[test]
fn test_unknown_names_are_absent() {
    let registry = ScriptRegistry::default();
    assert_eq!(registry.get_version("missing.ts"), None);
    assert_eq!(registry.get_text("missing.ts"), None);
    assert_eq!(registry.origin_of("missing.ts"), None);
}

#[test]
fn test_script_kind_uses_allow_js() {
    let ts = ScriptRegistry::default();
    assert_eq!(ts.script_kind("inmemory://model/1"), ScriptKind::Ts);
    assert_eq!(ts.script_kind("view.tsx"), ScriptKind::Tsx);

    let js = ScriptRegistry::new(CompilerOptions::javascript());
    assert_eq!(js.script_kind("inmemory://model/1"), ScriptKind::Js);
    assert_eq!(js.script_kind("types.d.ts"), ScriptKind::Ts);
}
