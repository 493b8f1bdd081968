use scriptscope_api::{OutlineEntry, OutlineKind, ScriptKind};
use scriptscope_ts::{SyntaxTree, parse_script};

#[allow(dead_code)]
pub fn ts(source: &str) -> SyntaxTree {
    parse_script("test.ts", source, ScriptKind::Ts).expect("parse typescript")
}

#[allow(dead_code)]
pub fn js(source: &str) -> SyntaxTree {
    parse_script("test.js", source, ScriptKind::Js).expect("parse javascript")
}

/// (name, kind, indent) triples for compact assertions.
#[allow(dead_code)]
pub fn shape(entries: &[OutlineEntry]) -> Vec<(String, OutlineKind, usize)> {
    entries
        .iter()
        .map(|e| (e.name.clone(), e.kind, e.indent_amount))
        .collect()
}

#[allow(dead_code)]
pub fn names(set: Option<&std::collections::BTreeSet<String>>) -> Vec<&str> {
    set.map(|s| s.iter().map(String::as_str).collect())
        .unwrap_or_default()
}
