use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used when no name can be derived for a construct.
pub const ANONYMOUS_NAME: &str = "{}";
pub const ANONYMOUS_ARROW_NAME: &str = "() => {}";
pub const ANONYMOUS_ACCESSOR_NAME: &str = "()";
pub const CONSTRUCTOR_NAME: &str = "constructor ()";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum OutlineKind {
    Class,
    ObjectLiteral,
    Method,
    Constructor,
    Function,
    Get,
    Set,
}

impl OutlineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutlineKind::Class => "Class",
            OutlineKind::ObjectLiteral => "ObjectLiteral",
            OutlineKind::Method => "Method",
            OutlineKind::Constructor => "Constructor",
            OutlineKind::Function => "Function",
            OutlineKind::Get => "Get",
            OutlineKind::Set => "Set",
        }
    }
}

impl fmt::Display for OutlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named construct in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutlineEntry {
    pub name: String,
    pub kind: OutlineKind,
    pub ordinal: u32,
    pub line: usize,
    pub indent_amount: usize,
}

/// Nested view of an outline, rebuilt from the flat entry list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub entry: OutlineEntry,
    pub children: Vec<OutlineNode>,
}

/// Rebuild the hierarchy implied by `indent_amount`: the parent of an entry is
/// the nearest preceding entry one level shallower.
pub fn outline_tree(entries: &[OutlineEntry]) -> Vec<OutlineNode> {
    // Stack of open ancestors; each holds its node and children so far.
    let mut roots: Vec<OutlineNode> = Vec::new();
    let mut stack: Vec<OutlineNode> = Vec::new();

    fn close(stack: &mut Vec<OutlineNode>, roots: &mut Vec<OutlineNode>) {
        if let Some(done) = stack.pop() {
            match stack.last_mut() {
                Some(parent) => parent.children.push(done),
                None => roots.push(done),
            }
        }
    }

    for entry in entries {
        while stack
            .last()
            .is_some_and(|open| open.entry.indent_amount >= entry.indent_amount)
        {
            close(&mut stack, &mut roots);
        }
        stack.push(OutlineNode {
            entry: entry.clone(),
            children: Vec::new(),
        });
    }
    while !stack.is_empty() {
        close(&mut stack, &mut roots);
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, ordinal: u32, indent: usize) -> OutlineEntry {
        OutlineEntry {
            name: name.to_string(),
            kind: OutlineKind::Function,
            ordinal,
            line: ordinal as usize,
            indent_amount: indent,
        }
    }

    #[test]
    fn test_outline_tree_nests_by_indent() {
        let entries = vec![
            entry("A", 1, 0),
            entry("a1", 2, 1),
            entry("inner", 3, 2),
            entry("a2", 4, 1),
            entry("B", 5, 0),
        ];
        let tree = outline_tree(&entries);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].entry.name, "A");
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].children[0].entry.name, "inner");
        assert_eq!(tree[0].children[1].entry.name, "a2");
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let json = serde_json::to_value(entry("f", 1, 0)).unwrap();
        assert_eq!(json["indentAmount"], 0);
        assert_eq!(json["kind"], "Function");
    }
}
