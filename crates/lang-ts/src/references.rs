//! Member and index names accessed on tracked root identifiers.

use crate::literal::LiteralResolver;
use crate::naming::unquote;
use crate::syntax::{SyntaxKind, SyntaxTree};
use scriptscope_api::ReferenceMap;
use tree_sitter::Node;

/// Collection whose entries all share one shape.
pub const PRINCIPAL_COLLECTION: &str = "Users";
/// Index identifier standing for the current principal.
pub const CURRENT_PRINCIPAL: &str = "principal";
/// Member recorded for `Users[principal]`.
pub const ADMINISTRATIVE_MEMBER: &str = "System";

/// Collect, for every tracked root, the distinct names accessed on it.
///
/// Handles `root.member`, `root["literal"]`, `root[a.b]` (through the literal
/// oracle) and the fixed `Users[principal]` alias. Any other index shape is
/// left unresolved. Every tracked root appears in the result.
pub fn resolve_references<I, S>(
    tree: &SyntaxTree,
    roots: I,
    literals: &dyn LiteralResolver,
) -> ReferenceMap
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut map = ReferenceMap::with_roots(roots);
    if map.is_empty() {
        return map;
    }

    let mut stack = vec![tree.root_node()];
    while let Some(node) = stack.pop() {
        match SyntaxKind::of(&node) {
            SyntaxKind::MemberAccess => record_member(tree, &node, &mut map),
            SyntaxKind::SubscriptAccess => record_subscript(tree, &node, literals, &mut map),
            _ => {}
        }
        // Children go on in reverse so that pops follow document order.
        let mut cursor = node.walk();
        let children: Vec<_> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    tracing::debug!(
        file = tree.file_name(),
        roots = map.len(),
        accesses = map.access_count(),
        "resolved references"
    );
    map
}

fn tracked_base(tree: &SyntaxTree, node: &Node, map: &ReferenceMap) -> Option<String> {
    let object = node.child_by_field_name("object")?;
    let base = tree.text(&object);
    map.is_tracked(base).then(|| base.to_string())
}

fn record_member(tree: &SyntaxTree, node: &Node, map: &mut ReferenceMap) {
    let Some(root) = tracked_base(tree, node, map) else {
        return;
    };
    if let Some(property) = node.child_by_field_name("property") {
        map.record(&root, tree.text(&property));
    }
}

fn record_subscript(
    tree: &SyntaxTree,
    node: &Node,
    literals: &dyn LiteralResolver,
    map: &mut ReferenceMap,
) {
    let Some(root) = tracked_base(tree, node, map) else {
        return;
    };
    let Some(index) = node.child_by_field_name("index") else {
        return;
    };

    match SyntaxKind::of(&index) {
        SyntaxKind::Identifier => {
            // Dynamic identifiers are unresolvable except for this alias.
            if root == PRINCIPAL_COLLECTION && tree.text(&index) == CURRENT_PRINCIPAL {
                map.record(&root, ADMINISTRATIVE_MEMBER);
            }
        }
        SyntaxKind::MemberAccess => {
            if let Some(value) = literals.resolve_literal(&index, tree.source()) {
                map.record(&root, value.to_string());
            }
        }
        SyntaxKind::StringLiteral => {
            map.record(&root, unquote(tree.text(&index)));
        }
        _ => {}
    }
}
