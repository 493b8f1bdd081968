use crate::syntax::{SyntaxKind, SyntaxTree};
use tree_sitter::Node;

/// Name an anonymous construct inherits from the slot it is attached to.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct DerivedName {
    pub name: Option<String>,
    /// The construct is the value of an object-literal property.
    pub from_property: bool,
}

impl DerivedName {
    fn named(name: String, from_property: bool) -> Self {
        Self {
            name: Some(name).filter(|n| !n.is_empty()),
            from_property,
        }
    }
}

/// Inspect the immediate syntactic parent of `node` to derive a display name.
pub(crate) fn derive_name(tree: &SyntaxTree, node: &Node) -> DerivedName {
    let Some(parent) = node.parent() else {
        return DerivedName::default();
    };

    match SyntaxKind::of(&parent) {
        SyntaxKind::Pair => {
            let name = parent
                .child_by_field_name("key")
                .and_then(|key| member_name(tree, &key))
                .unwrap_or_default();
            DerivedName::named(name, true)
        }
        SyntaxKind::VariableDeclarator => {
            let name = parent
                .child_by_field_name("name")
                .filter(|n| SyntaxKind::of(n) == SyntaxKind::Identifier)
                .map(|n| tree.text(&n).to_string())
                .unwrap_or_default();
            DerivedName::named(name, false)
        }
        // Passed as an argument: name it after the callee.
        SyntaxKind::Arguments => {
            let name = parent
                .parent()
                .filter(|call| SyntaxKind::of(call) == SyntaxKind::CallExpression)
                .and_then(|call| call.child_by_field_name("function"))
                .map(|callee| format!("{}()", last_line(tree.text(&callee))))
                .unwrap_or_default();
            DerivedName::named(name, false)
        }
        // `assignment_expression` is always a plain `=`; compound operators have
        // their own node type.
        SyntaxKind::Assignment => {
            let name = parent
                .child_by_field_name("left")
                .and_then(|left| match SyntaxKind::of(&left) {
                    SyntaxKind::Identifier | SyntaxKind::MemberAccess => {
                        Some(last_line(tree.text(&left)).to_string())
                    }
                    _ => None,
                })
                .unwrap_or_default();
            DerivedName::named(name, false)
        }
        _ => DerivedName::default(),
    }
}

/// Name of a property key or member: identifiers verbatim, string keys unquoted.
/// Computed and numeric names have no static name.
pub(crate) fn member_name(tree: &SyntaxTree, node: &Node) -> Option<String> {
    let name = match SyntaxKind::of(node) {
        SyntaxKind::Identifier | SyntaxKind::PropertyIdentifier => tree.text(node).to_string(),
        SyntaxKind::StringLiteral => unquote(tree.text(node)).to_string(),
        _ => return None,
    };
    Some(name).filter(|n| !n.is_empty())
}

/// Strip the surrounding quote characters of a string literal's source text.
pub(crate) fn unquote(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(_), Some(_)) => chars.as_str(),
        _ => "",
    }
}

/// Last line of a possibly multi-line expression, trimmed.
pub(crate) fn last_line(text: &str) -> &str {
    text.trim().lines().last().unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"b\""), "b");
        assert_eq!(unquote("'with space'"), "with space");
        assert_eq!(unquote("\"\""), "");
        assert_eq!(unquote("\""), "");
    }

    #[test]
    fn test_last_line_of_chain() {
        assert_eq!(last_line("module.exports"), "module.exports");
        assert_eq!(last_line("app\n    .router\n    .get"), ".get");
        assert_eq!(last_line("  $(document).ready  "), "$(document).ready");
    }
}
