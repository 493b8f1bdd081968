use super::{LiteralResolver, LiteralValue};
use crate::naming::{member_name, unquote};
use crate::syntax::{SyntaxKind, SyntaxTree, is_const_declaration};
use std::collections::HashMap;
use tree_sitter::Node;

/// Heuristic oracle backed by constant declarations found in a set of trees.
///
/// Indexes enum members (explicit values and auto-incremented numbers) and
/// `const` bindings initialized with literals or literal-valued object
/// literals, keyed by dotted path (`Color.Red`, `keys.value`). Declarations are
/// keyed by their own name regardless of enclosing namespaces, so a shadowing
/// declaration later in the set wins.
#[derive(Debug, Default, Clone)]
pub struct ConstLiteralResolver {
    values: HashMap<String, LiteralValue>,
}

impl ConstLiteralResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_trees<'a>(trees: impl IntoIterator<Item = &'a SyntaxTree>) -> Self {
        let mut resolver = Self::new();
        for tree in trees {
            resolver.index_tree(tree);
        }
        resolver
    }

    pub fn index_tree(&mut self, tree: &SyntaxTree) {
        let mut stack = vec![tree.root_node()];
        while let Some(node) = stack.pop() {
            match SyntaxKind::of(&node) {
                SyntaxKind::EnumDeclaration => self.index_enum(tree, &node),
                SyntaxKind::LexicalDeclaration if is_const_declaration(&node) => {
                    self.index_const(tree, &node)
                }
                _ => {}
            }
            let mut cursor = node.walk();
            let children: Vec<_> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }

    pub fn get(&self, path: &str) -> Option<&LiteralValue> {
        self.values.get(path)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn index_enum(&mut self, tree: &SyntaxTree, node: &Node) {
        let (Some(name), Some(body)) = (
            node.child_by_field_name("name"),
            node.child_by_field_name("body"),
        ) else {
            return;
        };
        let enum_name = tree.text(&name).to_string();

        // Next auto-increment value; unknown after a non-numeric initializer.
        let mut next: Option<f64> = Some(0.0);
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            let (key, value) = match SyntaxKind::of(&member) {
                SyntaxKind::EnumAssignment => {
                    let key = member
                        .child_by_field_name("name")
                        .and_then(|n| member_name(tree, &n));
                    let value = member
                        .child_by_field_name("value")
                        .and_then(|v| literal_of(tree, &v));
                    (key, value)
                }
                SyntaxKind::Comment => continue,
                _ => (member_name(tree, &member), next.map(LiteralValue::Number)),
            };

            next = match &value {
                Some(LiteralValue::Number(n)) => Some(n + 1.0),
                _ => None,
            };
            if let (Some(key), Some(value)) = (key, value) {
                self.values.insert(format!("{enum_name}.{key}"), value);
            }
        }
    }

    fn index_const(&mut self, tree: &SyntaxTree, node: &Node) {
        let mut cursor = node.walk();
        for declarator in node.named_children(&mut cursor) {
            if SyntaxKind::of(&declarator) != SyntaxKind::VariableDeclarator {
                continue;
            }
            let (Some(name), Some(value)) = (
                declarator.child_by_field_name("name"),
                declarator.child_by_field_name("value"),
            ) else {
                continue;
            };
            if SyntaxKind::of(&name) != SyntaxKind::Identifier {
                continue;
            }
            let path = tree.text(&name).to_string();
            self.index_value(tree, path, &value);
        }
    }

    fn index_value(&mut self, tree: &SyntaxTree, path: String, value: &Node) {
        let value = unwrap_expression(value);
        if SyntaxKind::of(&value) == SyntaxKind::ObjectLiteral {
            let mut cursor = value.walk();
            for pair in value.named_children(&mut cursor) {
                if SyntaxKind::of(&pair) != SyntaxKind::Pair {
                    continue;
                }
                let (Some(key), Some(inner)) = (
                    pair.child_by_field_name("key").and_then(|k| member_name(tree, &k)),
                    pair.child_by_field_name("value"),
                ) else {
                    continue;
                };
                self.index_value(tree, format!("{path}.{key}"), &inner);
            }
        } else if let Some(literal) = literal_of(tree, &value) {
            self.values.insert(path, literal);
        }
    }
}

impl LiteralResolver for ConstLiteralResolver {
    fn resolve_literal(&self, expr: &Node, source: &str) -> Option<LiteralValue> {
        let path = static_path(expr, source)?;
        self.values.get(&path).cloned()
    }
}

/// Look through parentheses and `as`/`satisfies` assertions.
fn unwrap_expression<'a>(node: &Node<'a>) -> Node<'a> {
    let mut current = *node;
    loop {
        match SyntaxKind::of(&current) {
            SyntaxKind::ParenthesizedExpression | SyntaxKind::TypeAssertion => {
                match current.named_child(0) {
                    Some(inner) => current = inner,
                    None => return current,
                }
            }
            _ => return current,
        }
    }
}

fn literal_of(tree: &SyntaxTree, node: &Node) -> Option<LiteralValue> {
    let node = unwrap_expression(node);
    match SyntaxKind::of(&node) {
        SyntaxKind::StringLiteral => Some(LiteralValue::String(unquote(tree.text(&node)).to_string())),
        SyntaxKind::NumberLiteral => parse_number(tree.text(&node)).map(LiteralValue::Number),
        _ => None,
    }
}

fn parse_number(text: &str) -> Option<f64> {
    let text = text.replace('_', "");
    with_radix(&text, &["0x", "0X"], 16)
        .or_else(|| with_radix(&text, &["0o", "0O"], 8))
        .or_else(|| with_radix(&text, &["0b", "0B"], 2))
        .or_else(|| text.parse::<f64>().ok())
}

fn with_radix(text: &str, prefixes: &[&str], radix: u32) -> Option<f64> {
    prefixes
        .iter()
        .find_map(|p| text.strip_prefix(p))
        .and_then(|digits| u64::from_str_radix(digits, radix).ok())
        .map(|v| v as f64)
}

/// Dotted path of a member chain made of plain names and string subscripts.
fn static_path(node: &Node, source: &str) -> Option<String> {
    let text = |n: &Node| n.utf8_text(source.as_bytes()).ok().map(str::to_string);
    match SyntaxKind::of(node) {
        SyntaxKind::Identifier => text(node),
        SyntaxKind::MemberAccess => {
            let object = static_path(&node.child_by_field_name("object")?, source)?;
            let property = node.child_by_field_name("property")?;
            if SyntaxKind::of(&property) != SyntaxKind::PropertyIdentifier {
                return None;
            }
            Some(format!("{object}.{}", text(&property)?))
        }
        SyntaxKind::SubscriptAccess => {
            let object = static_path(&node.child_by_field_name("object")?, source)?;
            let index = node.child_by_field_name("index")?;
            if SyntaxKind::of(&index) != SyntaxKind::StringLiteral {
                return None;
            }
            Some(format!("{object}.{}", unquote(&text(&index)?)))
        }
        SyntaxKind::ParenthesizedExpression => static_path(&node.named_child(0)?, source),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_forms() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("0x1F"), Some(31.0));
        assert_eq!(parse_number("0b101"), Some(5.0));
        assert_eq!(parse_number("1_000"), Some(1000.0));
        assert_eq!(parse_number("2.5"), Some(2.5));
        assert_eq!(parse_number("12n"), None);
    }
}
