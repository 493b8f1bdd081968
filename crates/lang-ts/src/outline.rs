//! Structural outline of classes, functions, accessors and method-bearing
//! object literals.

use crate::naming::{derive_name, member_name};
use crate::syntax::{Accessor, SyntaxKind, SyntaxTree, accessor_of};
use scriptscope_api::{
    ANONYMOUS_ACCESSOR_NAME, ANONYMOUS_ARROW_NAME, ANONYMOUS_NAME, CONSTRUCTOR_NAME, OutlineEntry,
    OutlineKind,
};
use tree_sitter::Node;

/// Walk `tree` in document order and list its outline-worthy constructs.
///
/// Ordinals start at 1. `indent_amount` counts enclosing outline entries only;
/// transparent syntax and filtered object literals do not add depth.
pub fn build_outline(tree: &SyntaxTree) -> Vec<OutlineEntry> {
    let mut walk = OutlineWalk {
        tree,
        entries: Vec::new(),
        ordinal: 0,
        depth: 0,
    };
    walk.visit(tree.root_node());
    tracing::debug!(
        file = tree.file_name(),
        entries = walk.entries.len(),
        "built outline"
    );
    walk.entries
}

/// Accumulator scoped to a single `build_outline` call.
struct OutlineWalk<'t> {
    tree: &'t SyntaxTree,
    entries: Vec<OutlineEntry>,
    ordinal: u32,
    depth: usize,
}

enum Frame<'t> {
    Enter(Node<'t>),
    /// Leaves an emitted entry's scope.
    Exit,
}

impl<'t> OutlineWalk<'t> {
    fn visit(&mut self, root: Node<'t>) {
        let mut stack = vec![Frame::Enter(root)];
        while let Some(frame) = stack.pop() {
            let node = match frame {
                Frame::Enter(node) => node,
                Frame::Exit => {
                    self.depth -= 1;
                    continue;
                }
            };

            let kind = SyntaxKind::of(&node);
            let emitted = match kind {
                SyntaxKind::ObjectLiteral => self.extract_literal(&node),
                SyntaxKind::ClassDeclaration | SyntaxKind::ClassExpression => {
                    self.extract_class(&node);
                    true
                }
                SyntaxKind::MethodDefinition
                | SyntaxKind::MethodSignature
                | SyntaxKind::FunctionDeclaration
                | SyntaxKind::FunctionExpression
                | SyntaxKind::ArrowFunction => {
                    self.extract_function(&node, kind);
                    true
                }
                _ => false,
            };

            if emitted {
                self.depth += 1;
                stack.push(Frame::Exit);
            }
            let mut cursor = node.walk();
            let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev().map(Frame::Enter));
        }
    }

    fn push(&mut self, name: String, kind: OutlineKind, node: &Node) {
        self.ordinal += 1;
        self.entries.push(OutlineEntry {
            name,
            kind,
            ordinal: self.ordinal,
            line: node.start_position().row,
            indent_amount: self.depth,
        });
    }

    fn extract_class(&mut self, node: &Node) {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.tree.text(&n).to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string());
        self.push(name, OutlineKind::Class, node);
    }

    /// Plain data literals are skipped; one method, getter or setter is enough
    /// to list the literal.
    fn extract_literal(&mut self, node: &Node) -> bool {
        if !has_method_member(node) {
            return false;
        }
        let name = derive_name(self.tree, node)
            .name
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string());
        self.push(name, OutlineKind::ObjectLiteral, node);
        true
    }

    fn extract_function(&mut self, node: &Node, kind: SyntaxKind) {
        let tree = self.tree;
        let own_name = || {
            node.child_by_field_name("name")
                .and_then(|n| member_name(tree, &n))
        };

        let (name, outline_kind) = match kind {
            SyntaxKind::MethodDefinition | SyntaxKind::MethodSignature => {
                match accessor_of(node) {
                    Some(Accessor::Get) => (
                        own_name().unwrap_or_else(|| ANONYMOUS_ACCESSOR_NAME.to_string()),
                        OutlineKind::Get,
                    ),
                    Some(Accessor::Set) => (
                        own_name().unwrap_or_else(|| ANONYMOUS_ACCESSOR_NAME.to_string()),
                        OutlineKind::Set,
                    ),
                    None if is_constructor(tree, node) => {
                        (CONSTRUCTOR_NAME.to_string(), OutlineKind::Constructor)
                    }
                    None => (
                        own_name().unwrap_or_else(|| ANONYMOUS_NAME.to_string()),
                        OutlineKind::Method,
                    ),
                }
            }
            SyntaxKind::ArrowFunction => (
                derive_name(tree, node)
                    .name
                    .unwrap_or_else(|| ANONYMOUS_ARROW_NAME.to_string()),
                OutlineKind::Function,
            ),
            _ => {
                let derived = derive_name(tree, node);
                let kind = if derived.from_property {
                    OutlineKind::Method
                } else {
                    OutlineKind::Function
                };
                let name = own_name()
                    .or(derived.name)
                    .unwrap_or_else(|| ANONYMOUS_NAME.to_string());
                (name, kind)
            }
        };
        self.push(name, outline_kind, node);
    }
}

/// A class member named `constructor`. In object literals that name is an
/// ordinary method.
fn is_constructor(tree: &SyntaxTree, node: &Node) -> bool {
    let in_class = node
        .parent()
        .is_some_and(|p| SyntaxKind::of(&p) == SyntaxKind::ClassBody);
    in_class
        && node
            .child_by_field_name("name")
            .is_some_and(|n| tree.text(&n) == "constructor")
}

fn has_method_member(node: &Node) -> bool {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .any(|member| match SyntaxKind::of(&member) {
            SyntaxKind::MethodDefinition => true,
            SyntaxKind::Pair => member
                .child_by_field_name("value")
                .is_some_and(|v| SyntaxKind::of(&v) == SyntaxKind::FunctionExpression),
            _ => false,
        })
}
