use crate::syntax::SyntaxTree;
use scriptscope_api::{Diagnostic, DiagnosticCategory};
use tree_sitter::Node;

/// Syntax errors recovered by the parser, in document order.
///
/// An `ERROR` node is reported once as a whole; its insides are not searched
/// further. Tokens the parser had to invent are reported as expected tokens.
pub fn syntactic_diagnostics(tree: &SyntaxTree) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    if tree.has_errors() {
        collect(tree, tree.root_node(), &mut out);
    }
    out
}

fn collect<'t>(tree: &SyntaxTree, root: Node<'t>, out: &mut Vec<Diagnostic>) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() {
            out.push(diagnostic(tree, &node, "Syntax error.".to_string()));
            continue;
        }
        if node.is_missing() {
            out.push(diagnostic(tree, &node, format!("'{}' expected.", node.kind())));
            continue;
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'t>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
}

fn diagnostic(tree: &SyntaxTree, node: &Node, message: String) -> Diagnostic {
    let start = node.start_byte();
    let position = node.start_position();
    let line_start = start.saturating_sub(position.column);
    let character = tree
        .source()
        .get(line_start..start)
        .map(|prefix| prefix.chars().count())
        .unwrap_or(position.column);
    Diagnostic {
        message,
        category: DiagnosticCategory::Error,
        start,
        length: node.end_byte() - start,
        line: position.row,
        character,
    }
}
