use tree_sitter::Node;

/// Closed classification of the grammar node types the analyses care about.
///
/// The TypeScript, TSX and JavaScript grammars share node type names, so one
/// mapping covers all three. Everything unlisted is [`SyntaxKind::Other`] and is
/// walked through transparently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Program,
    ClassDeclaration,
    ClassExpression,
    ClassBody,
    /// Class or object-literal method, constructor, getter or setter.
    MethodDefinition,
    /// Body-less method in an interface, type literal or abstract class.
    MethodSignature,
    FunctionDeclaration,
    FunctionExpression,
    ArrowFunction,
    ObjectLiteral,
    Pair,
    LexicalDeclaration,
    VariableDeclarator,
    Assignment,
    CallExpression,
    Arguments,
    MemberAccess,
    SubscriptAccess,
    ParenthesizedExpression,
    TypeAssertion,
    EnumDeclaration,
    EnumBody,
    EnumAssignment,
    Identifier,
    PropertyIdentifier,
    StringLiteral,
    NumberLiteral,
    Comment,
    Error,
    Other,
}

impl SyntaxKind {
    pub fn of(node: &Node) -> Self {
        if node.is_error() {
            return SyntaxKind::Error;
        }
        Self::from_type_name(node.kind())
    }

    pub fn from_type_name(kind: &str) -> Self {
        match kind {
            "program" => SyntaxKind::Program,
            "class_declaration" | "abstract_class_declaration" => SyntaxKind::ClassDeclaration,
            "class" => SyntaxKind::ClassExpression,
            "class_body" => SyntaxKind::ClassBody,
            "method_definition" => SyntaxKind::MethodDefinition,
            "method_signature" | "abstract_method_signature" => SyntaxKind::MethodSignature,
            "function_declaration" | "generator_function_declaration" | "function_signature" => {
                SyntaxKind::FunctionDeclaration
            }
            "function_expression" | "generator_function" | "function" => {
                SyntaxKind::FunctionExpression
            }
            "arrow_function" => SyntaxKind::ArrowFunction,
            "object" => SyntaxKind::ObjectLiteral,
            "pair" => SyntaxKind::Pair,
            "lexical_declaration" => SyntaxKind::LexicalDeclaration,
            "variable_declarator" => SyntaxKind::VariableDeclarator,
            "assignment_expression" => SyntaxKind::Assignment,
            "call_expression" => SyntaxKind::CallExpression,
            "arguments" => SyntaxKind::Arguments,
            "member_expression" => SyntaxKind::MemberAccess,
            "subscript_expression" => SyntaxKind::SubscriptAccess,
            "parenthesized_expression" => SyntaxKind::ParenthesizedExpression,
            "as_expression" | "satisfies_expression" => SyntaxKind::TypeAssertion,
            "enum_declaration" => SyntaxKind::EnumDeclaration,
            "enum_body" => SyntaxKind::EnumBody,
            "enum_assignment" => SyntaxKind::EnumAssignment,
            "identifier" => SyntaxKind::Identifier,
            "property_identifier" | "private_property_identifier" | "type_identifier" => {
                SyntaxKind::PropertyIdentifier
            }
            "string" => SyntaxKind::StringLiteral,
            "number" => SyntaxKind::NumberLiteral,
            "comment" | "html_comment" => SyntaxKind::Comment,
            "ERROR" => SyntaxKind::Error,
            _ => SyntaxKind::Other,
        }
    }
}

/// Accessor flavour of a method definition or signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    Get,
    Set,
}

/// Detects the `get`/`set` keyword token. A method merely *named* `get` has a
/// named `property_identifier` child instead of the anonymous keyword.
pub fn accessor_of(node: &Node) -> Option<Accessor> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.is_named() {
            continue;
        }
        match child.kind() {
            "get" => return Some(Accessor::Get),
            "set" => return Some(Accessor::Set),
            _ => {}
        }
    }
    None
}

/// Whether a `const` keyword opens the declaration (as opposed to `let`).
pub fn is_const_declaration(node: &Node) -> bool {
    let mut cursor = node.walk();
    let first = node.children(&mut cursor).find(|c| !c.is_named());
    first.is_some_and(|c| c.kind() == "const")
}
