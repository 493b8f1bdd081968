//! TypeScript/JavaScript analysis over tree-sitter syntax trees.
//!
//! The parser itself is external; this crate classifies its nodes into a closed
//! [`SyntaxKind`] set and runs the tree walks on top of it.

pub mod diagnostics;
pub mod error;
pub mod literal;
mod naming;
pub mod outline;
pub mod references;
pub mod syntax;

pub use diagnostics::syntactic_diagnostics;
pub use error::SyntaxError;
pub use literal::{
    ConstLiteralResolver, LiteralResolver, LiteralValue, NoopLiteralResolver,
    StaticLiteralResolver,
};
pub use outline::build_outline;
pub use references::resolve_references;
pub use syntax::{ScriptParser, SyntaxKind, SyntaxTree, parse_script};
