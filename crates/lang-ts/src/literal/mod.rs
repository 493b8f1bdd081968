//! Static literal-value oracles for computed member access.

mod constant;

pub use constant::ConstLiteralResolver;

use std::collections::HashMap;
use std::fmt;
use tree_sitter::Node;

/// A statically known literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    String(String),
    Number(f64),
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::String(s) => f.write_str(s),
            LiteralValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            LiteralValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(s: &str) -> Self {
        LiteralValue::String(s.to_string())
    }
}

impl From<f64> for LiteralValue {
    fn from(n: f64) -> Self {
        LiteralValue::Number(n)
    }
}

/// Resolves an expression to the literal value a type checker would assign it.
///
/// Used by the reference resolver for `root[a.b]` style access. Returning
/// `None` simply leaves the access unresolved.
pub trait LiteralResolver {
    fn resolve_literal(&self, expr: &Node, source: &str) -> Option<LiteralValue>;
}

/// Never resolves anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLiteralResolver;

impl LiteralResolver for NoopLiteralResolver {
    fn resolve_literal(&self, _expr: &Node, _source: &str) -> Option<LiteralValue> {
        None
    }
}

/// Table of expression source text to value.
#[derive(Debug, Default, Clone)]
pub struct StaticLiteralResolver {
    table: HashMap<String, LiteralValue>,
}

impl StaticLiteralResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, expr: impl Into<String>, value: impl Into<LiteralValue>) -> Self {
        self.table.insert(expr.into(), value.into());
        self
    }
}

impl LiteralResolver for StaticLiteralResolver {
    fn resolve_literal(&self, expr: &Node, source: &str) -> Option<LiteralValue> {
        let text = expr.utf8_text(source.as_bytes()).ok()?;
        self.table.get(text).cloned()
    }
}
