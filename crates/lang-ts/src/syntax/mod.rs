mod kind;

pub use kind::{Accessor, SyntaxKind, accessor_of, is_const_declaration};

use crate::error::{Result, SyntaxError};
use scriptscope_api::{ScriptKind, ScriptVersion};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tree_sitter::{Language, Node, Parser, Tree};

pub fn language_for(kind: ScriptKind) -> Language {
    match kind {
        ScriptKind::Ts => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        ScriptKind::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        ScriptKind::Js | ScriptKind::Jsx => tree_sitter_javascript::LANGUAGE.into(),
    }
}

/// A parsed source bundled with the exact text and version it was built from.
pub struct SyntaxTree {
    file_name: String,
    version: Option<ScriptVersion>,
    kind: ScriptKind,
    source: String,
    tree: Tree,
}

impl SyntaxTree {
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn version(&self) -> Option<ScriptVersion> {
        self.version
    }

    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Source text covered by a node of this tree.
    pub fn text(&self, node: &Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }
}

impl std::fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("file_name", &self.file_name)
            .field("version", &self.version)
            .field("kind", &self.kind)
            .field("len", &self.source.len())
            .finish()
    }
}

/// Holds one tree-sitter parser per script kind, created on first use.
#[derive(Default)]
pub struct ScriptParser {
    parsers: HashMap<ScriptKind, Parser>,
}

impl ScriptParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(
        &mut self,
        file_name: &str,
        version: Option<ScriptVersion>,
        text: &str,
        kind: ScriptKind,
    ) -> Result<SyntaxTree> {
        let parser = self.parser_for(kind)?;
        let tree = parser
            .parse(text, None)
            .ok_or_else(|| SyntaxError::NoTree(file_name.to_string()))?;
        tracing::trace!(file = file_name, %kind, "parsed script");
        Ok(SyntaxTree {
            file_name: file_name.to_string(),
            version,
            kind,
            source: text.to_string(),
            tree,
        })
    }

    fn parser_for(&mut self, kind: ScriptKind) -> Result<&mut Parser> {
        match self.parsers.entry(kind) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(v) => {
                let mut parser = Parser::new();
                parser
                    .set_language(&language_for(kind))
                    .map_err(|e| SyntaxError::Grammar {
                        kind,
                        message: e.to_string(),
                    })?;
                Ok(v.insert(parser))
            }
        }
    }
}

/// One-shot parse without a version, for tools and tests.
pub fn parse_script(file_name: &str, text: &str, kind: ScriptKind) -> Result<SyntaxTree> {
    ScriptParser::new().parse(file_name, None, text, kind)
}
