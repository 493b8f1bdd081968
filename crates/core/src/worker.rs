use crate::config::WorkerConfig;
use crate::error::Result;
use crate::registry::ScriptRegistry;
use scriptscope_api::{
    Diagnostic, DiagnosticsOptions, OutlineEntry, ReferenceMap, ResponsePayload, ScriptHost,
    WorkerRequest, WorkerResponse,
};
use scriptscope_ts::{
    ConstLiteralResolver, ScriptParser, SyntaxTree, build_outline, resolve_references,
    syntactic_diagnostics,
};

/// Single-threaded request handler over a [`ScriptRegistry`].
///
/// Trees are parsed per query from the registry's current text and dropped
/// afterwards; nothing derived from a tree outlives the request that built it.
pub struct LanguageWorker {
    registry: ScriptRegistry,
    diagnostics: DiagnosticsOptions,
    parser: ScriptParser,
}

impl LanguageWorker {
    pub fn new(config: &WorkerConfig) -> Self {
        Self {
            registry: ScriptRegistry::new(config.compiler_options.clone()),
            diagnostics: config.diagnostics_options.clone(),
            parser: ScriptParser::new(),
        }
    }

    pub fn registry(&self) -> &ScriptRegistry {
        &self.registry
    }

    /// Answer one request. Failures become an error response and leave the
    /// registry as it was.
    pub fn handle(&mut self, request: WorkerRequest) -> WorkerResponse {
        let method = request.method();
        match self.dispatch(request) {
            Ok(payload) => WorkerResponse::ok(payload),
            Err(err) => {
                tracing::warn!(method, error = %err, "request failed");
                WorkerResponse::error(err.to_string())
            }
        }
    }

    fn dispatch(&mut self, request: WorkerRequest) -> Result<ResponsePayload> {
        let payload = match request {
            WorkerRequest::SyncBuffer {
                file_name,
                version,
                text,
            } => {
                self.registry.sync_buffer(&file_name, version, text)?;
                ResponsePayload::Ack
            }
            WorkerRequest::CloseBuffer { file_name } => {
                self.registry.close_buffer(&file_name);
                ResponsePayload::Ack
            }
            WorkerRequest::SyncExtraLibs { libs } => {
                self.registry.replace_auxiliary(libs)?;
                ResponsePayload::Ack
            }
            WorkerRequest::UpdateCompilerOptions { options } => {
                self.registry.set_compiler_options(options);
                ResponsePayload::Ack
            }
            WorkerRequest::ListFiles => ResponsePayload::Files(self.registry.list_files()),
            WorkerRequest::GetScriptVersion { file_name } => {
                ResponsePayload::Version(self.registry.get_version(&file_name))
            }
            WorkerRequest::GetScriptText { file_name } => {
                ResponsePayload::Text(self.registry.get_text(&file_name).map(str::to_string))
            }
            WorkerRequest::GetOutline { file_name } => {
                ResponsePayload::Outline(self.get_outline(&file_name)?)
            }
            WorkerRequest::GetReferencedProperties { file_name, roots } => {
                ResponsePayload::References(self.get_referenced_properties(&file_name, &roots)?)
            }
            WorkerRequest::GetSyntacticDiagnostics { file_name } => {
                ResponsePayload::Diagnostics(self.get_syntactic_diagnostics(&file_name)?)
            }
        };
        Ok(payload)
    }

    /// Outline of `file_name`; empty when the registry does not know it.
    pub fn get_outline(&mut self, file_name: &str) -> Result<Vec<OutlineEntry>> {
        let Some(tree) = self.parse(file_name)? else {
            return Ok(Vec::new());
        };
        let outline = build_outline(&tree);
        tracing::debug!(
            file = file_name,
            version = ?tree.version(),
            entries = outline.len(),
            "getOutline"
        );
        Ok(outline)
    }

    /// Accessed names per root. Computed indices resolve against constants
    /// declared in the file itself and in the auxiliary declarations.
    pub fn get_referenced_properties(
        &mut self,
        file_name: &str,
        roots: &[String],
    ) -> Result<ReferenceMap> {
        let Some(tree) = self.parse(file_name)? else {
            return Ok(ReferenceMap::with_roots(roots.iter().cloned()));
        };

        let auxiliary: Vec<String> = self
            .registry
            .auxiliary()
            .map(|(name, _)| name.to_string())
            .collect();
        let mut literals = ConstLiteralResolver::new();
        for name in &auxiliary {
            if let Some(lib) = self.parse(name)? {
                literals.index_tree(&lib);
            }
        }
        literals.index_tree(&tree);

        let references = resolve_references(&tree, roots.iter().cloned(), &literals);
        tracing::debug!(
            file = file_name,
            version = ?tree.version(),
            roots = references.len(),
            constants = literals.len(),
            "getReferencedProperties"
        );
        Ok(references)
    }

    pub fn get_syntactic_diagnostics(&mut self, file_name: &str) -> Result<Vec<Diagnostic>> {
        if self.diagnostics.no_syntax_validation {
            return Ok(Vec::new());
        }
        let Some(tree) = self.parse(file_name)? else {
            return Ok(Vec::new());
        };
        let diagnostics = syntactic_diagnostics(&tree);
        tracing::debug!(
            file = file_name,
            version = ?tree.version(),
            count = diagnostics.len(),
            "getSyntacticDiagnostics"
        );
        Ok(diagnostics)
    }

    /// No text means no tree.
    fn parse(&mut self, file_name: &str) -> Result<Option<SyntaxTree>> {
        let (Some(version), Some(text)) = (
            self.registry.get_version(file_name),
            self.registry.get_text(file_name),
        ) else {
            return Ok(None);
        };
        let kind = self.registry.script_kind(file_name);
        let tree = self.parser.parse(file_name, Some(version), text, kind)?;
        Ok(Some(tree))
    }
}
