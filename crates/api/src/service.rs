use crate::error::ApiResult;
use crate::models::{Diagnostic, OutlineEntry, ReferenceMap, ScriptVersion};
use async_trait::async_trait;

/// Caller-side view of a language worker.
///
/// Each call is one request/response exchange across the worker boundary.
#[async_trait]
pub trait LanguageWorkerService: Send + Sync {
    /// Flat outline of named constructs in document order.
    async fn get_outline(&self, file_name: &str) -> ApiResult<Vec<OutlineEntry>>;

    /// Distinct member/index names accessed on each tracked root.
    async fn get_referenced_properties(
        &self,
        file_name: &str,
        roots: &[String],
    ) -> ApiResult<ReferenceMap>;

    async fn get_syntactic_diagnostics(&self, file_name: &str) -> ApiResult<Vec<Diagnostic>>;

    async fn list_files(&self) -> ApiResult<Vec<String>>;

    async fn get_script_version(&self, file_name: &str) -> ApiResult<Option<ScriptVersion>>;

    async fn get_script_text(&self, file_name: &str) -> ApiResult<Option<String>>;
}
