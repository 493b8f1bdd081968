use crate::error::Result;
use schemars::JsonSchema;
use scriptscope_api::{CompilerOptions, DiagnosticsOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Two minutes, matching the editor-side default.
pub const DEFAULT_WORKER_MAX_IDLE_MS: u64 = 2 * 60 * 1000;

/// Worker settings as read from a JSON file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerConfig {
    pub compiler_options: CompilerOptions,
    pub diagnostics_options: DiagnosticsOptions,
    /// Idle time after which the worker is retired. Zero disables retirement.
    pub worker_max_idle_ms: u64,
    /// Push every open buffer to the worker eagerly instead of on first query.
    pub eager_model_sync: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            compiler_options: CompilerOptions::default(),
            diagnostics_options: DiagnosticsOptions::default(),
            worker_max_idle_ms: DEFAULT_WORKER_MAX_IDLE_MS,
            eager_model_sync: false,
        }
    }
}

impl WorkerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded worker config");
        Ok(config)
    }

    pub fn max_idle(&self) -> Option<Duration> {
        (self.worker_max_idle_ms > 0).then(|| Duration::from_millis(self.worker_max_idle_ms))
    }
}
