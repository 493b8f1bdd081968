//! Caller-side language settings shared between the manager and extra-lib
//! handles.

use crate::error::{Result, RuntimeError};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use scriptscope_api::{CompilerOptions, DiagnosticsOptions, ExtraLib, ScriptVersion};
use scriptscope_core::WorkerConfig;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const EXTRA_LIB_PREFIX: &str = "ts:extralib-";

/// Compiler options, diagnostics options and extra libs, plus a revision
/// counter that moves on every change.
#[derive(Debug, Clone)]
pub struct LanguageDefaults {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    extra_libs: DashMap<String, ExtraLib>,
    compiler_options: RwLock<CompilerOptions>,
    diagnostics_options: RwLock<DiagnosticsOptions>,
    worker_max_idle: Option<Duration>,
    eager_model_sync: bool,
    revision: AtomicU64,
}

impl Default for LanguageDefaults {
    fn default() -> Self {
        Self::new(&WorkerConfig::default())
    }
}

impl LanguageDefaults {
    pub fn new(config: &WorkerConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                extra_libs: DashMap::new(),
                compiler_options: RwLock::new(config.compiler_options.clone()),
                diagnostics_options: RwLock::new(config.diagnostics_options.clone()),
                worker_max_idle: config.max_idle(),
                eager_model_sync: config.eager_model_sync,
                revision: AtomicU64::new(0),
            }),
        }
    }

    /// Settings a freshly spawned worker starts from.
    pub fn to_config(&self) -> WorkerConfig {
        WorkerConfig {
            compiler_options: self.compiler_options(),
            diagnostics_options: self.diagnostics_options(),
            worker_max_idle_ms: self
                .inner
                .worker_max_idle
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
            eager_model_sync: self.inner.eager_model_sync,
        }
    }

    pub fn compiler_options(&self) -> CompilerOptions {
        self.inner
            .compiler_options
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_compiler_options(&self, options: CompilerOptions) {
        *self
            .inner
            .compiler_options
            .write()
            .unwrap_or_else(PoisonError::into_inner) = options;
        self.bump();
    }

    pub fn diagnostics_options(&self) -> DiagnosticsOptions {
        self.inner
            .diagnostics_options
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_diagnostics_options(&self, options: DiagnosticsOptions) {
        *self
            .inner
            .diagnostics_options
            .write()
            .unwrap_or_else(PoisonError::into_inner) = options;
        self.bump();
    }

    /// `None` when idle retirement is disabled.
    pub fn worker_max_idle(&self) -> Option<Duration> {
        self.inner.worker_max_idle
    }

    pub fn eager_model_sync(&self) -> bool {
        self.inner.eager_model_sync
    }

    pub fn revision(&self) -> u64 {
        self.inner.revision.load(Ordering::Acquire)
    }

    /// Register an extra declaration source. Without a path one is generated
    /// as `ts:extralib-<unix millis>`.
    pub fn add_extra_lib(
        &self,
        content: impl Into<String>,
        file_path: Option<&str>,
    ) -> Result<ExtraLibHandle> {
        let file_path = match file_path {
            Some(path) => path.to_string(),
            None => self.generated_path(),
        };

        match self.inner.extra_libs.entry(file_path.clone()) {
            Entry::Occupied(_) => {
                tracing::warn!(path = %file_path, "extra lib already registered");
                Err(RuntimeError::DuplicateExtraLib(file_path))
            }
            Entry::Vacant(slot) => {
                let version = ScriptVersion(self.bump());
                slot.insert(ExtraLib {
                    content: content.into(),
                    version,
                });
                tracing::debug!(path = %file_path, %version, "added extra lib");
                Ok(ExtraLibHandle {
                    defaults: self.clone(),
                    file_path,
                    version,
                })
            }
        }
    }

    /// Replace every extra lib at once. Outstanding handles become inert.
    pub fn set_extra_libs<I, P, C>(&self, libs: I)
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<String>,
        C: Into<String>,
    {
        let version = ScriptVersion(self.bump());
        self.inner.extra_libs.clear();
        for (path, content) in libs {
            self.inner.extra_libs.insert(
                path.into(),
                ExtraLib {
                    content: content.into(),
                    version,
                },
            );
        }
    }

    /// Ordered snapshot of the extra libs, as pushed to the worker.
    pub fn extra_libs(&self) -> BTreeMap<String, ExtraLib> {
        self.inner
            .extra_libs
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    fn bump(&self) -> u64 {
        self.inner.revision.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn generated_path(&self) -> String {
        let mut millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        while self
            .inner
            .extra_libs
            .contains_key(&format!("{EXTRA_LIB_PREFIX}{millis}"))
        {
            millis += 1;
        }
        format!("{EXTRA_LIB_PREFIX}{millis}")
    }
}

/// Removes its extra lib on [`ExtraLibHandle::dispose`].
#[derive(Debug)]
pub struct ExtraLibHandle {
    defaults: LanguageDefaults,
    file_path: String,
    version: ScriptVersion,
}

impl ExtraLibHandle {
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Returns false when the lib was already replaced or removed.
    pub fn dispose(self) -> bool {
        let removed = self
            .defaults
            .inner
            .extra_libs
            .remove_if(&self.file_path, |_, lib| lib.version == self.version)
            .is_some();
        if removed {
            self.defaults.bump();
            tracing::debug!(path = %self.file_path, "disposed extra lib");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_path_is_rejected() {
        let defaults = LanguageDefaults::default();
        let _handle = defaults.add_extra_lib("a", Some("ts:a.d.ts")).unwrap();
        let err = defaults.add_extra_lib("b", Some("ts:a.d.ts")).unwrap_err();
        assert!(matches!(err, RuntimeError::DuplicateExtraLib(_)));
        assert_eq!(defaults.extra_libs()["ts:a.d.ts"].content, "a");
    }

    #[test]
    fn test_generated_paths_are_unique() {
        let defaults = LanguageDefaults::default();
        let a = defaults.add_extra_lib("a", None).unwrap();
        let b = defaults.add_extra_lib("b", None).unwrap();
        assert!(a.file_path().starts_with(EXTRA_LIB_PREFIX));
        assert_ne!(a.file_path(), b.file_path());
    }

    #[test]
    fn test_dispose_removes_and_bumps_revision() {
        let defaults = LanguageDefaults::default();
        let handle = defaults.add_extra_lib("a", Some("ts:a.d.ts")).unwrap();
        let before = defaults.revision();
        assert!(handle.dispose());
        assert!(defaults.revision() > before);
        assert!(defaults.extra_libs().is_empty());
    }

    #[test]
    fn test_stale_handle_does_not_remove_replacement() {
        let defaults = LanguageDefaults::default();
        let handle = defaults.add_extra_lib("old", Some("ts:a.d.ts")).unwrap();
        defaults.set_extra_libs([("ts:a.d.ts", "new")]);
        assert!(!handle.dispose());
        assert_eq!(defaults.extra_libs()["ts:a.d.ts"].content, "new");
    }
}
