//! Source entries visible to the worker: live buffers, auxiliary declarations
//! and the builtin default library.

mod builtin;

pub use builtin::{BUILTIN_VERSION, DEFAULT_LIB_ES6_NAME, DEFAULT_LIB_NAME, active_builtin, is_builtin};

use crate::error::{Result, ScriptscopeError};
use indexmap::IndexMap;
use scriptscope_api::{
    CompilerOptions, ExtraLib, ScriptHost, ScriptKind, ScriptVersion, SourceOrigin,
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub text: String,
    pub version: ScriptVersion,
    pub origin: SourceOrigin,
}

/// At most one entry per file name across all three origins.
#[derive(Debug, Clone, Default)]
pub struct ScriptRegistry {
    buffers: IndexMap<String, SourceEntry>,
    auxiliary: BTreeMap<String, SourceEntry>,
    options: CompilerOptions,
}

impl ScriptRegistry {
    pub fn new(options: CompilerOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn compiler_options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn set_compiler_options(&mut self, options: CompilerOptions) {
        self.options = options;
    }

    /// Create a live buffer or replace its text. Replacements must carry a
    /// strictly greater version.
    pub fn sync_buffer(
        &mut self,
        file_name: &str,
        version: ScriptVersion,
        text: impl Into<String>,
    ) -> Result<()> {
        if self.auxiliary.contains_key(file_name) || is_builtin(file_name) {
            tracing::warn!(file = file_name, "buffer name collides with a declaration source");
            return Err(ScriptscopeError::DuplicateSource(file_name.to_string()));
        }
        if let Some(existing) = self.buffers.get(file_name).filter(|e| version <= e.version) {
            tracing::warn!(
                file = file_name,
                current = %existing.version,
                attempted = %version,
                "rejected stale buffer update"
            );
            return Err(ScriptscopeError::StaleVersion {
                file: file_name.to_string(),
                current: existing.version,
                attempted: version,
            });
        }

        self.buffers.insert(
            file_name.to_string(),
            SourceEntry {
                text: text.into(),
                version,
                origin: SourceOrigin::LiveBuffer,
            },
        );
        Ok(())
    }

    /// Returns whether a buffer was open under that name.
    pub fn close_buffer(&mut self, file_name: &str) -> bool {
        self.buffers.shift_remove(file_name).is_some()
    }

    /// Swap the whole auxiliary set. On a name collision nothing changes.
    pub fn replace_auxiliary(&mut self, libs: BTreeMap<String, ExtraLib>) -> Result<()> {
        if let Some(clash) = libs
            .keys()
            .find(|name| self.buffers.contains_key(*name) || is_builtin(name))
        {
            tracing::warn!(file = %clash, "auxiliary declaration collides with another source");
            return Err(ScriptscopeError::DuplicateSource(clash.clone()));
        }

        self.auxiliary = libs
            .into_iter()
            .map(|(name, lib)| {
                let entry = SourceEntry {
                    text: lib.content,
                    version: lib.version,
                    origin: SourceOrigin::AuxiliaryDeclaration,
                };
                (name, entry)
            })
            .collect();
        tracing::debug!(count = self.auxiliary.len(), "replaced auxiliary declarations");
        Ok(())
    }

    pub fn origin_of(&self, file_name: &str) -> Option<SourceOrigin> {
        if let Some(entry) = self.buffers.get(file_name).or_else(|| self.auxiliary.get(file_name)) {
            return Some(entry.origin);
        }
        is_builtin(file_name).then_some(SourceOrigin::BuiltinDefault)
    }

    pub fn buffers(&self) -> impl Iterator<Item = (&str, &SourceEntry)> {
        self.buffers.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn auxiliary(&self) -> impl Iterator<Item = (&str, &SourceEntry)> {
        self.auxiliary.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn active_builtin(&self) -> &'static str {
        active_builtin(self.options.target)
    }
}

impl ScriptHost for ScriptRegistry {
    fn list_files(&self) -> Vec<String> {
        self.buffers
            .keys()
            .chain(self.auxiliary.keys())
            .cloned()
            .chain(std::iter::once(self.active_builtin().to_string()))
            .collect()
    }

    fn get_version(&self, file_name: &str) -> Option<ScriptVersion> {
        if let Some(entry) = self.buffers.get(file_name).or_else(|| self.auxiliary.get(file_name)) {
            return Some(entry.version);
        }
        (file_name == self.active_builtin()).then_some(BUILTIN_VERSION)
    }

    fn get_text(&self, file_name: &str) -> Option<&str> {
        self.buffers
            .get(file_name)
            .or_else(|| self.auxiliary.get(file_name))
            .map(|entry| entry.text.as_str())
            .or_else(|| builtin::builtin_text(file_name))
    }

    fn script_kind(&self, file_name: &str) -> ScriptKind {
        ScriptKind::from_file_name(file_name, self.options.allow_js)
    }
}
