use crate::models::{ScriptKind, ScriptVersion};

/// The view of the analysis universe the core reads from.
///
/// Implemented by the script registry; analysis never mutates it.
pub trait ScriptHost {
    /// Live buffers, then auxiliary declarations, then builtin libraries.
    fn list_files(&self) -> Vec<String>;

    /// Current version token, `None` for unknown names.
    fn get_version(&self, file_name: &str) -> Option<ScriptVersion>;

    /// Current text, `None` for unknown names.
    fn get_text(&self, file_name: &str) -> Option<&str>;

    /// Parser classification for a file name.
    fn script_kind(&self, file_name: &str) -> ScriptKind;
}
