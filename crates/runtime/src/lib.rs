pub mod cache;
pub mod defaults;
pub mod error;
pub mod manager;

pub use defaults::{ExtraLibHandle, LanguageDefaults};
pub use error::RuntimeError;
pub use manager::WorkerManager;

use scriptscope_core::WorkerConfig;

/// Build a manager with result caching from a loaded configuration.
///
/// This is the entry point the CLI and embedders use; it wires the defaults
/// and the worker lifecycle together.
pub fn build_default_manager(config: &WorkerConfig) -> WorkerManager {
    WorkerManager::new(LanguageDefaults::new(config))
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<impl Drop> {
    Some(scriptscope_core::logging::init_logging(component, to_stderr))
}
