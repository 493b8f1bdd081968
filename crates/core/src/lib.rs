pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod worker;

pub use config::WorkerConfig;
pub use error::{Result, ScriptscopeError};
pub use registry::{ScriptRegistry, SourceEntry};
pub use worker::LanguageWorker;
