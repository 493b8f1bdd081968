pub mod error;
pub mod host;
pub mod models;
pub mod protocol;
pub mod service;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use host::ScriptHost;
pub use models::*;
pub use protocol::{ResponsePayload, WorkerRequest, WorkerResponse};
pub use service::LanguageWorkerService;
