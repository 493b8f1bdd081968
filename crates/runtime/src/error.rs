use scriptscope_api::{ApiError, ScriptVersion};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Language worker is gone")]
    WorkerGone,
    #[error("Worker error: {0}")]
    Worker(String),
    #[error("Unexpected response for {method}: {found}")]
    UnexpectedResponse {
        method: &'static str,
        found: &'static str,
    },
    #[error("Extra lib already registered: {0}")]
    DuplicateExtraLib(String),
    #[error("Stale version for {file}: current {current}, got {attempted}")]
    StaleVersion {
        file: String,
        current: ScriptVersion,
        attempted: ScriptVersion,
    },
    #[error("Failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

impl From<RuntimeError> for ApiError {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::Worker(message) => ApiError::Worker(message),
            RuntimeError::WorkerGone => ApiError::Worker(err.to_string()),
            RuntimeError::UnexpectedResponse { method, found } => {
                ApiError::UnexpectedResponse { method, found }
            }
            RuntimeError::DuplicateExtraLib(_) | RuntimeError::StaleVersion { .. } => {
                ApiError::InvalidArgument(err.to_string())
            }
            RuntimeError::Spawn(_) => ApiError::Internal(err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
