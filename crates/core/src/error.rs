use scriptscope_api::{ApiError, ScriptVersion};
use scriptscope_ts::SyntaxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptscopeError {
    #[error("Stale version for {file}: current {current}, got {attempted}")]
    StaleVersion {
        file: String,
        current: ScriptVersion,
        attempted: ScriptVersion,
    },
    #[error("Source already registered: {0}")]
    DuplicateSource(String),
    #[error("Syntax tree error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ScriptscopeError> for ApiError {
    fn from(err: ScriptscopeError) -> Self {
        match err {
            ScriptscopeError::StaleVersion { .. } | ScriptscopeError::DuplicateSource(_) => {
                ApiError::InvalidArgument(err.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScriptscopeError>;
