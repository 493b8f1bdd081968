#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Unexpected response for {method}: {found}")]
    UnexpectedResponse {
        method: &'static str,
        found: &'static str,
    },
    #[error("Worker error: {0}")]
    Worker(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
