use scriptscope_api::ScriptKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyntaxError {
    #[error("Failed to load {kind} grammar: {message}")]
    Grammar { kind: ScriptKind, message: String },
    #[error("Parser produced no tree for {0}")]
    NoTree(String),
}

pub type Result<T> = std::result::Result<T, SyntaxError>;
