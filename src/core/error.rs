use thiserror::Error;

#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Type '{0}' has not been synthesized in this registry")]
    TypeNotFound(String),

    #[error("Unsupported constructor shape for type '{0}': {1}")]
    UnsupportedConstructor(String, String),

    #[error("Synthesis failed for type '{0}': {1}")]
    SynthesisFailure(String, String),

    #[error("JSON error: {0}")]
    ParseError(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

pub type Result<T> = std::result::Result<T, SynthesisError>;

impl From<serde_json::Error> for SynthesisError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for SynthesisError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}
