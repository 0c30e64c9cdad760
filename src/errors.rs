use thiserror::Error;

/// Error type that captures schema retrieval, form mutation, and submission
/// failures.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("{message}")]
    SchemaFetch { message: String },
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Unknown option `{option}` for field `{field}`")]
    UnknownOption { field: String, option: String },
}
