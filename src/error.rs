//! Error handling for the resume ranker

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RankerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid ranking request: {0}")]
    Validation(#[from] ValidationError),

    #[error("No resumes analyzed. Every document was skipped because no text could be extracted")]
    NoResumesAnalyzed,

    #[error("Embedding generation error: {0}")]
    Embedding(String),

    #[error("Embedding dimensions don't match: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Up-front request validation failures. Raised before any document is
/// extracted or embedded, so a rejected batch has done no work.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Job description is required")]
    MissingJobDescription,

    #[error("No resumes uploaded")]
    NoDocuments,

    #[error("Unsupported document '{filename}'. Accepted types: {accepted}")]
    UnsupportedDocument { filename: String, accepted: String },
}

pub type Result<T> = std::result::Result<T, RankerError>;

/// model2vec-rs reports loading and encoding failures through anyhow.
/// The alternate format keeps the whole context chain in the message.
impl From<anyhow::Error> for RankerError {
    fn from(err: anyhow::Error) -> Self {
        RankerError::Embedding(format!("{:#}", err))
    }
}
