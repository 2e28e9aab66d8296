// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("NVIDIA API key is missing from environment variables.")]
    MissingCredential,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No documents found in {0}")]
    NoDocuments(PathBuf),

    #[error("Vector index is not ready; run document embedding first")]
    IndexNotReady,

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} API request failed with status {status}: {body}")]
    Api {
        service: &'static str,
        status: u16,
        body: String,
    },

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AdvisorError {
    /// True for errors caused by the caller's input rather than the system.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AdvisorError::Validation(_) | AdvisorError::IndexNotReady
        )
    }
}
