// lib/src/errors.rs

use thiserror::Error;

use models::errors::ValidationError;
use models::identifiers::DraftId;

#[derive(Debug, Error)]
pub enum VitalsError {
    #[error("Draft row not found: {0}")]
    RowNotFound(DraftId),

    #[error("No new rows to save")]
    NothingToSave,

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Backend returned {status} for {url}")]
    BackendStatus { status: u16, url: String },

    #[error("JSON serialization/deserialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

pub type VitalsResult<T> = std::result::Result<T, VitalsError>;

impl From<anyhow::Error> for VitalsError {
    fn from(err: anyhow::Error) -> Self {
        VitalsError::ConfigurationError(format!("{:#}", err))
    }
}
