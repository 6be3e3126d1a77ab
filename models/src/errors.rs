// models/src/errors.rs

pub use thiserror::Error;

use crate::identifiers::DraftId;

/// A validation error raised while turning user-entered text into model values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A numeric field could not be parsed.
    #[error("field '{field}' has invalid numeric value '{value}'")]
    InvalidNumber { field: String, value: String },
    /// A temperature fell outside the accepted range.
    #[error("temperature {0}°C is outside the accepted range of 20°C to 60°C")]
    TemperatureOutOfRange(f64),
    /// A manually entered timestamp did not match `DD/MM/YY HH:MM`.
    #[error("invalid timestamp format '{0}', expected DD/MM/YY HH:MM")]
    InvalidTimestampFormat(String),
    /// The timestamp had the right shape but is not a real date or time.
    #[error("'{0}' is not a valid date and time")]
    InvalidDate(String),
    /// A required form field was left blank.
    #[error("required field '{0}' is missing")]
    MissingField(&'static str),
    /// A draft row identifier is malformed.
    #[error("identifier '{0}' is invalid")]
    InvalidIdentifier(String),
    /// A draft row field could not be converted for submission.
    #[error("row {id}: {source}")]
    InvalidRow {
        id: DraftId,
        #[source]
        source: Box<ValidationError>,
    },
}

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;
