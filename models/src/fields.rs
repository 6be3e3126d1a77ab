// models/src/fields.rs
// Conversions from form text to optional numeric values. Blank text is `None`.

use crate::errors::{ValidationError, ValidationResult};

fn invalid(field: &str, raw: &str) -> ValidationError {
    ValidationError::InvalidNumber {
        field: field.to_string(),
        value: raw.to_string(),
    }
}

pub fn parse_optional_decimal(field: &str, raw: &str) -> ValidationResult<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(invalid(field, raw)),
    }
}

pub fn parse_optional_integer(field: &str, raw: &str) -> ValidationResult<Option<i32>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed.parse::<i32>().map(Some).map_err(|_| invalid(field, raw))
}

/// Like [`parse_optional_decimal`] but blank input is an error.
pub fn parse_required_decimal(field: &'static str, raw: &str) -> ValidationResult<f64> {
    parse_optional_decimal(field, raw)?.ok_or(ValidationError::MissingField(field))
}
