// models/src/temperature.rs

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};
use crate::fields::parse_optional_decimal;

/// Lowest accepted reading in °C, inclusive.
pub const MIN_TEMPERATURE_C: f64 = 20.0;
/// Highest accepted reading in °C, inclusive.
pub const MAX_TEMPERATURE_C: f64 = 60.0;

/// Returns `true` for an absent reading or one within 20–60 °C.
///
/// The range covers device self-test and probe readings, not just body
/// temperature. `NaN` is never valid.
pub fn is_valid_temperature(value: Option<f64>) -> bool {
    match value {
        None => true,
        Some(v) => (MIN_TEMPERATURE_C..=MAX_TEMPERATURE_C).contains(&v),
    }
}

/// The temperature columns of a vitals row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TemperatureField {
    TrialDeviceReading,
    ProbeReading,
    BodyTemperature,
    RoomTemperature,
}

impl TemperatureField {
    pub const ALL: [TemperatureField; 4] = [
        TemperatureField::TrialDeviceReading,
        TemperatureField::ProbeReading,
        TemperatureField::BodyTemperature,
        TemperatureField::RoomTemperature,
    ];

    /// Ambient readings routinely fall outside the clinical range, so the
    /// room column is never range checked.
    pub fn is_range_checked(self) -> bool {
        !matches!(self, TemperatureField::RoomTemperature)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TemperatureField::TrialDeviceReading => "trialDeviceReading",
            TemperatureField::ProbeReading => "probeReading",
            TemperatureField::BodyTemperature => "bodyTemperature",
            TemperatureField::RoomTemperature => "roomTemperature",
        }
    }
}

impl fmt::Display for TemperatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses and range checks a temperature column as entered.
pub fn check_temperature_field(field: TemperatureField, raw: &str) -> ValidationResult<Option<f64>> {
    let value = parse_optional_decimal(field.as_str(), raw)?;
    match value {
        Some(v) if field.is_range_checked() && !is_valid_temperature(Some(v)) => {
            Err(ValidationError::TemperatureOutOfRange(v))
        }
        _ => Ok(value),
    }
}
